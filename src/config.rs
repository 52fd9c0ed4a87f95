//! Pipeline configuration persisted as JSON

use crate::constants::budget::{DEFAULT_TARGET, MAX_TARGET_POINTS, MIN_TARGET_POINTS};
use crate::constants::series::DEFAULT_AXIS_SERIES;
use crate::constants::time::DEFAULT_HOURS;
use crate::error::{DecimateError, Result};
use crate::lod::TargetPolicy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// User-tunable pipeline settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Window selected when nothing else was requested
    pub default_hours: u32,
    /// Series whose decimated timestamps label the x axis
    pub axis_series: String,
    /// Budget for windows without a tier or override
    pub default_target: usize,
    /// Per-hour budget overrides
    pub targets: BTreeMap<u32, usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            default_hours: DEFAULT_HOURS,
            axis_series: DEFAULT_AXIS_SERIES.to_string(),
            default_target: DEFAULT_TARGET,
            targets: BTreeMap::new(),
        }
    }
}

impl PipelineConfig {
    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DecimateError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config: Self = serde_json::from_str(&content).map_err(|e| {
            DecimateError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| DecimateError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path.as_ref(), content)
            .map_err(|e| DecimateError::Config(format!("Failed to write config: {}", e)))
    }

    /// Reject settings the pipeline cannot honour
    ///
    /// Budgets outside the renderer's range are accepted but clamped by
    /// [`TargetPolicy`]; a warning is logged for each.
    pub fn validate(&self) -> Result<()> {
        if self.default_hours == 0 {
            return Err(DecimateError::Config(
                "default_hours must be at least 1".to_string(),
            ));
        }
        if self.targets.contains_key(&0) {
            return Err(DecimateError::Config(
                "target overrides must use a positive hour count".to_string(),
            ));
        }
        if self.axis_series.trim().is_empty() {
            return Err(DecimateError::Config(
                "axis_series must name a series".to_string(),
            ));
        }

        let budgets = std::iter::once(self.default_target).chain(self.targets.values().copied());
        for target in budgets {
            if !(MIN_TARGET_POINTS..=MAX_TARGET_POINTS).contains(&target) {
                tracing::warn!(
                    budget = target,
                    min = MIN_TARGET_POINTS,
                    max = MAX_TARGET_POINTS,
                    "point budget out of range, clamping"
                );
            }
        }
        Ok(())
    }

    /// Build the point budget policy described by this config
    pub fn policy(&self) -> TargetPolicy {
        TargetPolicy::new(self.targets.clone(), self.default_target)
    }
}
