//! Sensor history preparation for chart rendering
//!
//! A fetched [`HistoryWindow`] is cut to the trailing time range the user
//! asked for, given a bounded point budget, and thinned with LTTB when it
//! exceeds that budget. The output is an immutable [`DecimationResult`]
//! wrapped in a [`HistoryView`] that also distinguishes "nothing in range"
//! from "not loaded yet".

pub mod config;
pub mod constants;
pub mod data;
pub mod display;
pub mod error;
pub mod filter;
pub mod lod;
pub mod perf;
pub mod pipeline;

pub use config::PipelineConfig;
pub use data::{HistoryPayload, HistoryWindow, Point, SeriesMap};
pub use error::{DecimateError, Result};
pub use filter::{Clock, FixedClock, SystemClock, filter_by_time_range};
pub use lod::{TargetPolicy, TimeRange};
pub use perf::{DecimationWorker, lttb_downsample};
pub use pipeline::{DecimationPipeline, DecimationResult, HistoryView};
