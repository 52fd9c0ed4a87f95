//! Decimation hot path and background recompute
//!
//! - LTTB downsampling of one point series
//! - Background worker that coalesces recompute triggers (last write wins)
//! - Instrumentation via the `profiling` crate (puffin/tracy backends)

mod downsample;
mod worker;

pub use downsample::lttb_downsample;
pub use worker::{DecimationWorker, WorkerRequest, WorkerResult};

// Re-export profiling macros for convenience
// When no profiling feature is enabled, these become no-ops
pub use profiling;
#[doc(hidden)]
pub use tracing;

/// Time a block under a profiling scope and trace its duration
#[macro_export]
macro_rules! timed {
    ($name:expr, $block:expr) => {{
        $crate::perf::profiling::scope!($name);
        let _t = std::time::Instant::now();
        let r = $block;
        $crate::perf::tracing::trace!(elapsed = ?_t.elapsed(), "{}", $name);
        r
    }};
}
