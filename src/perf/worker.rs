//! Background recompute of the history view
//!
//! Poll completions and time-range changes arrive as requests. Whenever the
//! worker wakes it drains everything queued, keeps only the newest window and
//! the newest hour count, and recomputes once. Superseded requests are dropped,
//! never replayed.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, TryRecvError, channel};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::data::HistoryWindow;
use crate::filter::Clock;
use crate::pipeline::{DecimationPipeline, HistoryView};

/// Requests that can be sent to the background worker
pub enum WorkerRequest {
    /// A freshly fetched history snapshot
    UpdateWindow(Arc<HistoryWindow>),
    /// The user picked a different time range
    SetHours(u32),
    /// Shutdown the worker
    Shutdown,
}

/// Results returned from the background worker
#[derive(Debug)]
pub enum WorkerResult {
    /// Recompute finished
    View { generation: u64, view: HistoryView },
    /// The pipeline rejected its input
    Error { generation: u64, msg: String },
}

impl WorkerResult {
    pub fn generation(&self) -> u64 {
        match self {
            WorkerResult::View { generation, .. } | WorkerResult::Error { generation, .. } => {
                *generation
            }
        }
    }
}

/// Latest inputs seen by the worker
struct WorkerState {
    window: Option<Arc<HistoryWindow>>,
    hours: u32,
    dirty: bool,
}

impl WorkerState {
    fn new(hours: u32) -> Self {
        Self {
            window: None,
            hours,
            dirty: false,
        }
    }

    /// Fold one request into the state; false on shutdown
    fn absorb(&mut self, request: WorkerRequest) -> bool {
        match request {
            WorkerRequest::UpdateWindow(window) => {
                self.window = Some(window);
                self.dirty = true;
            }
            WorkerRequest::SetHours(hours) => {
                self.dirty |= hours != self.hours;
                self.hours = hours;
            }
            WorkerRequest::Shutdown => return false,
        }
        true
    }

    /// Inputs for a recompute, if one is due; clears the dirty flag
    fn take_due(&mut self) -> Option<(Arc<HistoryWindow>, u32)> {
        if !self.dirty {
            return None;
        }
        // Nothing fetched yet: the caller still shows `HistoryView::Loading`
        let window = self.window.clone()?;
        self.dirty = false;
        Some((window, self.hours))
    }
}

/// Background worker that recomputes the history view off the caller's thread
pub struct DecimationWorker {
    tx: Sender<WorkerRequest>,
    rx: Receiver<WorkerResult>,
    handle: Option<JoinHandle<()>>,
}

impl DecimationWorker {
    /// Spawn a new background worker thread
    pub fn spawn(pipeline: DecimationPipeline, clock: Arc<dyn Clock>, hours: u32) -> Self {
        let (req_tx, req_rx) = channel::<WorkerRequest>();
        let (res_tx, res_rx) = channel::<WorkerResult>();

        let handle = thread::spawn(move || {
            Self::worker_loop(pipeline, clock, hours, req_rx, res_tx);
        });

        Self {
            tx: req_tx,
            rx: res_rx,
            handle: Some(handle),
        }
    }

    fn worker_loop(
        pipeline: DecimationPipeline,
        clock: Arc<dyn Clock>,
        hours: u32,
        rx: Receiver<WorkerRequest>,
        tx: Sender<WorkerResult>,
    ) {
        let mut state = WorkerState::new(hours);
        let mut generation = 0u64;

        while let Ok(request) = rx.recv() {
            if !state.absorb(request) {
                break;
            }

            // Coalesce everything already queued: last write wins
            let mut shutdown = false;
            loop {
                match rx.try_recv() {
                    Ok(request) => {
                        if !state.absorb(request) {
                            shutdown = true;
                            break;
                        }
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        shutdown = true;
                        break;
                    }
                }
            }
            if shutdown {
                break;
            }

            let Some((window, hours)) = state.take_due() else {
                continue;
            };

            generation += 1;
            let result = match pipeline.run_with_clock(&window, hours, clock.as_ref()) {
                Ok(view) => WorkerResult::View { generation, view },
                Err(e) => {
                    tracing::error!(generation, hours, "history recompute failed: {}", e);
                    WorkerResult::Error {
                        generation,
                        msg: e.user_message(),
                    }
                }
            };

            if tx.send(result).is_err() {
                break;
            }
        }
        tracing::debug!(generation, "decimation worker stopped");
    }

    /// Send a request to the worker (non-blocking)
    pub fn request(&self, req: WorkerRequest) {
        let _ = self.tx.send(req);
    }

    /// Hand over a freshly fetched window
    pub fn update_window(&self, window: HistoryWindow) {
        self.request(WorkerRequest::UpdateWindow(Arc::new(window)));
    }

    /// Change the requested time range
    pub fn set_hours(&self, hours: u32) {
        self.request(WorkerRequest::SetHours(hours));
    }

    /// Poll for completed work (non-blocking)
    pub fn poll(&self) -> Option<WorkerResult> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Newest completed result, discarding any older ones still queued
    pub fn latest(&self) -> Option<WorkerResult> {
        std::iter::from_fn(|| self.poll()).last()
    }

    /// Block until a result arrives or `timeout` elapses
    pub fn recv_timeout(&self, timeout: Duration) -> Option<WorkerResult> {
        match self.rx.recv_timeout(timeout) {
            Ok(result) => Some(result),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

impl Drop for DecimationWorker {
    fn drop(&mut self) {
        let _ = self.tx.send(WorkerRequest::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SeriesMap;
    use crate::filter::FixedClock;

    const WAIT: Duration = Duration::from_secs(5);

    fn window(n: i64, now: i64) -> HistoryWindow {
        let timestamps: Vec<i64> = (0..n).map(|i| now - n * 30 + (i + 1) * 30).collect();
        let mut series = SeriesMap::new();
        series.insert(
            "temperature".to_string(),
            (0..n).map(|i| Some(20.0 + (i % 10) as f64)).collect(),
        );
        HistoryWindow::new(timestamps, series).unwrap()
    }

    fn spawn(now: i64, hours: u32) -> DecimationWorker {
        DecimationWorker::spawn(DecimationPipeline::default(), Arc::new(FixedClock(now)), hours)
    }

    fn expect_view(result: Option<WorkerResult>) -> (u64, HistoryView) {
        match result {
            Some(WorkerResult::View { generation, view }) => (generation, view),
            other => panic!("Expected View result, got {:?}", other),
        }
    }

    #[test]
    fn test_state_keeps_latest_inputs() {
        let mut state = WorkerState::new(24);
        assert!(state.take_due().is_none());

        // Hours alone do not trigger a recompute before any window exists
        assert!(state.absorb(WorkerRequest::SetHours(4)));
        assert!(state.take_due().is_none());

        let old = Arc::new(window(10, 1000));
        let new = Arc::new(window(20, 2000));
        state.absorb(WorkerRequest::UpdateWindow(old));
        state.absorb(WorkerRequest::SetHours(1));
        state.absorb(WorkerRequest::UpdateWindow(new.clone()));
        state.absorb(WorkerRequest::SetHours(12));

        let (w, hours) = state.take_due().unwrap();
        assert!(Arc::ptr_eq(&w, &new));
        assert_eq!(hours, 12);
        assert!(state.take_due().is_none());

        // Re-selecting the current range is not a change
        state.absorb(WorkerRequest::SetHours(12));
        assert!(state.take_due().is_none());
        assert!(!state.absorb(WorkerRequest::Shutdown));
    }

    #[test]
    fn test_worker_recomputes_on_window_and_hours() {
        let now = 1_000_000;
        let worker = spawn(now, 24);
        assert!(worker.poll().is_none());

        worker.update_window(window(1000, now));
        let (g1, view) = expect_view(worker.recv_timeout(WAIT));
        let result = view.result().unwrap();
        assert_eq!(result.hours(), 24);
        assert_eq!(result.decimated_count(), 350);

        worker.set_hours(1);
        let (g2, view) = expect_view(worker.recv_timeout(WAIT));
        assert!(g2 > g1);
        let result = view.result().unwrap();
        assert_eq!(result.hours(), 1);
        // 30s spacing: 121 samples in the last hour, one over the 120 budget
        assert_eq!(result.original_count(), 121);
        assert_eq!(result.decimated_count(), 120);
    }

    #[test]
    fn test_stale_window_gives_no_data() {
        let worker = spawn(10_000_000, 1);
        worker.update_window(window(50, 1000));
        let (_, view) = expect_view(worker.recv_timeout(WAIT));
        assert_eq!(view, HistoryView::NoData { hours: 1 });
    }

    #[test]
    fn test_invalid_hours_reported_as_error() {
        let now = 1_000_000;
        let worker = spawn(now, 24);
        worker.update_window(window(10, now));
        expect_view(worker.recv_timeout(WAIT));

        worker.set_hours(0);
        match worker.recv_timeout(WAIT) {
            Some(WorkerResult::Error { generation, msg }) => {
                assert_eq!(generation, 2);
                assert_eq!(msg, "Invalid time range: 0h");
            }
            other => panic!("Expected Error result, got {:?}", other),
        }
    }

    #[test]
    fn test_latest_result_wins() {
        let now = 1_000_000;
        let worker = spawn(now, 24);
        worker.update_window(window(1000, now));
        for hours in [1, 4, 12, 24, 4] {
            worker.set_hours(hours);
        }

        // Drain until the worker settles on the final selection
        let deadline = std::time::Instant::now() + WAIT;
        let mut last_hours = None;
        while std::time::Instant::now() < deadline {
            if let Some(WorkerResult::View { view, .. }) = worker.recv_timeout(Duration::from_millis(200)) {
                last_hours = view.result().map(|r| r.hours());
            } else if last_hours.is_some() {
                break;
            }
        }
        assert_eq!(last_hours, Some(4));
        assert!(worker.latest().is_none());
    }
}
