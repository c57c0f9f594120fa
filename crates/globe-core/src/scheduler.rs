//! Explicit per-frame tick with a stop flag.
//!
//! The owner of the loop (a RAF callback, a thread) calls `tick` and only
//! schedules the next frame on `TickOutcome::Continue`. After `stop`, a tick
//! that still fires is a no-op and never touches the landmark source.

use crate::globe::Globe;
use crate::landmarks::LandmarkSource;
use crate::pipeline::FrameReport;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Clone, Debug, Default)]
pub struct LoopControl {
    running: Arc<AtomicBool>,
    /// Bumped on every stopped -> running transition.
    starts: Arc<AtomicU64>,
}

impl LoopControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) {
        if !self.running.swap(true, Ordering::SeqCst) {
            let n = self.starts.fetch_add(1, Ordering::SeqCst) + 1;
            log::info!("[loop] started (run {})", n);
        }
    }

    pub fn stop(&self) {
        if self.running.swap(false, Ordering::SeqCst) {
            log::info!("[loop] stopped");
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Number of times the loop has been started.
    #[inline]
    pub fn run_count(&self) -> u64 {
        self.starts.load(Ordering::SeqCst)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    Continue(FrameReport),
    Stopped,
}

#[derive(Debug)]
pub struct FrameLoop {
    control: LoopControl,
    last_timestamp_ms: Option<f64>,
    /// Run the last frame belonged to; a different run means a restart.
    run: u64,
}

impl FrameLoop {
    pub fn new(control: LoopControl) -> Self {
        Self {
            control,
            last_timestamp_ms: None,
            run: 0,
        }
    }

    pub fn control(&self) -> &LoopControl {
        &self.control
    }

    /// Run exactly one frame, in order: acquire, classify, smooth, track, rotate.
    pub fn tick<S: LandmarkSource + ?Sized>(
        &mut self,
        now_ms: f64,
        source: &mut S,
        globe: &mut Globe,
    ) -> TickOutcome {
        if !self.control.is_running() {
            return TickOutcome::Stopped;
        }
        let run = self.control.run_count();
        let resumed = run != self.run;
        self.run = run;

        // Detectors require strictly increasing timestamps.
        let timestamp_ms = match self.last_timestamp_ms {
            Some(prev) if now_ms <= prev => prev + 1.0,
            _ => now_ms,
        };
        let elapsed_sec = match self.last_timestamp_ms {
            Some(prev) if !resumed => ((timestamp_ms - prev) / 1000.0) as f32,
            _ => 0.0,
        };
        self.last_timestamp_ms = Some(timestamp_ms);

        let detection = source.detect(timestamp_ms);
        TickOutcome::Continue(globe.frame(detection, elapsed_sec))
    }
}
