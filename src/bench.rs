//! Frame timing overlay
//!
//! Wraps any cart and keeps rolling averages of frame time and FPS without
//! storing past samples. Holding the stats button logs one report per press.

use crate::config::STATS_BUTTON;
use crate::fire::Cart;
use crate::host::Host;
use std::time::Instant;

/// Mean of `n` samples given the mean of the first `n - 1` and the newest one
pub fn rolling_avg(avg: f64, n: u64, new: f64) -> f64 {
    if n == 0 {
        return avg;
    }
    let n = n as f64;
    avg * ((n - 1.0) / n) + new / n
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    pub frames: u64,
    pub frametime_ms: f64,
    pub fps: f64,
}

impl FrameStats {
    /// Fold in one frame that took `delta_ms`
    pub fn record(&mut self, delta_ms: f64) {
        self.frames += 1;
        self.frametime_ms = rolling_avg(self.frametime_ms, self.frames, delta_ms);
        if delta_ms > 0.0 {
            self.fps = rolling_avg(self.fps, self.frames, 1000.0 / delta_ms);
        }
    }

    pub fn report(&self) -> Vec<String> {
        vec![
            "---".to_string(),
            format!("frames: {}", self.frames),
            format!("frametime (in ms): {:.3}", self.frametime_ms),
            format!("FPS: {:.2}", self.fps),
        ]
    }
}

/// Timing decorator around a cart
pub struct Benchmark<C> {
    inner: C,
    stats: FrameStats,
    held: bool,
    last_report: Option<Vec<String>>,
}

impl<C: Cart> Benchmark<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            stats: FrameStats::default(),
            held: false,
            last_report: None,
        }
    }

    #[cfg(test)]
    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn last_report(&self) -> Option<&[String]> {
        self.last_report.as_deref()
    }

    /// Report only on the frame the button goes down
    fn poll_button<H: Host + ?Sized>(&mut self, host: &H) {
        if host.button(STATS_BUTTON) {
            if !self.held {
                let lines = self.stats.report();
                for line in &lines {
                    tracing::info!(target: "doomfire::bench", "{line}");
                }
                self.last_report = Some(lines);
            }
            self.held = true;
        } else {
            self.held = false;
        }
    }
}

impl<C: Cart> Cart for Benchmark<C> {
    fn boot<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.stats = FrameStats::default();
        self.held = false;
        self.last_report = None;
        self.inner.boot(host);
    }

    fn tic<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.poll_button(host);

        let start = Instant::now();
        self.inner.tic(host);
        let delta_ms = start.elapsed().as_secs_f64() * 1000.0;

        self.stats.record(delta_ms);
        tracing::trace!(frame = self.stats.frames, delta_ms, "tic");
    }
}
