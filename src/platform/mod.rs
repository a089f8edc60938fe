//! Platform abstraction layer
//!
//! Turns variable browser frame deltas into whole simulation ticks and keeps
//! the rolling FPS figure shown in the HUD.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Fixed-timestep accumulator
#[derive(Debug, Clone, Default)]
pub struct FrameDriver {
    accumulator: f32,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame's elapsed seconds; returns how many ticks to run
    ///
    /// Deltas are clamped to `MAX_FRAME_DT` and at most `MAX_SUBSTEPS` ticks
    /// are released per frame. Time beyond the cap is dropped rather than
    /// carried, so a stalled tab does not fast-forward on return.
    pub fn pump(&mut self, dt: f32) -> u32 {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    /// Forget pending time (restart, tab becoming visible again)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    pub fn pending(&self) -> f32 {
        self.accumulator
    }
}

/// Rolling frames-per-second over the last 60 frame timestamps
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; 60],
    frame_index: usize,
    fps: f32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0.0,
        }
    }
}

impl FpsCounter {
    /// Record a frame timestamp in milliseconds
    pub fn record(&mut self, time_ms: f64) {
        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();

        // Oldest sample sits at the slot we are about to overwrite next
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 && time_ms > oldest {
            let elapsed = (time_ms - oldest) / 1000.0;
            self.fps = ((self.frame_times.len() - 1) as f64 / elapsed) as f32;
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_tick_per_display_frame() {
        let mut driver = FrameDriver::new();
        let mut ticks = 0;
        for _ in 0..60 {
            ticks += driver.pump(SIM_DT + 1e-6);
        }
        assert_eq!(ticks, 60);
    }

    #[test]
    fn test_short_frames_accumulate() {
        let mut driver = FrameDriver::new();
        assert_eq!(driver.pump(SIM_DT * 0.6), 0);
        assert_eq!(driver.pump(SIM_DT * 0.6), 1);
        assert!(driver.pending() < SIM_DT);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut driver = FrameDriver::new();
        assert_eq!(driver.pump(5.0), MAX_SUBSTEPS);
        assert!(driver.pending() <= SIM_DT);
        // The backlog does not leak into following frames
        assert!(driver.pump(0.0) <= 1);
    }

    #[test]
    fn test_bad_deltas_ignored() {
        let mut driver = FrameDriver::new();
        assert_eq!(driver.pump(-1.0), 0);
        assert_eq!(driver.pump(f32::NAN), 0);
        assert_eq!(driver.pending(), 0.0);
    }

    #[test]
    fn test_reset_drops_pending() {
        let mut driver = FrameDriver::new();
        driver.pump(SIM_DT * 0.5);
        driver.reset();
        assert_eq!(driver.pending(), 0.0);
    }

    #[test]
    fn test_fps_counter() {
        let mut fps = FpsCounter::default();
        for i in 0..120 {
            fps.record(1000.0 + i as f64 * 1000.0 / 60.0);
        }
        assert!((fps.fps() - 60.0).abs() < 0.5);
    }
}
