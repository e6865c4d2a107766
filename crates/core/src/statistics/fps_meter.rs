use std::time::Instant;

/// Average frame rate since the meter was started or last reset.
#[derive(Debug, Clone)]
pub struct FpsMeter {
    frames: u64,
    started: Instant,
}

impl FpsMeter {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(started: Instant) -> Self {
        Self { frames: 0, started }
    }

    /// Count one frame and return the updated rate.
    pub fn tick(&mut self) -> f64 {
        self.frames += 1;
        self.fps()
    }

    pub fn fps(&self) -> f64 {
        self.fps_at(Instant::now())
    }

    /// Rate as of `now`. The small constant keeps the first frame finite.
    pub fn fps_at(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.started).as_secs_f64();
        self.frames as f64 / (elapsed + 0.001)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn reset(&mut self) {
        self.frames = 0;
        self.started = Instant::now();
    }
}

impl Default for FpsMeter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::time::Duration;

    #[test]
    fn test_rate_over_elapsed_time() {
        let start = Instant::now();
        let mut meter = FpsMeter::starting_at(start);
        for _ in 0..30 {
            meter.tick();
        }
        let fps = meter.fps_at(start + Duration::from_secs(1));
        assert_relative_eq!(fps, 30.0 / 1.001, epsilon = 1e-9);
    }

    #[test]
    fn test_no_frames_is_zero() {
        let meter = FpsMeter::new();
        assert_eq!(meter.fps(), 0.0);
    }

    #[test]
    fn test_first_frame_is_finite() {
        let start = Instant::now();
        let mut meter = FpsMeter::starting_at(start);
        meter.tick();
        assert_relative_eq!(meter.fps_at(start), 1000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_reset_clears_frames() {
        let mut meter = FpsMeter::new();
        meter.tick();
        meter.tick();
        meter.reset();
        assert_eq!(meter.frames(), 0);
    }
}
