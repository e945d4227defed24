use crate::api::config::TickMode;

/// Most ticks a single frame may produce.
const MAX_STEPS_PER_FRAME: u32 = 10;

/// Fixed timestep accumulator.
/// Keeps animation advancing at a constant rate regardless of frame time.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 1.0 / 60.0 };
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt;
        }
        // Cap to prevent spiral of death after a long stall (hidden tab)
        self.accumulator = self.accumulator.min(self.dt * MAX_STEPS_PER_FRAME as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Turns host frames into animation ticks according to a [`TickMode`].
#[derive(Debug, Clone)]
pub enum TickClock {
    PerFrame,
    Fixed(FixedTimestep),
}

impl TickClock {
    pub fn new(mode: TickMode) -> Self {
        match mode {
            TickMode::PerFrame => TickClock::PerFrame,
            TickMode::FixedStep { dt } => TickClock::Fixed(FixedTimestep::new(dt)),
        }
    }

    /// Number of ticks the frame that just elapsed is worth.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        match self {
            TickClock::PerFrame => 1,
            TickClock::Fixed(ts) => ts.accumulate(frame_dt),
        }
    }

    /// Drop partial progress, e.g. when resuming from pause.
    pub fn reset(&mut self) {
        if let TickClock::Fixed(ts) = self {
            ts.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        let steps = ts.accumulate(1.0 / 60.0);
        assert_eq!(steps, 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        let steps = ts.accumulate(0.008); // half a frame
        assert_eq!(steps, 0);
        let steps = ts.accumulate(0.010); // over one frame total
        assert_eq!(steps, 1);
    }

    #[test]
    fn caps_at_ten_steps() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        let steps = ts.accumulate(1.0);
        assert_eq!(steps, 10);
    }

    #[test]
    fn ignores_negative_and_nan_frames() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(-1.0), 0);
        assert_eq!(ts.accumulate(f32::NAN), 0);
        assert_eq!(ts.accumulate(1.0 / 60.0), 1);
    }

    #[test]
    fn invalid_dt_falls_back() {
        let ts = FixedTimestep::new(0.0);
        assert!((ts.dt() - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn per_frame_clock_ignores_delta() {
        let mut clock = TickClock::new(TickMode::PerFrame);
        assert_eq!(clock.advance(0.001), 1);
        assert_eq!(clock.advance(0.5), 1);
    }

    #[test]
    fn fixed_clock_is_refresh_rate_independent() {
        let mut at_60 = TickClock::new(TickMode::FixedStep { dt: 1.0 / 60.0 });
        let mut at_120 = TickClock::new(TickMode::FixedStep { dt: 1.0 / 60.0 });
        let ticks_60: u32 = (0..60).map(|_| at_60.advance(1.0 / 60.0)).sum();
        let ticks_120: u32 = (0..120).map(|_| at_120.advance(1.0 / 120.0)).sum();
        assert!((ticks_60 as i32 - 60).abs() <= 1, "ticks_60 = {ticks_60}");
        assert!((ticks_120 as i32 - 60).abs() <= 1, "ticks_120 = {ticks_120}");
    }
}
