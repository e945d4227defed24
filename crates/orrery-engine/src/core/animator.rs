//! Per-body orbital phase.
//!
//! Each body carries an independent phase counter starting at 0. Every tick
//! adds `base_rate * speed / period`. The static placement angle lives in the
//! layout and is never folded into the phase.

use glam::Vec3;

/// Position on a circular orbit of `radius` in the XZ plane.
/// Angles grow counter-clockwise seen from above (+Y).
pub fn orbit_point(radius: f32, angle: f64) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    Vec3::new(radius * cos as f32, 0.0, -radius * sin as f32)
}

/// Continuous phase state for every placed body, indexed like the layout.
#[derive(Debug, Clone)]
pub struct OrbitalAnimator {
    base_rate: f64,
    speed: f64,
    paused: bool,
    ticks: u64,
    rates: Vec<f64>,
    phases: Vec<f64>,
}

impl OrbitalAnimator {
    /// `periods` must already be normalized (finite and positive).
    pub fn new(periods: impl IntoIterator<Item = f64>, base_rate: f64) -> Self {
        let rates: Vec<f64> = periods.into_iter().map(|p| 1.0 / p).collect();
        let phases = vec![0.0; rates.len()];
        Self {
            base_rate,
            speed: 1.0,
            paused: false,
            ticks: 0,
            rates,
            phases,
        }
    }

    /// Advance every body by `ticks` ticks. A paused animator ignores this.
    pub fn step(&mut self, ticks: u32) {
        if self.paused || ticks == 0 {
            return;
        }
        let scale = self.base_rate * self.speed * ticks as f64;
        for (phase, rate) in self.phases.iter_mut().zip(&self.rates) {
            *phase += scale * rate;
        }
        self.ticks += ticks as u64;
    }

    /// Phase increment per tick for body `index`, in radians.
    pub fn angular_rate(&self, index: usize) -> Option<f64> {
        self.rates
            .get(index)
            .map(|rate| self.base_rate * self.speed * rate)
    }

    /// Current phase of body `index`, in radians. Not wrapped.
    pub fn phase(&self, index: usize) -> Option<f64> {
        self.phases.get(index).copied()
    }

    pub fn phases(&self) -> &[f64] {
        &self.phases
    }

    /// Ticks applied since creation, excluding paused frames.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Multiplier on the base rate. Negative and non-finite values are ignored.
    pub fn set_speed(&mut self, speed: f64) {
        if speed.is_finite() && speed >= 0.0 {
            self.speed = speed;
        } else {
            log::warn!("ignoring invalid animation speed {speed}");
        }
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn phases_start_at_zero() {
        let animator = OrbitalAnimator::new([11.19, 365.0], 0.01);
        assert_eq!(animator.phases(), &[0.0, 0.0]);
    }

    #[test]
    fn shorter_period_advances_faster() {
        let mut animator = OrbitalAnimator::new([10.0, 20.0], 0.01);
        animator.step(1);
        assert_relative_eq!(animator.phase(0).unwrap(), 0.001);
        assert_relative_eq!(animator.phase(1).unwrap(), 0.0005);
    }

    #[test]
    fn multiple_ticks_accumulate_linearly() {
        let mut animator = OrbitalAnimator::new([11.19], 0.01);
        animator.step(3);
        animator.step(2);
        assert_relative_eq!(animator.phase(0).unwrap(), 5.0 * 0.01 / 11.19, epsilon = 1e-12);
        assert_eq!(animator.ticks(), 5);
    }

    #[test]
    fn pause_freezes_phase() {
        let mut animator = OrbitalAnimator::new([1.0], 0.01);
        animator.set_paused(true);
        animator.step(10);
        assert_eq!(animator.phase(0), Some(0.0));
        animator.set_paused(false);
        animator.step(1);
        assert_relative_eq!(animator.phase(0).unwrap(), 0.01);
    }

    #[test]
    fn speed_scales_rate() {
        let mut animator = OrbitalAnimator::new([2.0], 0.01);
        animator.set_speed(4.0);
        assert_relative_eq!(animator.angular_rate(0).unwrap(), 0.02);
        animator.set_speed(f64::NAN);
        assert_eq!(animator.speed(), 4.0);
    }

    #[test]
    fn orbit_point_stays_on_circle() {
        let p = orbit_point(10.0, 1.234);
        assert_relative_eq!(p.length(), 10.0, epsilon = 1e-4);
        assert_eq!(p.y, 0.0);
        assert_relative_eq!(orbit_point(2.0, 0.0).x, 2.0);
        assert!(orbit_point(2.0, std::f64::consts::FRAC_PI_2).z < 0.0);
    }

    #[test]
    fn empty_animator_steps() {
        let mut animator = OrbitalAnimator::new(std::iter::empty(), 0.01);
        animator.step(5);
        assert!(animator.is_empty());
        assert_eq!(animator.phase(0), None);
    }
}
