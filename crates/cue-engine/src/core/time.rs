/// Frame clock for variable-timestep simulation.
///
/// The core integrates with whatever `dt` it is handed; the host runs every
/// wall-clock delta through here first so the simulation never sees a negative
/// or runaway step (tab switches, debugger pauses).
pub struct FrameClock {
    /// Largest step handed to the simulation.
    max_dt: f32,
    /// Total simulated time.
    elapsed: f32,
    frames: u64,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            max_dt,
            elapsed: 0.0,
            frames: 0,
        }
    }

    /// Clamp a raw frame delta to `[0, max_dt]` and record the frame.
    /// NaN deltas count as zero.
    pub fn tick(&mut self, frame_dt: f32) -> f32 {
        let dt = if frame_dt.is_nan() {
            0.0
        } else {
            frame_dt.clamp(0.0, self.max_dt)
        };
        self.elapsed += dt;
        self.frames += 1;
        dt
    }

    /// Simulated seconds since start.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Number of ticks so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn max_dt(&self) -> f32 {
        self.max_dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_frame_passes_through() {
        let mut clock = FrameClock::new(0.1);
        assert_eq!(clock.tick(1.0 / 60.0), 1.0 / 60.0);
        assert_eq!(clock.frames(), 1);
    }

    #[test]
    fn long_frame_is_capped() {
        let mut clock = FrameClock::new(0.1);
        assert_eq!(clock.tick(3.0), 0.1);
    }

    #[test]
    fn negative_and_nan_become_zero() {
        let mut clock = FrameClock::new(0.1);
        assert_eq!(clock.tick(-0.5), 0.0);
        assert_eq!(clock.tick(f32::NAN), 0.0);
        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(clock.frames(), 2);
    }

    #[test]
    fn elapsed_accumulates_clamped_time() {
        let mut clock = FrameClock::new(0.1);
        clock.tick(0.05);
        clock.tick(5.0);
        assert!((clock.elapsed() - 0.15).abs() < 1e-6, "elapsed was {}", clock.elapsed());
    }
}
