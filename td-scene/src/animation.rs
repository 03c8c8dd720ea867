//! Eased open/close transitions advanced once per displayed frame.
//!
//! Progress advances by a fixed amount per tick, so real-world duration
//! depends on the display refresh rate.

use tracing::debug;

pub const PROGRESS_COMPLETE: f32 = 100.0;

/// Symmetric quadratic ease-in-out on `[0, 1]`.
pub fn ease(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        let u = 1.0 - t;
        1.0 - 2.0 * u * u
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Opening,
    Closing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EasedTransition {
    pub direction: Direction,
    pub running: bool,
    /// 0..=100.
    pub progress: f32,
    /// Progress added per tick.
    pub speed: f32,
    /// Start angle of each side, left then right.
    from: [f32; 2],
    to: f32,
}

impl EasedTransition {
    pub fn new(direction: Direction, speed: f32) -> Self {
        Self {
            direction,
            running: false,
            progress: 0.0,
            speed,
            from: [0.0; 2],
            to: 0.0,
        }
    }

    /// Begins easing both sides from their `current` angles toward `end`.
    pub fn start(&mut self, current: [f32; 2], end: f32) {
        self.running = true;
        self.progress = 0.0;
        self.from = current;
        self.to = end;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.progress = 0.0;
    }

    /// Advances one tick and returns the angles to apply, or `None` when idle.
    ///
    /// The final tick snaps both sides to the end value exactly.
    pub fn tick(&mut self) -> Option<[f32; 2]> {
        if !self.running {
            return None;
        }
        self.progress += self.speed;
        if self.progress >= PROGRESS_COMPLETE {
            self.stop();
            return Some([self.to; 2]);
        }
        let t = ease(self.progress / PROGRESS_COMPLETE);
        Some(self.from.map(|from| from + (self.to - from) * t))
    }
}

/// An opening transition and its closing counterpart; at most one runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionPair {
    name: &'static str,
    pub open: EasedTransition,
    pub close: EasedTransition,
    /// Angle a completed opening reaches.
    pub target: f32,
}

impl TransitionPair {
    pub fn new(name: &'static str, target: f32, speed: f32) -> Self {
        Self {
            name,
            open: EasedTransition::new(Direction::Opening, speed),
            close: EasedTransition::new(Direction::Closing, speed),
            target,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn start_open(&mut self, current: [f32; 2]) {
        self.close.stop();
        self.open.start(current, self.target);
        debug!(pair = self.name, from = ?current, to = self.target, "opening");
    }

    pub fn start_close(&mut self, current: [f32; 2]) {
        self.open.stop();
        self.close.start(current, 0.0);
        debug!(pair = self.name, from = ?current, "closing");
    }

    pub fn stop_open(&mut self) {
        if self.open.running {
            debug!(pair = self.name, progress = self.open.progress, "open stopped");
        }
        self.open.stop();
    }

    pub fn stop_close(&mut self) {
        if self.close.running {
            debug!(pair = self.name, progress = self.close.progress, "close stopped");
        }
        self.close.stop();
    }

    pub fn is_running(&self) -> bool {
        self.open.running || self.close.running
    }

    pub fn tick(&mut self) -> Option<[f32; 2]> {
        let angles = self.open.tick().or_else(|| self.close.tick());
        if angles.is_some() && !self.is_running() {
            debug!(pair = self.name, angles = ?angles, "transition finished");
        }
        angles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_fixed_points() {
        assert_eq!(ease(0.0), 0.0);
        assert_eq!(ease(0.5), 0.5);
        assert_eq!(ease(1.0), 1.0);
    }

    #[test]
    fn ease_is_monotonic() {
        let mut last = ease(0.0);
        for i in 1..=1000 {
            let v = ease(i as f32 / 1000.0);
            assert!(v >= last, "ease decreased at step {i}");
            last = v;
        }
    }

    #[test]
    fn ease_is_point_symmetric() {
        for i in 0..=100 {
            let t = i as f32 / 100.0;
            assert!((ease(t) + ease(1.0 - t) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn idle_transition_yields_nothing() {
        let mut t = EasedTransition::new(Direction::Opening, 5.0);
        assert_eq!(t.tick(), None);
        assert_eq!(t.progress, 0.0);
    }

    #[test]
    fn opening_follows_the_eased_curve() {
        let mut pair = TransitionPair::new("door", 80.0, 10.0);
        pair.start_open([0.0; 2]);
        let [left, right] = pair.tick().unwrap();
        assert!((left - 80.0 * ease(0.1)).abs() < 1e-5);
        assert_eq!(left, right);
        let [left, _] = pair.tick().unwrap();
        assert!((left - 80.0 * ease(0.2)).abs() < 1e-5);
    }

    #[test]
    fn closing_mirrors_the_curve_from_the_target() {
        let mut pair = TransitionPair::new("door", 80.0, 25.0);
        pair.start_close([80.0; 2]);
        let [left, _] = pair.tick().unwrap();
        assert!((left - 80.0 * (1.0 - ease(0.25))).abs() < 1e-4);
    }

    #[test]
    fn each_side_eases_from_its_own_start() {
        let mut pair = TransitionPair::new("door", 75.0, 10.0);
        pair.start_close([10.0, 70.0]);
        let [left, right] = pair.tick().unwrap();
        assert!((left - 10.0 * (1.0 - ease(0.1))).abs() < 1e-4);
        assert!((right - 70.0 * (1.0 - ease(0.1))).abs() < 1e-4);
    }

    #[test]
    fn starting_one_side_stops_the_other() {
        let mut pair = TransitionPair::new("glass", 30.0, 2.0);
        pair.start_open([0.0; 2]);
        assert!(pair.open.running);
        pair.start_close([10.0; 2]);
        assert!(!pair.open.running);
        assert!(pair.close.running);
        assert_eq!(pair.close.progress, 0.0);
    }

    #[test]
    fn completion_resets_progress_and_goes_idle() {
        let mut pair = TransitionPair::new("door", 75.0, 30.0);
        pair.start_open([0.0, 20.0]);
        let mut last = None;
        while pair.is_running() {
            last = pair.tick();
        }
        assert_eq!(last, Some([75.0; 2]));
        assert_eq!(pair.open.progress, 0.0);
        assert_eq!(pair.tick(), None);
    }

    #[test]
    fn stop_freezes_progress_at_idle() {
        let mut pair = TransitionPair::new("door", 75.0, 1.0);
        pair.start_open([0.0; 2]);
        for _ in 0..10 {
            pair.tick();
        }
        pair.stop_open();
        assert!(!pair.is_running());
        assert_eq!(pair.tick(), None);
    }
}
