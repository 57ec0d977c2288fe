//! Rate limiting for detection-triggered submissions.

use std::time::{Duration, Instant};

/// Admits at most one trigger per cooldown window.
///
/// The caller supplies the current [`Instant`] so the gate never reads the
/// clock itself. A trigger only counts once [`CooldownGate::mark`] is
/// called, so a failed submission can be retried on the next detection.
#[derive(Debug, Clone)]
pub struct CooldownGate {
    window: Duration,
    last: Option<Instant>,
}

impl CooldownGate {
    /// Create a gate that has never fired.
    pub const fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    /// Whether a trigger at `now` would be admitted.
    pub fn is_ready(&self, now: Instant) -> bool {
        self.last
            .is_none_or(|last| now.saturating_duration_since(last) >= self.window)
    }

    /// Record a trigger at `now`.
    pub const fn mark(&mut self, now: Instant) {
        self.last = Some(now);
    }

    /// Time left before the next trigger is admitted.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.last.map_or(Duration::ZERO, |last| {
            self.window
                .saturating_sub(now.saturating_duration_since(last))
        })
    }
}

#[cfg(test)]
#[allow(clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(10);

    #[test]
    fn fresh_gate_is_ready() {
        let gate = CooldownGate::new(WINDOW);
        let now = Instant::now();
        assert!(gate.is_ready(now));
        assert_eq!(gate.remaining(now), Duration::ZERO);
    }

    #[test]
    fn blocks_inside_window() {
        let mut gate = CooldownGate::new(WINDOW);
        let start = Instant::now();
        gate.mark(start);

        let later = start + Duration::from_secs(4);
        assert!(!gate.is_ready(later));
        assert_eq!(gate.remaining(later), Duration::from_secs(6));
    }

    #[test]
    fn reopens_at_window_boundary() {
        let mut gate = CooldownGate::new(WINDOW);
        let start = Instant::now();
        gate.mark(start);

        assert!(gate.is_ready(start + WINDOW));
        assert!(gate.is_ready(start + WINDOW + Duration::from_secs(1)));
    }

    #[test]
    fn unmarked_detections_do_not_start_cooldown() {
        let gate = CooldownGate::new(WINDOW);
        let start = Instant::now();
        assert!(gate.is_ready(start));
        assert!(gate.is_ready(start + Duration::from_millis(1)));
    }

    #[test]
    fn mark_restarts_window() {
        let mut gate = CooldownGate::new(WINDOW);
        let start = Instant::now();
        gate.mark(start);
        let second = start + WINDOW;
        gate.mark(second);
        assert!(!gate.is_ready(second + Duration::from_secs(9)));
    }
}
