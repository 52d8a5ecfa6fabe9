//! Substitution and fatigue tracking.
//!
//! A stint is a maximal run of events sharing one roster signature within a
//! period. Period boundaries reset the stint clock without counting as a
//! substitution, since rosters legitimately reset context between periods.

use crate::play_log::PlayEvent;

/// Stint position for one event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FatigueState {
    /// Running stint counter within the game.
    pub stint_index: u32,
    /// Play seconds since the active roster last changed, scoped to
    /// (game, period, stint).
    pub seconds_since_sub: f64,
}

/// Per-game tracker. Feed events in canonical order with their resolved
/// canonical lineups.
pub struct FatigueTracker {
    prev_signature: Option<(Vec<i64>, Vec<i64>)>,
    stint_start_remaining: f64,
    stint_index: u32,
    period: u8,
}

impl Default for FatigueTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl FatigueTracker {
    pub fn new() -> Self {
        Self {
            prev_signature: None,
            stint_start_remaining: 0.0,
            stint_index: 0,
            period: 0,
        }
    }

    pub fn advance(&mut self, event: &PlayEvent, home: &[i64], away: &[i64]) -> FatigueState {
        let signature_changed = self
            .prev_signature
            .as_ref()
            .is_some_and(|(h, a)| h.as_slice() != home || a.as_slice() != away);

        if event.period != self.period {
            self.period = event.period;
            self.stint_start_remaining = event.seconds_remaining;
        } else if signature_changed {
            self.stint_index += 1;
            self.stint_start_remaining = event.seconds_remaining;
        }

        self.prev_signature = Some((home.to_vec(), away.to_vec()));

        FatigueState {
            stint_index: self.stint_index,
            seconds_since_sub: (self.stint_start_remaining - event.seconds_remaining).max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(period: u8, secs: f64) -> PlayEvent {
        PlayEvent {
            period,
            seconds_remaining: secs,
            ..PlayEvent::default()
        }
    }

    const LINEUP_A: [i64; 5] = [1, 2, 3, 4, 5];
    const LINEUP_B: [i64; 5] = [1, 2, 3, 4, 6];
    const AWAY: [i64; 5] = [11, 12, 13, 14, 15];

    #[test]
    fn time_accumulates_within_a_stint() {
        let mut tracker = FatigueTracker::new();
        let first = tracker.advance(&event(1, 720.0), &LINEUP_A, &AWAY);
        assert_eq!(first.seconds_since_sub, 0.0);

        let later = tracker.advance(&event(1, 600.0), &LINEUP_A, &AWAY);
        assert_eq!(later.stint_index, 0);
        assert_eq!(later.seconds_since_sub, 120.0);
    }

    #[test]
    fn roster_change_starts_a_new_stint() {
        let mut tracker = FatigueTracker::new();
        tracker.advance(&event(1, 720.0), &LINEUP_A, &AWAY);
        tracker.advance(&event(1, 650.0), &LINEUP_A, &AWAY);

        let state = tracker.advance(&event(1, 640.0), &LINEUP_B, &AWAY);
        assert_eq!(state.stint_index, 1);
        assert_eq!(state.seconds_since_sub, 0.0);

        let state = tracker.advance(&event(1, 610.0), &LINEUP_B, &AWAY);
        assert_eq!(state.seconds_since_sub, 30.0);
    }

    #[test]
    fn period_boundary_is_not_a_substitution() {
        let mut tracker = FatigueTracker::new();
        tracker.advance(&event(1, 720.0), &LINEUP_A, &AWAY);
        tracker.advance(&event(1, 10.0), &LINEUP_A, &AWAY);

        // same roster across the break: stint index holds, clock restarts
        let state = tracker.advance(&event(2, 720.0), &LINEUP_A, &AWAY);
        assert_eq!(state.stint_index, 0);
        assert_eq!(state.seconds_since_sub, 0.0);

        // a genuinely new lineup at the period start is also not counted
        let mut tracker = FatigueTracker::new();
        tracker.advance(&event(1, 720.0), &LINEUP_A, &AWAY);
        let state = tracker.advance(&event(2, 720.0), &LINEUP_B, &AWAY);
        assert_eq!(state.stint_index, 0);
    }

    #[test]
    fn never_negative_on_clock_noise() {
        let mut tracker = FatigueTracker::new();
        tracker.advance(&event(1, 600.0), &LINEUP_A, &AWAY);
        let state = tracker.advance(&event(1, 650.0), &LINEUP_A, &AWAY);
        assert_eq!(state.seconds_since_sub, 0.0);
    }
}
