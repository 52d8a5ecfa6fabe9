//! Possession segmentation and shot-clock estimation.
//!
//! A phase boundary is declared deterministically at any defensive rebound,
//! turnover, or made shot; the shot clock is the phase ceiling minus the
//! play time elapsed since the phase opened. An offensive rebound restarts
//! the clock at the short ceiling without opening a new phase.

use crate::game_data::{SHOT_CLOCK_FULL_SECS, SHOT_CLOCK_SHORT_SECS};
use crate::play_log::{EventKind, PlayEvent, ShotResult};

/// Phase id and clock estimate for one event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseState {
    /// Running count of boundaries crossed so far in the game.
    pub possession_id: u32,
    /// Estimated seconds left on the shot clock, clamped at zero.
    pub shot_clock: f64,
}

/// Per-game segmenter state. Feed events in canonical order only.
pub struct PossessionTracker {
    phase_id: u32,
    ceiling: f64,
    phase_start_remaining: f64,
    period: u8,
    prev_total_score: Option<i32>,
    started: bool,
}

impl Default for PossessionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PossessionTracker {
    pub fn new() -> Self {
        Self {
            phase_id: 0,
            ceiling: SHOT_CLOCK_FULL_SECS,
            phase_start_remaining: 0.0,
            period: 0,
            prev_total_score: None,
            started: false,
        }
    }

    /// Advance past one event. `filled_total_score` is the forward-filled
    /// combined score, used to infer made shots when the explicit result
    /// field is absent.
    pub fn advance(&mut self, event: &PlayEvent, filled_total_score: i32) -> PhaseState {
        if event.period != self.period {
            // the inbound after a period break starts a fresh possession
            self.period = event.period;
            if self.started {
                self.phase_id += 1;
            } else {
                self.started = true;
            }
            self.reset_clock(event.seconds_remaining, SHOT_CLOCK_FULL_SECS);
        } else if self.is_boundary(event, filled_total_score) {
            self.phase_id += 1;
            self.reset_clock(event.seconds_remaining, SHOT_CLOCK_FULL_SECS);
        } else if event.is_offensive_rebound() {
            // same phase, shorter ceiling from here on
            self.reset_clock(event.seconds_remaining, SHOT_CLOCK_SHORT_SECS);
        }

        let elapsed_in_phase = (self.phase_start_remaining - event.seconds_remaining).max(0.0);
        let shot_clock = (self.ceiling - elapsed_in_phase).max(0.0);
        self.prev_total_score = Some(filled_total_score);

        PhaseState {
            possession_id: self.phase_id,
            shot_clock,
        }
    }

    fn reset_clock(&mut self, seconds_remaining: f64, ceiling: f64) {
        self.phase_start_remaining = seconds_remaining;
        self.ceiling = ceiling;
    }

    fn is_boundary(&self, event: &PlayEvent, filled_total_score: i32) -> bool {
        match event.kind {
            EventKind::Turnover => true,
            EventKind::Rebound => event.is_defensive_rebound(),
            EventKind::Shot => match event.shot_result {
                Some(ShotResult::Made) => true,
                Some(ShotResult::Missed) => false,
                None => self
                    .prev_total_score
                    .is_some_and(|prev| filled_total_score > prev),
            },
            _ => false,
        }
    }
}
