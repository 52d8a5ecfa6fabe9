//! Timeline normalization.
//!
//! The provider logs the period clock in at least two encodings
//! (`PT<m>M<s>S` and `<m>:<s>`), and event rows arrive in no guaranteed
//! order. This module produces the canonical within-game order and maps
//! period clocks onto a single absolute elapsed-seconds axis so events can
//! be aligned against rotation intervals.

use std::cmp::Ordering;

use crate::game_data::{
    OVERTIME_PERIOD_SECS, REGULATION_PERIOD_SECS, REGULATION_PERIODS,
};
use crate::play_log::PlayEvent;

/// Parse clock text into seconds remaining in the period.
///
/// Malformed input fails soft to 0.0: a broken clock must never abort the
/// reconstruction pass.
pub fn parse_clock(raw: &str) -> f64 {
    parse_clock_opt(raw.trim()).unwrap_or(0.0)
}

fn parse_clock_opt(s: &str) -> Option<f64> {
    if s.is_empty() {
        return None;
    }
    // "PT11M30.00S"
    if let Some(m_pos) = s.find(['M', 'm']) {
        let mins = s[..m_pos].trim_start_matches("PT").trim_start_matches("pt");
        let secs = s[m_pos + 1..].trim_end_matches(['S', 's']);
        let mins: f64 = mins.parse().ok()?;
        let secs: f64 = secs.parse().ok()?;
        return Some(mins * 60.0 + secs);
    }
    // "11:30"
    if let Some(colon) = s.find(':') {
        let mins: f64 = s[..colon].parse().ok()?;
        let secs: f64 = s[colon + 1..].parse().ok()?;
        return Some(mins * 60.0 + secs);
    }
    // bare seconds
    s.parse().ok()
}

/// Length of a period in seconds: regulation periods are full length,
/// overtime periods are shorter.
pub fn period_length_secs(period: u8) -> f64 {
    if period <= REGULATION_PERIODS {
        REGULATION_PERIOD_SECS
    } else {
        OVERTIME_PERIOD_SECS
    }
}

/// Absolute seconds elapsed since the opening tip.
///
/// This is the axis rotation intervals are recorded on, so tier-1 lookups
/// depend on it being exact.
pub fn elapsed_seconds(period: u8, seconds_remaining: f64) -> f64 {
    let done = period.saturating_sub(1);
    let regulation_done = done.min(REGULATION_PERIODS) as f64;
    let overtime_done = done.saturating_sub(REGULATION_PERIODS) as f64;
    regulation_done * REGULATION_PERIOD_SECS
        + overtime_done * OVERTIME_PERIOD_SECS
        + (period_length_secs(period) - seconds_remaining)
}

/// Sort a game's events into canonical order:
/// (period ascending, seconds remaining descending, sequence ascending).
pub fn sort_canonical(events: &mut [PlayEvent]) {
    events.sort_by(|a, b| {
        a.period
            .cmp(&b.period)
            .then_with(|| {
                b.seconds_remaining
                    .partial_cmp(&a.seconds_remaining)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| a.order.cmp(&b.order))
    });
}
