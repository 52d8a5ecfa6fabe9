//! Invariant validation over a reconstructed game.
//!
//! The battery runs as one pass, every check independently pass/fail, all
//! of them non-fatal: the report is surfaced to the operator but never
//! blocks writing output.

mod checks;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::lineup::{Confidence, MatchContext};
use crate::play_log::PlayEvent;
use crate::reconstruct::ResolvedState;

/// Outcome of one check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub name: &'static str,
    pub passed: bool,
    pub detail: String,
}

impl CheckResult {
    pub fn pass(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            passed: true,
            detail: detail.into(),
        }
    }

    pub fn fail(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            passed: false,
            detail: detail.into(),
        }
    }
}

/// Structured per-game validation report.
#[derive(Debug, Clone, Serialize)]
pub struct GameReport {
    pub game_id: String,
    pub generated_at: DateTime<Utc>,
    pub events: usize,
    /// Fraction of events with exactly 5v5 resolved, in percent.
    pub completeness_pct: f64,
    /// Fraction of events resolved from the authoritative source, in percent.
    pub authoritative_pct: f64,
    pub checks: Vec<CheckResult>,
}

impl GameReport {
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn failed_checks(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

/// Run the full battery over one reconstructed game.
///
/// `events` and `states` must be parallel sequences in canonical order,
/// exactly as `reconstruct_game` returns them.
pub fn run_checks(game_id: &str, events: &[PlayEvent], states: &[ResolvedState]) -> GameReport {
    let ctx = MatchContext::build(events);

    let complete = states.iter().filter(|s| s.is_complete()).count();
    let authoritative = states
        .iter()
        .filter(|s| s.confidence == Confidence::Authoritative)
        .count();
    let denom = states.len().max(1) as f64;

    let checks = vec![
        checks::lineup_completeness(states),
        checks::cross_side_overlap(states),
        checks::inventory_bounds(states),
        checks::short_ceiling_rule(events, states),
        checks::counters_monotone(states),
        checks::stagnant_lineup(states),
        checks::timeout_plausibility(events, &ctx),
        checks::periods_complete(events),
        checks::score_jumps(states),
        checks::missing_values(events),
        checks::reliability(states),
    ];

    GameReport {
        game_id: game_id.to_string(),
        generated_at: Utc::now(),
        events: states.len(),
        completeness_pct: 100.0 * complete as f64 / denom,
        authoritative_pct: 100.0 * authoritative as f64 / denom,
        checks,
    }
}

/// Season-level aggregate of per-game reports.
#[derive(Debug, Clone, Serialize)]
pub struct SeasonSummary {
    pub games: usize,
    pub games_passed: usize,
    pub mean_completeness_pct: f64,
    pub mean_authoritative_pct: f64,
}

impl SeasonSummary {
    pub fn from_reports<'a, I: IntoIterator<Item = &'a GameReport>>(reports: I) -> Self {
        let mut games = 0usize;
        let mut games_passed = 0usize;
        let mut completeness = 0.0;
        let mut authoritative = 0.0;
        for report in reports {
            games += 1;
            if report.passed() {
                games_passed += 1;
            }
            completeness += report.completeness_pct;
            authoritative += report.authoritative_pct;
        }
        let denom = games.max(1) as f64;
        Self {
            games,
            games_passed,
            mean_completeness_pct: completeness / denom,
            mean_authoritative_pct: authoritative / denom,
        }
    }
}
