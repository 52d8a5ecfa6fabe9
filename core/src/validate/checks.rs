//! The individual invariant checks.
//!
//! Each check is isolated and pass/fail on its own; none of them aborts
//! anything. Failure details carry enough context to chase the offending
//! rows by hand.

use hashbrown::HashMap;

use super::CheckResult;
use crate::game_data::{INITIAL_TIMEOUTS, SHOT_CLOCK_SHORT_SECS};
use crate::lineup::{Confidence, MatchContext, timeout_side};
use crate::play_log::{EventKind, PlayEvent};
use crate::reconstruct::ResolvedState;

/// Tolerance on the short-ceiling rule; clock arithmetic is float.
const SHORT_CEILING_TOLERANCE: f64 = 0.1;
/// Sane bounds on recognized timeouts for a full game.
const MIN_TIMEOUTS_PER_GAME: usize = 7;
const MAX_TIMEOUTS_PER_GAME: usize = 30;
/// Combined points one event can plausibly add.
const MAX_SCORE_JUMP: i32 = 4;
/// Fewer signature changes than this over a whole game means the
/// resolution failed, not that nobody substituted.
const MIN_ROSTER_CHANGES: usize = 2;

pub fn lineup_completeness(states: &[ResolvedState]) -> CheckResult {
    let incomplete = states.iter().filter(|s| !s.is_complete()).count();
    if incomplete == 0 {
        CheckResult::pass("lineup_completeness", "exactly 5v5 on every event")
    } else {
        let pct = 100.0 * incomplete as f64 / states.len().max(1) as f64;
        CheckResult::fail(
            "lineup_completeness",
            format!(
                "{incomplete} events ({pct:.1}%) short of 5v5; common in the warm-up window before the first resolvable signal"
            ),
        )
    }
}

pub fn cross_side_overlap(states: &[ResolvedState]) -> CheckResult {
    let overlapping = states
        .iter()
        .filter(|s| {
            s.home_lineup
                .iter()
                .any(|id| s.away_lineup.binary_search(id).is_ok())
        })
        .count();
    if overlapping == 0 {
        CheckResult::pass("cross_side_overlap", "no player on both lineups")
    } else {
        CheckResult::fail(
            "cross_side_overlap",
            format!("{overlapping} events list a player on both sides"),
        )
    }
}

pub fn inventory_bounds(states: &[ResolvedState]) -> CheckResult {
    let out_of_bounds = states
        .iter()
        .filter(|s| {
            s.inventory.home.timeouts_remaining > INITIAL_TIMEOUTS
                || s.inventory.away.timeouts_remaining > INITIAL_TIMEOUTS
        })
        .count();
    if out_of_bounds == 0 {
        CheckResult::pass(
            "inventory_bounds",
            format!("timeout stocks within [0, {INITIAL_TIMEOUTS}]"),
        )
    } else {
        CheckResult::fail(
            "inventory_bounds",
            format!("{out_of_bounds} events with a stock outside [0, {INITIAL_TIMEOUTS}]"),
        )
    }
}

/// The short-ceiling rule, checked independently of the segmenter: every
/// event carrying an offensive-rebound attribution must sit at or below
/// the short ceiling.
pub fn short_ceiling_rule(events: &[PlayEvent], states: &[ResolvedState]) -> CheckResult {
    let mut violations = 0usize;
    let mut worst: f64 = 0.0;
    for (event, state) in events.iter().zip(states) {
        if event.stats.rebounds_off > 0
            && state.shot_clock > SHOT_CLOCK_SHORT_SECS + SHORT_CEILING_TOLERANCE
        {
            violations += 1;
            worst = worst.max(state.shot_clock);
        }
    }
    if violations == 0 {
        CheckResult::pass(
            "short_ceiling_rule",
            format!("clock capped at {SHOT_CLOCK_SHORT_SECS}s after every offensive rebound"),
        )
    } else {
        CheckResult::fail(
            "short_ceiling_rule",
            format!("{violations} offensive rebounds above the short ceiling (worst {worst:.1}s)"),
        )
    }
}

pub fn counters_monotone(states: &[ResolvedState]) -> CheckResult {
    let mut regressions = 0usize;
    for pair in states.windows(2) {
        let (prev, next) = (&pair[0].inventory, &pair[1].inventory);
        let non_decreasing = next.home.totals.points >= prev.home.totals.points
            && next.away.totals.points >= prev.away.totals.points
            && next.home.totals.fouls >= prev.home.totals.fouls
            && next.away.totals.fouls >= prev.away.totals.fouls
            && next.home.totals.rebounds >= prev.home.totals.rebounds
            && next.away.totals.rebounds >= prev.away.totals.rebounds
            && next.home.totals.turnovers >= prev.home.totals.turnovers
            && next.away.totals.turnovers >= prev.away.totals.turnovers;
        let timeouts_non_increasing = next.home.timeouts_remaining <= prev.home.timeouts_remaining
            && next.away.timeouts_remaining <= prev.away.timeouts_remaining;
        if !non_decreasing || !timeouts_non_increasing {
            regressions += 1;
        }
    }
    if regressions == 0 {
        CheckResult::pass("counters_monotone", "cumulative totals never regress")
    } else {
        CheckResult::fail(
            "counters_monotone",
            format!("{regressions} adjacent pairs with a regressing counter"),
        )
    }
}

/// A game whose signature changes fewer than a couple of times is almost
/// certainly a resolution failure, not real basketball.
pub fn stagnant_lineup(states: &[ResolvedState]) -> CheckResult {
    let mut changes = 0usize;
    for pair in states.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        // period boundaries never count as substitutions
        if next.period == prev.period
            && (next.home_lineup != prev.home_lineup || next.away_lineup != prev.away_lineup)
        {
            changes += 1;
        }
    }
    if changes >= MIN_ROSTER_CHANGES {
        CheckResult::pass(
            "stagnant_lineup",
            format!("{changes} roster changes observed"),
        )
    } else {
        CheckResult::fail(
            "stagnant_lineup",
            format!("only {changes} roster changes across the whole game"),
        )
    }
}

/// Validation-only cross-checks on timeout recognition: plausible count
/// per game and no orphaned (unattributable) timeouts.
pub fn timeout_plausibility(events: &[PlayEvent], ctx: &MatchContext) -> CheckResult {
    let timeouts: Vec<&PlayEvent> = events
        .iter()
        .filter(|e| e.kind == EventKind::Timeout)
        .collect();
    let orphaned = timeouts
        .iter()
        .filter(|e| timeout_side(e, ctx).is_none())
        .count();

    if timeouts.len() < MIN_TIMEOUTS_PER_GAME {
        CheckResult::fail(
            "timeout_plausibility",
            format!("only {} recognized timeouts", timeouts.len()),
        )
    } else if timeouts.len() > MAX_TIMEOUTS_PER_GAME {
        CheckResult::fail(
            "timeout_plausibility",
            format!("{} recognized timeouts (duplicates?)", timeouts.len()),
        )
    } else if orphaned > 0 {
        CheckResult::fail(
            "timeout_plausibility",
            format!("{orphaned} timeouts with no attributable team"),
        )
    } else {
        CheckResult::pass(
            "timeout_plausibility",
            format!("{} timeouts, all attributed", timeouts.len()),
        )
    }
}

pub fn periods_complete(events: &[PlayEvent]) -> CheckResult {
    let mut seen = [false; 4];
    for event in events {
        if (1..=4).contains(&event.period) {
            seen[event.period as usize - 1] = true;
        }
    }
    if seen.iter().all(|&s| s) {
        CheckResult::pass("periods_complete", "all four regulation periods present")
    } else {
        let missing: Vec<String> = seen
            .iter()
            .enumerate()
            .filter(|(_, s)| !**s)
            .map(|(i, _)| (i + 1).to_string())
            .collect();
        CheckResult::fail(
            "periods_complete",
            format!("missing periods: {}", missing.join(", ")),
        )
    }
}

pub fn score_jumps(states: &[ResolvedState]) -> CheckResult {
    let mut impossible = 0usize;
    for pair in states.windows(2) {
        let prev = pair[0].score_home + pair[0].score_away;
        let next = pair[1].score_home + pair[1].score_away;
        if next - prev > MAX_SCORE_JUMP {
            impossible += 1;
        }
    }
    if impossible == 0 {
        CheckResult::pass("score_jumps", "no impossible score jumps")
    } else {
        CheckResult::fail(
            "score_jumps",
            format!("{impossible} events adding more than {MAX_SCORE_JUMP} combined points"),
        )
    }
}

/// Missing-value diagnostics: event kinds that should always carry an
/// acting player but mostly don't point at broken source columns.
pub fn missing_values(events: &[PlayEvent]) -> CheckResult {
    let actor_kinds = [
        EventKind::Shot,
        EventKind::Rebound,
        EventKind::Turnover,
        EventKind::Foul,
        EventKind::Substitution,
    ];
    let mut by_kind: HashMap<EventKind, (usize, usize)> = HashMap::new();
    for event in events {
        if actor_kinds.contains(&event.kind) {
            let entry = by_kind.entry(event.kind).or_default();
            entry.0 += 1;
            if event.player_id.is_none() {
                entry.1 += 1;
            }
        }
    }

    let mut broken: Vec<String> = by_kind
        .iter()
        .filter(|(_, (total, missing))| *total > 0 && *missing * 2 > *total)
        .map(|(kind, (total, missing))| format!("{}: {missing}/{total} missing actor", kind.as_str()))
        .collect();
    broken.sort();

    if broken.is_empty() {
        CheckResult::pass("missing_values", "actor ids present where expected")
    } else {
        CheckResult::fail("missing_values", broken.join("; "))
    }
}

/// Report-only: share of events resolved from the authoritative source.
pub fn reliability(states: &[ResolvedState]) -> CheckResult {
    let authoritative = states
        .iter()
        .filter(|s| s.confidence == Confidence::Authoritative)
        .count();
    let pct = 100.0 * authoritative as f64 / states.len().max(1) as f64;
    CheckResult::pass(
        "reliability",
        format!("{pct:.1}% authoritative, {:.1}% reconstructed", 100.0 - pct),
    )
}
