//! The reconstruction pass.
//!
//! Within a game the pass is strictly sequential: counters, phases, and
//! rosters are path-dependent, so every stage observes events in canonical
//! order. Across games the work is embarrassingly parallel and runs on a
//! rayon pool, one game per task, each task owning its output exclusively.

mod state;

#[cfg(test)]
mod reconstruct_tests;

pub use state::ResolvedState;

use rayon::prelude::*;

use crate::context::{Sym, resolve};
use crate::fatigue::FatigueTracker;
use crate::inventory::InventoryEngine;
use crate::lineup::{LineupResolver, MatchContext};
use crate::play_log::{PlayEvent, SeasonLog};
use crate::possession::PossessionTracker;
use crate::rotation::{GameRotation, RotationBook};
use crate::timeline;
use crate::validate::{self, GameReport};

/// One game's reconstruction plus its validation report.
#[derive(Debug)]
pub struct GameOutcome {
    pub game_id: String,
    pub events: Vec<PlayEvent>,
    pub states: Vec<ResolvedState>,
    pub report: GameReport,
}

/// Reconstruct a single game. Returns the canonically ordered events
/// alongside one resolved state per event.
pub fn reconstruct_game(
    mut events: Vec<PlayEvent>,
    rotation: Option<&GameRotation>,
) -> (Vec<PlayEvent>, Vec<ResolvedState>) {
    timeline::sort_canonical(&mut events);
    let ctx = MatchContext::build(&events);

    let mut inventory = InventoryEngine::new();
    let mut possession = PossessionTracker::new();
    let mut resolver = LineupResolver::new(&ctx, rotation);
    let mut fatigue = FatigueTracker::new();

    let mut filled_home = 0i32;
    let mut filled_away = 0i32;
    let mut states = Vec::with_capacity(events.len());

    for event in &events {
        if let Some(score) = event.score_home {
            filled_home = score;
        }
        if let Some(score) = event.score_away {
            filled_away = score;
        }

        let snapshot = inventory.advance(event, &ctx);
        let phase = possession.advance(event, filled_home + filled_away);
        let lineups = resolver.resolve(event);
        let fatigue_state = fatigue.advance(event, &lineups.home, &lineups.away);

        states.push(ResolvedState {
            game_id: event.game_id,
            order: event.order,
            period: event.period,
            kind: event.kind,
            seconds_remaining: event.seconds_remaining,
            elapsed_seconds: timeline::elapsed_seconds(event.period, event.seconds_remaining),
            score_home: filled_home,
            score_away: filled_away,
            score_margin: filled_home - filled_away,
            possession_id: phase.possession_id,
            shot_clock: phase.shot_clock,
            home_lineup: lineups.home,
            away_lineup: lineups.away,
            confidence: lineups.confidence,
            inventory: snapshot,
            stint_index: fatigue_state.stint_index,
            seconds_since_sub: fatigue_state.seconds_since_sub,
        });
    }

    (events, states)
}

/// Reconstruct every game of a season. Games are visited in lexical id
/// order and share no mutable state.
pub fn reconstruct_season(season: SeasonLog, book: &RotationBook) -> Vec<GameOutcome> {
    let games: Vec<(Sym, Vec<PlayEvent>)> = season.into_games();
    games
        .into_par_iter()
        .map(|(game_sym, events)| {
            let game_id = resolve(game_sym);
            let rotation = book.get(game_id);
            let (events, states) = reconstruct_game(events, rotation);
            let report = validate::run_checks(game_id, &events, &states);
            tracing::debug!(
                game = game_id,
                events = events.len(),
                checks_passed = report.passed(),
                "game reconstructed"
            );
            GameOutcome {
                game_id: game_id.to_string(),
                events,
                states,
                report,
            }
        })
        .collect()
}
