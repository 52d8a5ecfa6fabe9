use crate::context::Sym;
use crate::inventory::InventorySnapshot;
use crate::lineup::Confidence;
use crate::play_log::EventKind;

/// The fully reconstructed hidden state for one event.
///
/// Produced once per event in a single forward pass and never mutated
/// afterwards; the pass owns the sequence exclusively and hands it
/// downstream as an immutable slice.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedState {
    pub game_id: Sym,
    pub order: u32,
    pub period: u8,
    pub kind: EventKind,
    pub seconds_remaining: f64,
    pub elapsed_seconds: f64,
    /// Forward-filled running score.
    pub score_home: i32,
    pub score_away: i32,
    pub score_margin: i32,
    pub possession_id: u32,
    pub shot_clock: f64,
    /// Canonically sorted active lineups; ≤5 per side, mutually disjoint.
    pub home_lineup: Vec<i64>,
    pub away_lineup: Vec<i64>,
    pub confidence: Confidence,
    pub inventory: InventorySnapshot,
    pub stint_index: u32,
    pub seconds_since_sub: f64,
}

impl ResolvedState {
    pub fn is_complete(&self) -> bool {
        self.home_lineup.len() == 5 && self.away_lineup.len() == 5
    }
}
