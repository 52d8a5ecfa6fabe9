//! Per-team running inventories and counters.
//!
//! Timeout stock, period-scoped team fouls, and cumulative box-score
//! totals, all driven strictly by the canonical event order. Values are
//! clamped to a non-negative floor and never exceed the initial stock.

use crate::game_data::INITIAL_TIMEOUTS;
use crate::lineup::{MatchContext, Side, resolve_side, timeout_side};
use crate::play_log::{EventKind, PlayEvent};

/// Monotone cumulative totals for one team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatTotals {
    pub points: i64,
    pub fouls: i64,
    pub rebounds: i64,
    pub turnovers: i64,
}

/// One team's inventory at a point in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamInventory {
    pub timeouts_remaining: u8,
    pub fouls_period: u32,
    pub totals: StatTotals,
}

impl Default for TeamInventory {
    fn default() -> Self {
        Self {
            timeouts_remaining: INITIAL_TIMEOUTS,
            fouls_period: 0,
            totals: StatTotals::default(),
        }
    }
}

/// Both inventories, embedded into every resolved state row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InventorySnapshot {
    pub home: TeamInventory,
    pub away: TeamInventory,
}

/// Per-game counter state. Feed events in canonical order only.
pub struct InventoryEngine {
    home: TeamInventory,
    away: TeamInventory,
    period: u8,
}

impl Default for InventoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryEngine {
    pub fn new() -> Self {
        Self {
            home: TeamInventory::default(),
            away: TeamInventory::default(),
            period: 0,
        }
    }

    /// Advance past one event and return the post-event snapshot.
    pub fn advance(&mut self, event: &PlayEvent, ctx: &MatchContext) -> InventorySnapshot {
        if event.period != self.period {
            self.home.fouls_period = 0;
            self.away.fouls_period = 0;
            self.period = event.period;
        }

        match event.kind {
            EventKind::Timeout => {
                if let Some(side) = timeout_side(event, ctx) {
                    let inventory = self.side_mut(side);
                    if inventory.timeouts_remaining == 0 {
                        tracing::warn!(
                            side = side.as_str(),
                            "timeout taken with empty stock; floor holds at zero"
                        );
                    } else {
                        inventory.timeouts_remaining -= 1;
                    }
                } else {
                    tracing::debug!(order = event.order, "unattributable timeout");
                }
            }
            EventKind::Foul => {
                if let Some(side) = resolve_side(event, ctx) {
                    self.side_mut(side).fouls_period += 1;
                }
            }
            _ => {}
        }

        if let Some(side) = resolve_side(event, ctx) {
            let totals = &mut self.side_mut(side).totals;
            // deltas below zero would break monotonicity; clamp them out
            totals.points += event.stats.points.max(0) as i64;
            totals.fouls += event.stats.fouls_personal.max(0) as i64;
            totals.rebounds +=
                (event.stats.rebounds_off.max(0) + event.stats.rebounds_def.max(0)) as i64;
            totals.turnovers += event.stats.turnovers.max(0) as i64;
        }

        InventorySnapshot {
            home: self.home,
            away: self.away,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut TeamInventory {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }
}
