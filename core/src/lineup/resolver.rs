//! Three-tier lineup resolution.
//!
//! The source log records what happened, not who was on court; the resolver
//! reconstructs both five-player sets per event:
//! 1. authoritative rotation-interval lookup,
//! 2. the provider's embedded lineup-filter snapshot,
//! 3. stateful substitution replay over the forward-filled sets.
//!
//! Tier selection and the replay are fully deterministic: sets are kept in
//! BTreeSets and emitted sorted, so two resolutions of the same true roster
//! always canonicalize to the same signature.

use std::collections::BTreeSet;

use super::context::MatchContext;
use super::side::{self, Side, SubDirection};
use crate::play_log::{EventKind, PlayEvent};
use crate::rotation::GameRotation;
use crate::timeline;


/// Which tier produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Confidence {
    /// Exact 5+5 from the rotation-interval dataset.
    Authoritative,
    /// Reconstructed from in-log signals (filter snapshot or full replay).
    Inferred,
    /// Fewer than five known on a side; never guessed up to five.
    Incomplete,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Authoritative => "authoritative",
            Confidence::Inferred => "inferred",
            Confidence::Incomplete => "incomplete",
        }
    }
}

/// Canonically sorted lineups for one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLineups {
    pub home: Vec<i64>,
    pub away: Vec<i64>,
    pub confidence: Confidence,
}

impl ResolvedLineups {
    /// Order-independent signature for change detection.
    pub fn signature(&self) -> (&[i64], &[i64]) {
        (&self.home, &self.away)
    }

    pub fn is_complete(&self) -> bool {
        self.home.len() == 5 && self.away.len() == 5
    }
}

/// Per-game resolver state. Feed events strictly in canonical order.
pub struct LineupResolver<'a> {
    ctx: &'a MatchContext,
    rotation: Option<&'a GameRotation>,
    current_home: BTreeSet<i64>,
    current_away: BTreeSet<i64>,
    /// A full 5+5 signature has been established at least once.
    synced: bool,
}

impl<'a> LineupResolver<'a> {
    pub fn new(ctx: &'a MatchContext, rotation: Option<&'a GameRotation>) -> Self {
        Self {
            ctx,
            rotation,
            current_home: BTreeSet::new(),
            current_away: BTreeSet::new(),
            synced: false,
        }
    }

    /// Resolve both lineups for one event. First tier to succeed wins.
    pub fn resolve(&mut self, event: &PlayEvent) -> ResolvedLineups {
        // Tier 1: authoritative interval lookup.
        if let Some(rotation) = self.rotation {
            let elapsed = timeline::elapsed_seconds(event.period, event.seconds_remaining);
            let home = rotation.on_court(Side::Home, elapsed);
            let away = rotation.on_court(Side::Away, elapsed);
            if home.len() == 5 && away.len() == 5 && disjoint(&home, &away) {
                self.sync(&home, &away);
                return ResolvedLineups {
                    home,
                    away,
                    confidence: Confidence::Authoritative,
                };
            }
        }

        // Tier 2: embedded lineup-filter snapshot.
        if let Some(filter) = event.lineup_filter.as_deref()
            && let Some((home, away)) = self.split_filter(filter)
        {
            self.sync(&home, &away);
            return ResolvedLineups {
                home,
                away,
                confidence: Confidence::Inferred,
            };
        }

        // Tier 3: substitution replay over the forward-filled sets.
        self.apply_substitution(event);
        let home: Vec<i64> = self.current_home.iter().copied().collect();
        let away: Vec<i64> = self.current_away.iter().copied().collect();
        let confidence = if self.synced && home.len() == 5 && away.len() == 5 {
            Confidence::Inferred
        } else {
            Confidence::Incomplete
        };
        ResolvedLineups {
            home,
            away,
            confidence,
        }
    }

    fn sync(&mut self, home: &[i64], away: &[i64]) {
        self.current_home = home.iter().copied().collect();
        self.current_away = away.iter().copied().collect();
        self.synced = true;
    }

    /// Split a filter snapshot into sides via the majority-vote map.
    /// Accepted only when exactly five ids land on each side.
    fn split_filter(&self, filter: &str) -> Option<(Vec<i64>, Vec<i64>)> {
        let ids = parse_id_filter(filter);
        if ids.is_empty() {
            return None;
        }
        let mut home = BTreeSet::new();
        let mut away = BTreeSet::new();
        for id in ids {
            match self.ctx.side_of_player(id) {
                Some(Side::Home) => {
                    home.insert(id);
                }
                Some(Side::Away) => {
                    away.insert(id);
                }
                // unknown side: excluded from both
                None => {}
            }
        }
        if home.len() == 5 && away.len() == 5 {
            Some((home.into_iter().collect(), away.into_iter().collect()))
        } else {
            None
        }
    }

    /// Apply a substitution event to the forward-filled sets. Removal and
    /// insertion only; the replay never invents a fifth player.
    fn apply_substitution(&mut self, event: &PlayEvent) {
        if event.kind != EventKind::Substitution {
            return;
        }
        let Some(player_id) = event.player_id else {
            return;
        };
        let Some(event_side) = side::resolve_side(event, self.ctx) else {
            return;
        };
        match side::sub_direction(&event.description) {
            Some(SubDirection::Out) => {
                self.set_mut(event_side).remove(&player_id);
            }
            Some(SubDirection::In) => {
                // a player cannot stand on both sides
                self.set_mut(event_side.opposite()).remove(&player_id);
                let set = self.set_mut(event_side);
                if set.len() < 5 || set.contains(&player_id) {
                    set.insert(player_id);
                } else {
                    tracing::debug!(
                        player = player_id,
                        side = event_side.as_str(),
                        "substitution would put six on court; dropped"
                    );
                }
            }
            None => {}
        }
    }

    fn set_mut(&mut self, side: Side) -> &mut BTreeSet<i64> {
        match side {
            Side::Home => &mut self.current_home,
            Side::Away => &mut self.current_away,
        }
    }
}

/// Extract unique numeric id tokens from a provider filter snapshot.
/// The encoding varies across exports ("[201939, 203110]", "201939|203110");
/// maximal digit runs cover all of them, order-independently.
pub fn parse_id_filter(filter: &str) -> Vec<i64> {
    let bytes = filter.as_bytes();
    let mut ids = BTreeSet::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if let Ok(id) = filter[start..i].parse::<i64>() {
                ids.insert(id);
            }
        } else {
            i += 1;
        }
    }
    ids.into_iter().collect()
}

/// Sorted-slice disjointness without allocating.
fn disjoint(a: &[i64], b: &[i64]) -> bool {
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => return false,
        }
    }
    true
}
