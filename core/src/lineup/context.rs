//! Per-game derived lookups.
//!
//! Built once from the canonically ordered events and passed read-only into
//! every stage; nothing here mutates during the pass.

use hashbrown::HashMap;

use super::side::Side;
use crate::play_log::PlayEvent;

/// Immutable per-game context: team identity and the player→side map.
#[derive(Debug, Clone, Default)]
pub struct MatchContext {
    home_team_id: Option<i64>,
    away_team_id: Option<i64>,
    player_side: HashMap<i64, Side>,
}

impl MatchContext {
    /// Build from a game's events (must already be in canonical order).
    ///
    /// Home identity comes from the first event where the home score
    /// increases and a team id is present; every other team id is away.
    /// The player map is a majority vote over events where the player is
    /// the actor; ties stay unknown and the player is excluded from both
    /// sides.
    pub fn build(events: &[PlayEvent]) -> Self {
        let mut home_team_id = None;
        let mut prev_home = 0i32;
        for event in events {
            if let Some(score_home) = event.score_home {
                if score_home > prev_home
                    && let Some(team_id) = event.team_id
                {
                    home_team_id = Some(team_id);
                    break;
                }
                prev_home = prev_home.max(score_home);
            }
        }

        let mut away_team_id = None;
        if let Some(home) = home_team_id {
            away_team_id = events
                .iter()
                .filter_map(|e| e.team_id)
                .find(|&t| t != home);
        } else {
            tracing::warn!("no home-score increase with a team id; side identity unknown");
        }

        let mut votes: HashMap<i64, (u32, u32)> = HashMap::new();
        for event in events {
            let (Some(player_id), Some(team_id)) = (event.player_id, event.team_id) else {
                continue;
            };
            let entry = votes.entry(player_id).or_default();
            if Some(team_id) == home_team_id {
                entry.0 += 1;
            } else if Some(team_id) == away_team_id {
                entry.1 += 1;
            }
        }

        let player_side = votes
            .into_iter()
            .filter_map(|(player_id, (home, away))| {
                if home > away {
                    Some((player_id, Side::Home))
                } else if away > home {
                    Some((player_id, Side::Away))
                } else {
                    // tie: excluded from both sides
                    None
                }
            })
            .collect();

        Self {
            home_team_id,
            away_team_id,
            player_side,
        }
    }

    pub fn home_team_id(&self) -> Option<i64> {
        self.home_team_id
    }

    pub fn away_team_id(&self) -> Option<i64> {
        self.away_team_id
    }

    /// Home for the home id, away for every other team id seen in this
    /// game; unknown until home identity has been established.
    pub fn side_of_team(&self, team_id: i64) -> Option<Side> {
        match self.home_team_id {
            Some(home) if team_id == home => Some(Side::Home),
            Some(_) => Some(Side::Away),
            None => None,
        }
    }

    pub fn side_of_player(&self, player_id: i64) -> Option<Side> {
        self.player_side.get(&player_id).copied()
    }

    /// Number of players with a known side (diagnostics only).
    pub fn known_players(&self) -> usize {
        self.player_side.len()
    }
}
