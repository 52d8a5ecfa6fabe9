//! Side identity and the free-text attribution seam.
//!
//! Everything that guesses a team from text lives here, behind small
//! functions, so the brittle string heuristics stay swappable and testable
//! independently of the state machines that consume them.

use memchr::memmem;
use serde::{Deserialize, Serialize};

use super::context::MatchContext;
use crate::game_data;
use crate::play_log::PlayEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opposite(&self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Home => "home",
            Side::Away => "away",
        }
    }
}

/// Which side an event acts for. Structured fields win; the per-game
/// majority-vote player map is the fallback. Unknown stays unknown.
pub fn resolve_side(event: &PlayEvent, ctx: &MatchContext) -> Option<Side> {
    if let Some(team_id) = event.team_id
        && let Some(side) = ctx.side_of_team(team_id)
    {
        return Some(side);
    }
    if let Some(player_id) = event.player_id
        && let Some(side) = ctx.side_of_player(player_id)
    {
        return Some(side);
    }
    None
}

/// Timeout attribution. The explicit team code is authoritative; when it is
/// absent the leading description token ("GSW Timeout") is matched against
/// the franchise table. Anything else stays unattributed and surfaces in
/// the validation report instead of being guessed.
pub fn timeout_side(event: &PlayEvent, ctx: &MatchContext) -> Option<Side> {
    if let Some(team_id) = event.team_id
        && let Some(side) = ctx.side_of_team(team_id)
    {
        return Some(side);
    }
    let token = event.description.split_whitespace().next()?;
    let team_id = game_data::team_id_for_tricode(token)?;
    ctx.side_of_team(team_id)
}

/// Direction of a substitution event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubDirection {
    In,
    Out,
}

/// Substitution direction from the description text. The provider format
/// ("SUB out: ...", "SUB in: ...") is assumed stable; unrecognized text
/// returns None and the replay tier simply forward-fills past it.
pub fn sub_direction(description: &str) -> Option<SubDirection> {
    let b = description.as_bytes();
    if memmem::find(b, b"SUB out").is_some() {
        Some(SubDirection::Out)
    } else if memmem::find(b, b"SUB in").is_some() {
        Some(SubDirection::In)
    } else {
        None
    }
}
