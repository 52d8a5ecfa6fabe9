use crate::context::{Sym, empty_sym, resolve};

/// Coarse category of an on-court occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EventKind {
    Shot,
    FreeThrow,
    Rebound,
    Turnover,
    Foul,
    Substitution,
    Timeout,
    PeriodMarker,
    #[default]
    Other,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Shot => "shot",
            EventKind::FreeThrow => "freethrow",
            EventKind::Rebound => "rebound",
            EventKind::Turnover => "turnover",
            EventKind::Foul => "foul",
            EventKind::Substitution => "substitution",
            EventKind::Timeout => "timeout",
            EventKind::PeriodMarker => "period",
            EventKind::Other => "other",
        }
    }
}

/// Explicit result carried by shot events when the provider supplies one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotResult {
    Made,
    Missed,
}

/// Per-event stat attribution for the acting player. Absent columns land
/// as zero so downstream running sums never see gaps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatDeltas {
    pub points: i32,
    pub fouls_personal: i32,
    pub rebounds_off: i32,
    pub rebounds_def: i32,
    pub turnovers: i32,
}

/// One row of the source log, immutable after ingestion.
#[derive(Debug, Clone)]
pub struct PlayEvent {
    pub game_id: Sym,
    /// Strictly increasing sequence number; tie-break for equal clocks.
    pub order: u32,
    pub period: u8,
    /// Clock text as logged (`PT11M30.00S`, `11:30`, ...).
    pub clock: Sym,
    /// Seconds left in the period, parsed from `clock`. Malformed clock
    /// text fails soft to 0.0 rather than aborting the pass.
    pub seconds_remaining: f64,
    pub kind: EventKind,
    pub sub_type: Sym,
    pub description: String,
    pub player_id: Option<i64>,
    pub player_name: Sym,
    pub team_id: Option<i64>,
    pub team_tricode: Sym,
    /// Provider-supplied unordered snapshot of up to ten active player ids.
    pub lineup_filter: Option<String>,
    pub score_home: Option<i32>,
    pub score_away: Option<i32>,
    pub shot_result: Option<ShotResult>,
    pub stats: StatDeltas,
}

impl Default for PlayEvent {
    fn default() -> Self {
        Self {
            game_id: empty_sym(),
            order: 0,
            period: 1,
            clock: empty_sym(),
            seconds_remaining: 0.0,
            kind: EventKind::default(),
            sub_type: empty_sym(),
            description: String::new(),
            player_id: None,
            player_name: empty_sym(),
            team_id: None,
            team_tricode: empty_sym(),
            lineup_filter: None,
            score_home: None,
            score_away: None,
            shot_result: None,
            stats: StatDeltas::default(),
        }
    }
}

impl PlayEvent {
    /// Offensive rebound: the sub-type label when present, else the stat
    /// attribution column.
    pub fn is_offensive_rebound(&self) -> bool {
        self.kind == EventKind::Rebound
            && (self.stats.rebounds_off > 0
                || resolve(self.sub_type).eq_ignore_ascii_case("offensive"))
    }

    /// Defensive rebound, detected the same two ways.
    pub fn is_defensive_rebound(&self) -> bool {
        self.kind == EventKind::Rebound
            && (self.stats.rebounds_def > 0
                || resolve(self.sub_type).eq_ignore_ascii_case("defensive"))
    }
}
