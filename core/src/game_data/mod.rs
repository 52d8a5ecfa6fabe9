mod teams;

pub use teams::{TEAMS, TeamInfo, lookup_team, team_id_for_tricode};

/// Regulation period length, seconds.
pub const REGULATION_PERIOD_SECS: f64 = 720.0;
/// Overtime period length, seconds.
pub const OVERTIME_PERIOD_SECS: f64 = 300.0;
/// Number of regulation periods.
pub const REGULATION_PERIODS: u8 = 4;

/// Full shot-clock ceiling, seconds.
pub const SHOT_CLOCK_FULL_SECS: f64 = 24.0;
/// Reduced ceiling after an offensive rebound, seconds.
pub const SHOT_CLOCK_SHORT_SECS: f64 = 14.0;

/// Timeout stock each team starts a game with.
pub const INITIAL_TIMEOUTS: u8 = 7;
