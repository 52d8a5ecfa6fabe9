//! Static franchise lookup table.
//!
//! The provider attributes events to a numeric team id, but free-text
//! descriptions ("GSW Timeout") only carry the tricode. This table bridges
//! the two so text-derived attributions land on the same ids as the
//! structured fields.

use phf::phf_map;

/// Franchise data keyed by tricode.
#[derive(Debug, Clone, Copy)]
pub struct TeamInfo {
    pub team_id: i64,
    pub name: &'static str,
}

impl TeamInfo {
    const fn new(team_id: i64, name: &'static str) -> Self {
        Self { team_id, name }
    }
}

/// Look up a franchise by its tricode (case-sensitive, as logged).
pub fn lookup_team(tricode: &str) -> Option<&'static TeamInfo> {
    TEAMS.get(tricode)
}

/// Team id for a tricode, if known.
pub fn team_id_for_tricode(tricode: &str) -> Option<i64> {
    TEAMS.get(tricode).map(|t| t.team_id)
}

/// Tricode lookup table.
pub static TEAMS: phf::Map<&'static str, TeamInfo> = phf_map! {
    "ATL" => TeamInfo::new(1610612737, "Atlanta Hawks"),
    "BOS" => TeamInfo::new(1610612738, "Boston Celtics"),
    "BKN" => TeamInfo::new(1610612751, "Brooklyn Nets"),
    "CHA" => TeamInfo::new(1610612766, "Charlotte Hornets"),
    "CHI" => TeamInfo::new(1610612741, "Chicago Bulls"),
    "CLE" => TeamInfo::new(1610612739, "Cleveland Cavaliers"),
    "DAL" => TeamInfo::new(1610612742, "Dallas Mavericks"),
    "DEN" => TeamInfo::new(1610612743, "Denver Nuggets"),
    "DET" => TeamInfo::new(1610612765, "Detroit Pistons"),
    "GSW" => TeamInfo::new(1610612744, "Golden State Warriors"),
    "HOU" => TeamInfo::new(1610612745, "Houston Rockets"),
    "IND" => TeamInfo::new(1610612754, "Indiana Pacers"),
    "LAC" => TeamInfo::new(1610612746, "LA Clippers"),
    "LAL" => TeamInfo::new(1610612747, "Los Angeles Lakers"),
    "MEM" => TeamInfo::new(1610612763, "Memphis Grizzlies"),
    "MIA" => TeamInfo::new(1610612748, "Miami Heat"),
    "MIL" => TeamInfo::new(1610612749, "Milwaukee Bucks"),
    "MIN" => TeamInfo::new(1610612750, "Minnesota Timberwolves"),
    "NOP" => TeamInfo::new(1610612740, "New Orleans Pelicans"),
    "NYK" => TeamInfo::new(1610612752, "New York Knicks"),
    "OKC" => TeamInfo::new(1610612760, "Oklahoma City Thunder"),
    "ORL" => TeamInfo::new(1610612753, "Orlando Magic"),
    "PHI" => TeamInfo::new(1610612755, "Philadelphia 76ers"),
    "PHX" => TeamInfo::new(1610612756, "Phoenix Suns"),
    "POR" => TeamInfo::new(1610612757, "Portland Trail Blazers"),
    "SAC" => TeamInfo::new(1610612758, "Sacramento Kings"),
    "SAS" => TeamInfo::new(1610612759, "San Antonio Spurs"),
    "TOR" => TeamInfo::new(1610612761, "Toronto Raptors"),
    "UTA" => TeamInfo::new(1610612762, "Utah Jazz"),
    "WAS" => TeamInfo::new(1610612764, "Washington Wizards"),
};
