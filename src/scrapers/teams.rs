use crate::models::TeamInfo;

/// Franchise name and its display abbreviation
pub const MLB_TEAMS: [(&str, &str); 30] = [
    ("Philadelphia Phillies", "PHI"),
    ("Cincinnati Reds", "CIN"),
    ("New York Yankees", "NYY"),
    ("Houston Astros", "HOU"),
    ("Los Angeles Dodgers", "LAD"),
    ("San Diego Padres", "SD"),
    ("Boston Red Sox", "BOS"),
    ("Seattle Mariners", "SEA"),
    ("Chicago Cubs", "CHC"),
    ("Texas Rangers", "TEX"),
    ("Atlanta Braves", "ATL"),
    ("Toronto Blue Jays", "TOR"),
    ("Baltimore Orioles", "BAL"),
    ("Tampa Bay Rays", "TB"),
    ("Minnesota Twins", "MIN"),
    ("Cleveland Guardians", "CLE"),
    ("Detroit Tigers", "DET"),
    ("Chicago White Sox", "CWS"),
    ("Kansas City Royals", "KC"),
    ("Oakland Athletics", "OAK"),
    ("Los Angeles Angels", "LAA"),
    ("Arizona Diamondbacks", "ARI"),
    ("Colorado Rockies", "COL"),
    ("San Francisco Giants", "SF"),
    ("Miami Marlins", "MIA"),
    ("Washington Nationals", "WSH"),
    ("New York Mets", "NYM"),
    ("Milwaukee Brewers", "MIL"),
    ("Pittsburgh Pirates", "PIT"),
    ("St. Louis Cardinals", "STL"),
];

/// Away/home pair found in a section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matchup {
    pub away: &'static str,
    pub home: &'static str,
}

impl Matchup {
    pub fn away_team(&self) -> TeamInfo {
        team_info(self.away)
    }

    pub fn home_team(&self) -> TeamInfo {
        team_info(self.home)
    }
}

pub fn team_info(name: &str) -> TeamInfo {
    TeamInfo {
        name: name.to_string(),
        abbreviation: team_abbreviation(name),
    }
}

/// Table abbreviation, or the uppercased initials of each word
pub fn team_abbreviation(name: &str) -> String {
    MLB_TEAMS
        .iter()
        .find(|(team, _)| *team == name)
        .map(|(_, abbr)| abbr.to_string())
        .unwrap_or_else(|| {
            name.split_whitespace()
                .filter_map(|word| word.chars().next())
                .collect::<String>()
                .to_uppercase()
        })
}

/// The two known teams mentioned earliest in `text`; the first one is away.
pub fn extract_matchup(text: &str) -> Option<Matchup> {
    let mut found: Vec<(usize, &'static str)> = MLB_TEAMS
        .iter()
        .filter_map(|(team, _)| text.find(team).map(|offset| (offset, *team)))
        .collect();

    if found.len() < 2 {
        return None;
    }
    found.sort_by_key(|(offset, _)| *offset);

    Some(Matchup {
        away: found[0].1,
        home: found[1].1,
    })
}
