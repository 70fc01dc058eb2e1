use crate::models::{
    BetType, BookLineOdds, BookOdds, ExtractedGame, Game, GameTime, MoneylineMarket, Side,
    SportsbookLine, SportsbookLogos, SpreadMarket, SpreadSide, TeamInfo, TeamRef, TotalMarket,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const NOVIG_BOOK: &str = "Novig";
const PIKKIT_BOOK: &str = "Pikkit";

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("invalid Pikkit JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One game as written by the scraper, in either its raw or app shape.
/// Every odds field is optional so both shapes parse.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PikkitRecord {
    id: String,
    #[serde(default)]
    game_time: Option<String>,
    away_team: TeamInfo,
    home_team: TeamInfo,
    #[serde(default)]
    spread_line: Option<f64>,
    #[serde(default)]
    away_spread_line: Option<f64>,
    #[serde(default)]
    home_spread_line: Option<f64>,
    #[serde(default)]
    total_line: Option<f64>,
    #[serde(default)]
    sportsbooks: Vec<PikkitBook>,
    #[serde(default)]
    away_team_odds: Option<PikkitSideOdds>,
    #[serde(default)]
    home_team_odds: Option<PikkitSideOdds>,
    #[serde(default)]
    away_moneyline: Option<i32>,
    #[serde(default)]
    home_moneyline: Option<i32>,
    #[serde(default)]
    away_spread: Option<i32>,
    #[serde(default)]
    home_spread: Option<i32>,
    #[serde(default)]
    total_over: Option<i32>,
    #[serde(default)]
    total_under: Option<i32>,
    #[serde(default)]
    sportsbook_logos: Option<SportsbookLogos>,
}

#[derive(Debug, Deserialize)]
struct PikkitBook {
    name: String,
    #[serde(default)]
    odds: PikkitBookOdds,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PikkitBookOdds {
    #[serde(default)]
    moneyline: Option<i32>,
    #[serde(default)]
    spread: Option<i32>,
    #[serde(default)]
    total_over: Option<i32>,
    #[serde(default)]
    total_under: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct PikkitSideOdds {
    #[serde(default)]
    moneyline: Option<i32>,
    #[serde(default)]
    spread: Option<i32>,
}

impl PikkitRecord {
    fn book(&self, name: &str) -> Option<&PikkitBookOdds> {
        self.sportsbooks.iter().find(|b| b.name == name).map(|b| &b.odds)
    }

    fn into_game(self) -> Game {
        let novig = self.book(NOVIG_BOOK);
        let pikkit = self.book(PIKKIT_BOOK);

        let away_money = self
            .away_team_odds
            .as_ref()
            .and_then(|o| o.moneyline)
            .or(self.away_moneyline)
            .or(novig.and_then(|o| o.moneyline))
            .unwrap_or(0);
        let home_money = self
            .home_team_odds
            .as_ref()
            .and_then(|o| o.moneyline)
            .or(self.home_moneyline)
            .or(pikkit.and_then(|o| o.moneyline))
            .unwrap_or(0);

        let away_spread_odds = self
            .away_team_odds
            .as_ref()
            .and_then(|o| o.spread)
            .or(self.away_spread)
            .or(novig.and_then(|o| o.spread))
            .unwrap_or(0);
        let home_spread_odds = self
            .home_team_odds
            .as_ref()
            .and_then(|o| o.spread)
            .or(self.home_spread)
            .or(pikkit.and_then(|o| o.spread))
            .unwrap_or(0);

        let over = self
            .total_over
            .or(novig.and_then(|o| o.total_over))
            .or(pikkit.and_then(|o| o.total_over))
            .unwrap_or(0);
        let under = self
            .total_under
            .or(novig.and_then(|o| o.total_under))
            .or(pikkit.and_then(|o| o.total_under))
            .unwrap_or(0);

        // The app shape writes 0 for an unknown side line
        let away_line = self
            .away_spread_line
            .filter(|line| *line != 0.0)
            .or(self.spread_line)
            .unwrap_or(0.0);
        let home_line = match self.home_spread_line.filter(|line| *line != 0.0) {
            Some(line) => line,
            None if away_line != 0.0 => -away_line,
            None => 0.0,
        };

        let starts_at = match self.game_time {
            Some(time) if !GameTime::from(time.clone()).is_tbd() => time.trim().to_string(),
            _ => String::new(),
        };

        Game {
            id: self.id,
            league: "MLB".to_string(),
            starts_at,
            away_team: TeamRef {
                name: self.away_team.name,
                abbr: self.away_team.abbreviation,
            },
            home_team: TeamRef {
                name: self.home_team.name,
                abbr: self.home_team.abbreviation,
            },
            moneyline: MoneylineMarket {
                away: BookOdds::novig_only(away_money),
                home: BookOdds::novig_only(home_money),
            },
            spread: SpreadMarket {
                away: SpreadSide {
                    line: away_line,
                    odds: BookOdds::novig_only(away_spread_odds),
                },
                home: SpreadSide {
                    line: home_line,
                    odds: BookOdds::novig_only(home_spread_odds),
                },
            },
            total: TotalMarket {
                line: self.total_line.unwrap_or(0.0),
                over: BookOdds::novig_only(over),
                under: BookOdds::novig_only(under),
            },
            best_lines: None,
            sportsbook_logos: self.sportsbook_logos,
        }
    }
}

/// Convert a scraper JSON array into games.
///
/// Records sharing an id collapse into one: the last record wins but keeps the
/// position of the first.
pub fn import_pikkit_json(input: &str) -> Result<Vec<Game>, ImportError> {
    let records: Vec<PikkitRecord> = serde_json::from_str(input)?;

    let mut unique: Vec<PikkitRecord> = Vec::with_capacity(records.len());
    let mut seen: HashMap<String, usize> = HashMap::new();
    for record in records {
        match seen.get(&record.id) {
            Some(&index) => unique[index] = record,
            None => {
                seen.insert(record.id.clone(), unique.len());
                unique.push(record);
            }
        }
    }

    Ok(unique.into_iter().map(PikkitRecord::into_game).collect())
}

/// Odds for one team
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SideOdds {
    pub moneyline: i32,
    pub spread: i32,
}

/// Book entry of the app-shaped payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppBook {
    pub name: String,
    pub abbreviation: String,
    pub odds: BookLineOdds,
}

/// Game in the shape the odds table loads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppGame {
    pub id: String,
    pub sport: String,
    pub league: String,
    pub game_time: GameTime,
    pub away_team: TeamInfo,
    pub home_team: TeamInfo,
    pub spread_line: f64,
    pub away_spread_line: f64,
    pub home_spread_line: f64,
    pub total_line: f64,
    /// Away line with its sign, empty when no spread was found
    pub formatted_spread_line: String,
    pub sportsbooks: Vec<AppBook>,
    pub away_team_odds: SideOdds,
    pub home_team_odds: SideOdds,
    pub sportsbook_logos: SportsbookLogos,
}

/// Reshape scraped games for the odds table: a Novig book carrying the away
/// side and both totals, a Pikkit book carrying the home side.
pub fn to_app_format(games: &[ExtractedGame]) -> Vec<AppGame> {
    games.iter().map(app_game).collect()
}

fn app_game(game: &ExtractedGame) -> AppGame {
    let odds = &game.odds;
    let formatted_spread_line = if odds.spread_line == 0.0 {
        String::new()
    } else if odds.spread_line > 0.0 {
        format!("+{}", odds.spread_line)
    } else {
        odds.spread_line.to_string()
    };

    let away = SideOdds {
        moneyline: odds.away_moneyline,
        spread: odds.away_spread,
    };
    let home = SideOdds {
        moneyline: odds.home_moneyline,
        spread: odds.home_spread,
    };
    let book = |name: &str, abbreviation: &str, side: SideOdds| AppBook {
        name: name.to_string(),
        abbreviation: abbreviation.to_string(),
        odds: BookLineOdds {
            moneyline: side.moneyline,
            spread: side.spread,
            total_over: odds.total_over,
            total_under: odds.total_under,
        },
    };

    AppGame {
        id: game.id.clone(),
        sport: game.sport.clone(),
        league: game.league.clone(),
        game_time: game.game_time.clone(),
        away_team: game.away_team.clone(),
        home_team: game.home_team.clone(),
        spread_line: odds.spread_line,
        away_spread_line: odds.away_spread_line,
        home_spread_line: odds.home_spread_line,
        total_line: odds.total_line,
        formatted_spread_line,
        sportsbooks: vec![book(NOVIG_BOOK, "N", away), book(PIKKIT_BOOK, "PK", home)],
        away_team_odds: away,
        home_team_odds: home,
        sportsbook_logos: logos_by_slot(&game.sportsbooks),
    }
}

/// Logo for each line, looked up by the bet type and side it was tagged with
fn logos_by_slot(books: &[SportsbookLine]) -> SportsbookLogos {
    let find = |bet_type: BetType, side: Side| {
        books
            .iter()
            .find(|b| b.bet_type == bet_type && b.team_position == Some(side) && !b.icon_src.is_empty())
            .map(|b| b.icon_src.clone())
    };

    let moneyline_away = find(BetType::Moneyline, Side::AwayOver);
    let moneyline_home = find(BetType::Moneyline, Side::HomeUnder);
    let spread_away = find(BetType::Spread, Side::AwayOver);
    let spread_home = find(BetType::Spread, Side::HomeUnder);

    SportsbookLogos {
        moneyline: moneyline_away.clone().or_else(|| moneyline_home.clone()),
        spread: spread_home.clone().or_else(|| spread_away.clone()),
        total_over: find(BetType::Total, Side::AwayOver),
        total_under: find(BetType::Total, Side::HomeUnder),
        moneyline_away,
        moneyline_home,
        spread_away,
        spread_home,
    }
}
