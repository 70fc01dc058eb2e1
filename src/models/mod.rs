use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Market a sportsbook line belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetType {
    Moneyline,
    Spread,
    Total,
    Unknown,
}

/// Side of a line. Totals reuse the team sides: over is shown on the away row, under on the home row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "away/over")]
    AwayOver,
    #[serde(rename = "home/under")]
    HomeUnder,
}

/// Kickoff of a scraped game
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GameTime {
    At(DateTime<Utc>),
    /// No clock could be resolved for the game
    Tbd,
}

impl GameTime {
    pub fn is_tbd(&self) -> bool {
        matches!(self, GameTime::Tbd)
    }
}

impl From<String> for GameTime {
    fn from(value: String) -> Self {
        DateTime::parse_from_rfc3339(value.trim())
            .map(|dt| GameTime::At(dt.with_timezone(&Utc)))
            .unwrap_or(GameTime::Tbd)
    }
}

impl From<GameTime> for String {
    fn from(value: GameTime) -> Self {
        value.to_string()
    }
}

impl fmt::Display for GameTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Same shape as JavaScript's toISOString()
            GameTime::At(dt) => write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            GameTime::Tbd => write!(f, "TBD"),
        }
    }
}

/// A team as emitted by the scraper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInfo {
    pub name: String,
    pub abbreviation: String,
}

/// Odds block attached to each sportsbook entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookLineOdds {
    pub moneyline: i32,
    pub spread: i32,
    pub total_over: i32,
    pub total_under: i32,
}

/// One detected sportsbook logo and the betting line it was attributed to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SportsbookLine {
    pub name: String,
    pub abbreviation: String,
    pub icon_src: String,
    #[serde(default)]
    pub icon_alt: String,
    pub bet_type: BetType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_position: Option<Side>,
    #[serde(default)]
    pub associated_odds: Vec<String>,
    #[serde(default)]
    pub raw_text: String,
    pub odds: BookLineOdds,
}

/// Every odds field the extractor recovers for a game. Zero means "not found".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractedOdds {
    pub away_moneyline: i32,
    pub home_moneyline: i32,
    pub away_spread: i32,
    pub home_spread: i32,
    pub away_spread_line: f64,
    pub home_spread_line: f64,
    pub total_over: i32,
    pub total_under: i32,
    pub spread_line: f64, // Away team's line
    pub total_line: f64,
    pub raw_spread_line: String,
}

impl ExtractedOdds {
    /// Number of non-zero odds fields, used to pick the richer of two duplicate games
    pub fn populated_count(&self) -> usize {
        let ints = [
            self.away_moneyline,
            self.home_moneyline,
            self.away_spread,
            self.home_spread,
            self.total_over,
            self.total_under,
        ];
        let lines = [self.away_spread_line, self.home_spread_line, self.total_line];

        ints.iter().filter(|v| **v != 0).count() + lines.iter().filter(|v| **v != 0.0).count()
    }
}

/// A game recovered from one page section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedGame {
    pub id: String,
    pub sport: String,
    pub league: String,
    pub game_time: GameTime,
    pub away_team: TeamInfo,
    pub home_team: TeamInfo,
    pub sportsbooks: Vec<SportsbookLine>,
    #[serde(default)]
    pub raw_text: String,
    #[serde(default)]
    pub extraction_method: String,
    #[serde(flatten)]
    pub odds: ExtractedOdds,
}

/// Books compared on the odds table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Book {
    Novig,
    Dk,
    Fd,
    Mgm,
}

impl Book {
    pub const ALL: [Book; 4] = [Book::Novig, Book::Dk, Book::Fd, Book::Mgm];

    pub fn display_name(&self) -> &'static str {
        match self {
            Book::Novig => "Novig",
            Book::Dk => "DraftKings",
            Book::Fd => "FanDuel",
            Book::Mgm => "BetMGM",
        }
    }
}

/// American odds per book for one side of a market
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookOdds {
    pub novig: i32,
    pub dk: i32,
    pub fd: i32,
    pub mgm: i32,
}

impl BookOdds {
    /// Only Novig is ever populated from scraped data
    pub fn novig_only(novig: i32) -> Self {
        Self {
            novig,
            ..Self::default()
        }
    }

    pub fn get(&self, book: Book) -> i32 {
        match book {
            Book::Novig => self.novig,
            Book::Dk => self.dk,
            Book::Fd => self.fd,
            Book::Mgm => self.mgm,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MoneylineMarket {
    pub away: BookOdds,
    pub home: BookOdds,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpreadSide {
    pub line: f64,
    #[serde(flatten)]
    pub odds: BookOdds,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpreadMarket {
    pub away: SpreadSide,
    pub home: SpreadSide,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TotalMarket {
    pub line: f64,
    pub over: BookOdds,
    pub under: BookOdds,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRef {
    pub name: String,
    pub abbr: String,
}

/// Logo URL per bet type and side, as scraped from Pikkit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SportsbookLogos {
    pub moneyline: Option<String>,
    pub spread: Option<String>,
    pub total_over: Option<String>,
    pub total_under: Option<String>,
    #[serde(default)]
    pub moneyline_away: Option<String>,
    #[serde(default)]
    pub moneyline_home: Option<String>,
    #[serde(default)]
    pub spread_away: Option<String>,
    #[serde(default)]
    pub spread_home: Option<String>,
}

impl SportsbookLogos {
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        [
            &self.moneyline,
            &self.spread,
            &self.total_over,
            &self.total_under,
            &self.moneyline_away,
            &self.moneyline_home,
            &self.spread_away,
            &self.spread_home,
        ]
        .into_iter()
        .filter_map(|url| url.as_deref())
    }
}

/// Best book for each bet slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestLine {
    pub away_moneyline: Book,
    pub home_moneyline: Book,
    pub away_spread: Book,
    pub home_spread: Book,
    pub total_over: Book,
    pub total_under: Book,
}

impl BestLine {
    pub fn for_slot(&self, slot: BetSlot) -> Book {
        match slot {
            BetSlot::AwayMoneyline => self.away_moneyline,
            BetSlot::HomeMoneyline => self.home_moneyline,
            BetSlot::AwaySpread => self.away_spread,
            BetSlot::HomeSpread => self.home_spread,
            BetSlot::TotalOver => self.total_over,
            BetSlot::TotalUnder => self.total_under,
        }
    }
}

/// UI-facing game record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub league: String,
    pub starts_at: String, // ISO, empty when unknown
    pub away_team: TeamRef,
    pub home_team: TeamRef,
    pub moneyline: MoneylineMarket,
    pub spread: SpreadMarket,
    pub total: TotalMarket,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_lines: Option<BestLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sportsbook_logos: Option<SportsbookLogos>,
}

/// The six bettable slots of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BetSlot {
    AwayMoneyline,
    HomeMoneyline,
    AwaySpread,
    HomeSpread,
    TotalOver,
    TotalUnder,
}

impl BetSlot {
    pub const ALL: [BetSlot; 6] = [
        BetSlot::AwayMoneyline,
        BetSlot::HomeMoneyline,
        BetSlot::AwaySpread,
        BetSlot::HomeSpread,
        BetSlot::TotalOver,
        BetSlot::TotalUnder,
    ];

    /// Market key used in outbound links
    pub fn market(&self) -> &'static str {
        match self {
            BetSlot::AwayMoneyline => "moneyline-away",
            BetSlot::HomeMoneyline => "moneyline-home",
            BetSlot::AwaySpread => "spread-away",
            BetSlot::HomeSpread => "spread-home",
            BetSlot::TotalOver => "total-over",
            BetSlot::TotalUnder => "total-under",
        }
    }

    pub fn from_market(market: &str) -> Option<BetSlot> {
        BetSlot::ALL.into_iter().find(|slot| slot.market() == market)
    }

    pub fn odds<'a>(&self, game: &'a Game) -> &'a BookOdds {
        match self {
            BetSlot::AwayMoneyline => &game.moneyline.away,
            BetSlot::HomeMoneyline => &game.moneyline.home,
            BetSlot::AwaySpread => &game.spread.away.odds,
            BetSlot::HomeSpread => &game.spread.home.odds,
            BetSlot::TotalOver => &game.total.over,
            BetSlot::TotalUnder => &game.total.under,
        }
    }
}
