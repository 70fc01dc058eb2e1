use crate::models::{BestLine, BetSlot, Book, Game};
use crate::utils::odds_calculator::{
    american_odds_to_probability, calculate_delta, calculate_payout, format_american_odds,
    format_currency, format_probability, is_novig_better,
};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Stake every comparison is quoted on
pub const COMPARISON_STAKE: f64 = 100.0;

/// Competitor a game's Novig prices are compared against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ComparisonBook {
    #[default]
    DraftKings,
    FanDuel,
    BetMGM,
}

impl ComparisonBook {
    pub fn book(&self) -> Book {
        match self {
            ComparisonBook::DraftKings => Book::Dk,
            ComparisonBook::FanDuel => Book::Fd,
            ComparisonBook::BetMGM => Book::Mgm,
        }
    }
}

impl fmt::Display for ComparisonBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.book().display_name())
    }
}

impl FromStr for ComparisonBook {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draftkings" | "dk" => Ok(ComparisonBook::DraftKings),
            "fanduel" | "fd" => Ok(ComparisonBook::FanDuel),
            "betmgm" | "mgm" => Ok(ComparisonBook::BetMGM),
            other => Err(format!("unknown sportsbook '{}'", other)),
        }
    }
}

/// Book paying the most for each of the six slots. A zero price is a line the
/// book did not post; a slot nobody posted goes to Novig.
pub fn best_lines(game: &Game) -> BestLine {
    let best = |slot: BetSlot| {
        let odds = slot.odds(game);
        let mut best_book = Book::Novig;
        let mut best_payout = 0.0;

        for book in Book::ALL {
            let price = odds.get(book);
            if price == 0 {
                continue;
            }
            let payout = calculate_payout(price, COMPARISON_STAKE);
            if payout > best_payout {
                best_book = book;
                best_payout = payout;
            }
        }
        best_book
    };

    BestLine {
        away_moneyline: best(BetSlot::AwayMoneyline),
        home_moneyline: best(BetSlot::HomeMoneyline),
        away_spread: best(BetSlot::AwaySpread),
        home_spread: best(BetSlot::HomeSpread),
        total_over: best(BetSlot::TotalOver),
        total_under: best(BetSlot::TotalUnder),
    }
}

/// Fill in `best_lines` for every game
pub fn annotate_best_lines(games: &mut [Game]) {
    for game in games.iter_mut() {
        game.best_lines = Some(best_lines(game));
    }
}

/// Novig's price for one slot next to a competitor's
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub game_id: String,
    pub market: &'static str,
    pub selection: String,
    pub novig_odds: i32,
    pub competitor: String,
    pub competitor_odds: i32,
    pub novig_better: bool,
    /// Extra return of the Novig bet on the comparison stake. `None` when
    /// either side has no price posted.
    pub delta: Option<f64>,
}

impl ComparisonRow {
    /// Delta of a row where Novig pays more
    pub fn edge(&self) -> Option<f64> {
        self.delta.filter(|_| self.novig_better)
    }

    pub fn novig_implied(&self) -> Option<f64> {
        (self.novig_odds != 0).then(|| american_odds_to_probability(self.novig_odds))
    }

    pub fn competitor_implied(&self) -> Option<f64> {
        (self.competitor_odds != 0).then(|| american_odds_to_probability(self.competitor_odds))
    }

    pub fn format(&self) -> String {
        let price = |odds: i32, implied: Option<f64>| match implied {
            Some(p) => format!("{:>5} ({})", format_american_odds(odds), format_probability(p)),
            None => format!("{:>5}", "-"),
        };
        let edge = match self.edge() {
            Some(delta) => format!(" +{} on Novig", format_currency(delta)),
            None => String::new(),
        };
        format!(
            "{:<28} Novig {} | {} {}{}",
            self.selection,
            price(self.novig_odds, self.novig_implied()),
            self.competitor,
            price(self.competitor_odds, self.competitor_implied()),
            edge
        )
    }
}

/// Human label for a slot: "Chicago Cubs ML", "Texas Rangers +1.5", "Over 8.5"
pub fn selection_label(game: &Game, slot: BetSlot) -> String {
    let signed = |line: f64| if line > 0.0 { format!("+{}", line) } else { line.to_string() };
    match slot {
        BetSlot::AwayMoneyline => format!("{} ML", game.away_team.name),
        BetSlot::HomeMoneyline => format!("{} ML", game.home_team.name),
        BetSlot::AwaySpread => format!("{} {}", game.away_team.name, signed(game.spread.away.line)),
        BetSlot::HomeSpread => format!("{} {}", game.home_team.name, signed(game.spread.home.line)),
        BetSlot::TotalOver => format!("Over {}", game.total.line),
        BetSlot::TotalUnder => format!("Under {}", game.total.line),
    }
}

/// One row per slot comparing Novig with `against`
pub fn comparison_rows(game: &Game, against: ComparisonBook) -> Vec<ComparisonRow> {
    BetSlot::ALL
        .into_iter()
        .map(|slot| {
            let odds = slot.odds(game);
            let novig = odds.novig;
            let competitor = odds.get(against.book());
            let priced = novig != 0 && competitor != 0;
            ComparisonRow {
                game_id: game.id.clone(),
                market: slot.market(),
                selection: selection_label(game, slot),
                novig_odds: novig,
                competitor: against.to_string(),
                competitor_odds: competitor,
                novig_better: priced && is_novig_better(novig, competitor),
                delta: priced.then(|| calculate_delta(novig, competitor, COMPARISON_STAKE)),
            }
        })
        .collect()
}

/// Games where the Novig logo holds at least one of the six lines on Pikkit
pub fn count_novig_picks(games: &[Game], novig_logo_url: &str) -> usize {
    games
        .iter()
        .filter(|game| {
            game.sportsbook_logos.as_ref().is_some_and(|logos| {
                [
                    &logos.moneyline_away,
                    &logos.moneyline_home,
                    &logos.spread_away,
                    &logos.spread_home,
                    &logos.total_over,
                    &logos.total_under,
                ]
                .into_iter()
                .any(|url| url.as_deref() == Some(novig_logo_url))
            })
        })
        .count()
}
