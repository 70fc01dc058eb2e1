use crate::models::{BetType, ExtractedGame, ExtractedOdds, Side};
use crate::scrapers::diagnostics::{Diagnostic, Recorder};
use crate::scrapers::logos::LogoMatch;
use crate::scrapers::teams::Matchup;
use regex::Regex;
use std::sync::LazyLock;

static RE_MONEYLINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[+-]\d{3,}").unwrap());
static RE_SIGNED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[+-]\d+").unwrap());
static RE_OVER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"o(\d+\.?\d*)([+-]\d+)").unwrap());
static RE_UNDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"u(\d+\.?\d*)([+-]\d+)").unwrap());
static RE_LINE_ODDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([+-]?\d+\.?\d*)([+-]\d+)").unwrap());
static RE_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[+-]?\d+\.?\d*").unwrap());

const MAX_SPREAD_LINE: f64 = 12.5;
const MAX_TOTAL_ODDS: i32 = 200;

/// Spread lines are half points between 0.5 and 12.5. Whole numbers are
/// ambiguous with totals and are never accepted.
pub fn is_valid_spread_line(line: f64) -> bool {
    let magnitude = line.abs();
    magnitude <= MAX_SPREAD_LINE && (magnitude.fract() - 0.5).abs() < 1e-9
}

fn is_spread_odds(odds: i32) -> bool {
    (100..=500).contains(&odds.abs())
}

/// Would `(line, odds)` be accepted as a spread by the text scan?
pub fn spread_candidate(line: f64, odds: i32) -> bool {
    is_valid_spread_line(line) && is_spread_odds(odds)
}

/// Integer part of a number token, the way `parseInt` reads `+1.5` as `1`
fn parse_int(token: &str) -> Option<i32> {
    token.split('.').next()?.parse().ok()
}

/// Digits glued onto a total price (`u9.5-1086:10 PM` reads as `-1086`).
/// An out-of-range price keeps the first four characters of its signed form;
/// one too short to cut back is dropped to zero.
pub fn clamp_total_odds(odds: i32) -> i32 {
    if odds.abs() <= MAX_TOTAL_ODDS {
        return odds;
    }
    let signed = odds.to_string();
    if signed.len() <= 3 {
        return 0;
    }
    signed[..4].parse().unwrap_or(0)
}

/// Pull every odds field out of one cleaned game section.
/// Misses leave the field at zero and are reported to `recorder`.
pub fn extract_odds(
    text: &str,
    matchup: &Matchup,
    logos: &[LogoMatch],
    recorder: &dyn Recorder,
) -> ExtractedOdds {
    let mut odds = ExtractedOdds {
        away_moneyline: moneyline_after(text, matchup.away, "awayMoneyline", recorder),
        home_moneyline: moneyline_after(text, matchup.home, "homeMoneyline", recorder),
        ..ExtractedOdds::default()
    };

    extract_totals(text, &mut odds, recorder);

    let spread_logos: Vec<&LogoMatch> = logos
        .iter()
        .filter(|logo| logo.bet_type == BetType::Spread)
        .collect();
    if spread_logos.len() >= 2 {
        spreads_from_logos(spread_logos, &mut odds);
    } else {
        spreads_from_text(text, &mut odds);
    }

    if odds.spread_line == 0.0 {
        spreads_from_numbers(text, &mut odds, recorder);
    }

    odds.total_over = clamp_total_odds(odds.total_over);
    odds.total_under = clamp_total_odds(odds.total_under);
    odds
}

fn moneyline_after(text: &str, team: &str, field: &'static str, recorder: &dyn Recorder) -> i32 {
    let Some(offset) = text.find(team) else {
        recorder.record(Diagnostic::FieldMissed {
            field,
            detail: format!("{team} not in section"),
        });
        return 0;
    };
    let after = &text[offset + team.len()..];

    if let Some(value) = RE_MONEYLINE.find(after).and_then(|m| m.as_str().parse().ok()) {
        return value;
    }

    // Anything signed will do as long as it looks like a price
    match RE_SIGNED.find(after).and_then(|m| m.as_str().parse::<i32>().ok()) {
        Some(value) if (100..=1000).contains(&value.abs()) => value,
        other => {
            recorder.record(Diagnostic::FieldMissed {
                field,
                detail: match other {
                    Some(value) => format!("rejected {value} after {team}"),
                    None => format!("no signed number after {team}"),
                },
            });
            0
        }
    }
}

fn extract_totals(text: &str, odds: &mut ExtractedOdds, recorder: &dyn Recorder) {
    match RE_OVER.captures(text) {
        Some(caps) => {
            odds.total_line = caps[1].parse().unwrap_or_default();
            odds.total_over = caps[2].parse().unwrap_or_default();
        }
        None => recorder.record(Diagnostic::FieldMissed {
            field: "totalOver",
            detail: "no o<line><odds> pattern".to_string(),
        }),
    }

    match RE_UNDER.captures(text) {
        Some(caps) => odds.total_under = caps[2].parse().unwrap_or_default(),
        None => recorder.record(Diagnostic::FieldMissed {
            field: "totalUnder",
            detail: "no u<line><odds> pattern".to_string(),
        }),
    }
}

fn line_and_odds(text: &str) -> Option<(f64, i32)> {
    let caps = RE_LINE_ODDS.captures(text)?;
    Some((caps[1].parse().ok()?, caps[2].parse().ok()?))
}

fn spreads_from_logos(mut spread_logos: Vec<&LogoMatch>, odds: &mut ExtractedOdds) {
    spread_logos.sort_by_key(|logo| logo.position);

    let away = spread_logos
        .iter()
        .find(|logo| logo.side == Side::AwayOver)
        .unwrap_or(&spread_logos[0]);
    let home = spread_logos
        .iter()
        .find(|logo| logo.side == Side::HomeUnder)
        .unwrap_or(&spread_logos[1]);

    if !away.odds.is_empty() {
        if let Some((line, price)) = line_and_odds(&away.raw_text) {
            odds.away_spread_line = line;
            odds.away_spread = price;
        }
    }
    if !home.odds.is_empty() {
        if let Some((line, price)) = line_and_odds(&home.raw_text) {
            odds.home_spread_line = line;
            odds.home_spread = price;
        }
    }
    odds.spread_line = odds.away_spread_line;
}

/// Scan `<line><odds>` pairs. Pairs right after a total marker (`o`/`u`) are totals.
fn spreads_from_text(text: &str, odds: &mut ExtractedOdds) {
    let accepted: Vec<(f64, i32)> = RE_LINE_ODDS
        .captures_iter(text)
        .filter(|caps| {
            let start = caps.get(0).map_or(0, |m| m.start());
            !matches!(text[..start].chars().last(), Some('o' | 'u'))
        })
        .filter_map(|caps| Some((caps[1].parse::<f64>().ok()?, caps[2].parse::<i32>().ok()?)))
        .filter(|(line, price)| spread_candidate(*line, *price))
        .take(2)
        .collect();

    if let &[(away_line, away_price), (home_line, home_price)] = accepted.as_slice() {
        odds.away_spread_line = away_line;
        odds.away_spread = away_price;
        odds.home_spread_line = home_line;
        odds.home_spread = home_price;
        odds.spread_line = away_line;
    }
}

/// Last resort: any whitelisted line followed by a price, as long as it is not
/// the total line. A later repeat of the same line supplies the home price.
fn spreads_from_numbers(text: &str, odds: &mut ExtractedOdds, recorder: &dyn Recorder) {
    let numbers: Vec<&str> = RE_NUMBER.find_iter(text).map(|m| m.as_str()).collect();

    for i in 0..numbers.len().saturating_sub(1) {
        let (Ok(line), Some(price)) = (numbers[i].parse::<f64>(), parse_int(numbers[i + 1])) else {
            continue;
        };
        if !spread_candidate(line, price) || (line - odds.total_line).abs() <= 0.5 {
            continue;
        }

        odds.spread_line = line;
        odds.away_spread_line = line;
        odds.away_spread = price;

        for j in (i + 2)..numbers.len().saturating_sub(1) {
            let (Ok(second_line), Some(second_price)) =
                (numbers[j].parse::<f64>(), parse_int(numbers[j + 1]))
            else {
                continue;
            };
            if (second_line - line).abs() < 0.1 && is_spread_odds(second_price) {
                odds.home_spread = second_price;
                break;
            }
        }
        return;
    }

    recorder.record(Diagnostic::FieldMissed {
        field: "spreadLine",
        detail: "no whitelisted spread line".to_string(),
    });
}

/// Optional sanity filter for scraped games
pub fn is_reasonable(game: &ExtractedGame) -> bool {
    let odds = &game.odds;

    if odds.away_moneyline == 0 || odds.away_moneyline.abs() > 1000 {
        return false;
    }
    if odds.away_spread.abs() > 500 {
        return false;
    }
    if odds.total_over.abs() > MAX_TOTAL_ODDS || odds.total_under.abs() > MAX_TOTAL_ODDS {
        return false;
    }
    if odds.spread_line.abs() > 15.0 {
        return false;
    }
    if odds.total_line != 0.0 && !(3.0..=25.0).contains(&odds.total_line) {
        return false;
    }
    true
}
