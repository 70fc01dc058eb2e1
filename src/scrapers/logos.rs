use crate::models::{BetType, BookLineOdds, Side, SportsbookLine};
use crate::scrapers::diagnostics::{Diagnostic, Recorder};
use crate::scrapers::page::{NodeId, PageTree};
use crate::scrapers::teams::Matchup;
use regex::Regex;
use std::sync::LazyLock;

/// CDN serving Pikkit's sportsbook artwork
pub const LOGO_HOST: &str = "d31zyv2gw1yfmz.cloudfront.net";
/// Path segment shared by every sportsbook brand logo
pub const BRAND_PATH: &str = "/brands/";

const ROW_MAX_LEN: usize = 500;
const CONTEXT_DEPTH: usize = 5;
const RAW_TEXT_LEN: usize = 80;

static RE_CONTEXT_ODDS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[+-]\d{2,}").unwrap());

/// Maps the Nth brand logo of a game row to the line it sits next to
pub trait LayoutStrategy {
    fn slot(&self, index: usize) -> (BetType, Side);

    /// Logos per complete row, when the layout has a fixed width
    fn expected_slots(&self) -> Option<usize> {
        None
    }
}

/// Pikkit's row layout: ML away, spread home, over, ML home, spread away, under.
/// Further logos repeat the cycle.
#[derive(Debug, Default, Clone, Copy)]
pub struct SixSlotCycle;

impl LayoutStrategy for SixSlotCycle {
    fn slot(&self, index: usize) -> (BetType, Side) {
        match index % 6 {
            0 => (BetType::Moneyline, Side::AwayOver),
            1 => (BetType::Spread, Side::HomeUnder),
            2 => (BetType::Total, Side::AwayOver),
            3 => (BetType::Moneyline, Side::HomeUnder),
            4 => (BetType::Spread, Side::AwayOver),
            _ => (BetType::Total, Side::HomeUnder),
        }
    }

    fn expected_slots(&self) -> Option<usize> {
        Some(6)
    }
}

/// A brand logo and the betting line attributed to it
#[derive(Debug, Clone, PartialEq)]
pub struct LogoMatch {
    pub logo_url: String,
    pub bet_type: BetType,
    pub side: Side,
    pub position: usize,
    /// Signed numbers found around the logo
    pub odds: Vec<String>,
    pub raw_text: String,
}

impl LogoMatch {
    pub fn into_sportsbook(self, index: usize, odds: BookLineOdds) -> SportsbookLine {
        SportsbookLine {
            name: format!("Sportsbook {}", index + 1),
            abbreviation: format!("SB{}", index + 1),
            icon_src: self.logo_url,
            icon_alt: String::new(),
            bet_type: self.bet_type,
            position: Some(self.position),
            team_position: Some(self.side),
            associated_odds: self.odds,
            raw_text: self.raw_text,
            odds,
        }
    }
}

/// First descendant of `element` that holds both team names, is short enough to
/// be a single row and carries at least one image from the logo host.
pub fn find_game_row(tree: &PageTree, element: NodeId, matchup: &Matchup) -> Option<NodeId> {
    let away = matchup.away.to_lowercase();
    let home = matchup.home.to_lowercase();

    tree.descendant_elements(element).into_iter().find(|node| {
        let text = tree.text_content(*node).to_lowercase();
        text.contains(&away)
            && text.contains(&home)
            && text.chars().count() < ROW_MAX_LEN
            && tree.images(*node).iter().any(|(_, src)| src.contains(LOGO_HOST))
    })
}

/// Assign every brand logo in `row` a bet type and side, and pick up the odds
/// printed next to it.
pub fn map_logos(
    tree: &PageTree,
    row: NodeId,
    strategy: &dyn LayoutStrategy,
    recorder: &dyn Recorder,
) -> Vec<LogoMatch> {
    let logos: Vec<(NodeId, &str)> = tree
        .images(row)
        .into_iter()
        .filter(|(_, src)| src.contains(BRAND_PATH))
        .collect();

    if let Some(expected) = strategy.expected_slots() {
        if logos.len() % expected != 0 {
            recorder.record(Diagnostic::LogoCountMismatch {
                expected,
                found: logos.len(),
            });
        }
    }

    logos
        .into_iter()
        .enumerate()
        .map(|(position, (logo, src))| {
            let (bet_type, side) = strategy.slot(position);
            let (odds, raw_text) = logo_context(tree, logo);
            LogoMatch {
                logo_url: src.to_string(),
                bet_type,
                side,
                position,
                odds,
                raw_text,
            }
        })
        .collect()
}

/// Locate the game row for `matchup` inside `element` and map its logos.
/// No row means no logos.
pub fn extract_sportsbook_logos(
    tree: &PageTree,
    element: NodeId,
    matchup: &Matchup,
    strategy: &dyn LayoutStrategy,
    recorder: &dyn Recorder,
) -> Vec<LogoMatch> {
    match find_game_row(tree, element, matchup) {
        Some(row) => map_logos(tree, row, strategy, recorder),
        None => {
            recorder.record(Diagnostic::Note(format!(
                "no game row for {} @ {}",
                matchup.away, matchup.home
            )));
            Vec::new()
        }
    }
}

/// Nearest ancestor (parent first) whose text carries a signed 2+ digit number
fn logo_context(tree: &PageTree, logo: NodeId) -> (Vec<String>, String) {
    for ancestor in tree.ancestors(logo).take(CONTEXT_DEPTH) {
        let text = tree.text_content(ancestor);
        let odds: Vec<String> = RE_CONTEXT_ODDS
            .find_iter(&text)
            .map(|m| m.as_str().to_string())
            .collect();
        if !odds.is_empty() {
            let raw_text = text.trim().chars().take(RAW_TEXT_LEN).collect();
            return (odds, raw_text);
        }
    }
    (Vec::new(), String::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::diagnostics::MemoryRecorder;
    use crate::scrapers::fixtures;
    use crate::scrapers::teams::extract_matchup;

    #[test]
    fn test_six_slot_cycle() {
        let strategy = SixSlotCycle;
        assert_eq!(strategy.slot(0), (BetType::Moneyline, Side::AwayOver));
        assert_eq!(strategy.slot(1), (BetType::Spread, Side::HomeUnder));
        assert_eq!(strategy.slot(2), (BetType::Total, Side::AwayOver));
        assert_eq!(strategy.slot(3), (BetType::Moneyline, Side::HomeUnder));
        assert_eq!(strategy.slot(4), (BetType::Spread, Side::AwayOver));
        assert_eq!(strategy.slot(5), (BetType::Total, Side::HomeUnder));
        assert_eq!(strategy.slot(7), strategy.slot(1));
    }

    #[test]
    fn test_map_logos_from_game_row() {
        let page = fixtures::slate_page();
        let matchup = extract_matchup("Philadelphia Phillies Cincinnati Reds").unwrap();
        let recorder = MemoryRecorder::new();

        let logos =
            extract_sportsbook_logos(&page, page.body(), &matchup, &SixSlotCycle, &recorder);

        assert_eq!(logos.len(), 6);
        assert!(recorder.events().is_empty());

        assert_eq!(logos[0].bet_type, BetType::Moneyline);
        assert_eq!(logos[0].odds, vec!["+113".to_string()]);
        assert_eq!(logos[0].raw_text, "+113");
        assert!(logos[0].logo_url.contains(BRAND_PATH));

        assert_eq!((logos[1].bet_type, logos[1].side), (BetType::Spread, Side::HomeUnder));
        assert_eq!(logos[1].raw_text, "-1.5+150");
        assert_eq!((logos[4].bet_type, logos[4].side), (BetType::Spread, Side::AwayOver));
        assert_eq!(logos[4].raw_text, "+1.5-190");
        assert_eq!(logos[5].position, 5);
    }

    #[test]
    fn test_missing_row_yields_no_logos() {
        let page = fixtures::slate_page();
        let matchup = extract_matchup("Boston Red Sox Seattle Mariners").unwrap();
        let recorder = MemoryRecorder::new();

        let logos =
            extract_sportsbook_logos(&page, page.body(), &matchup, &SixSlotCycle, &recorder);
        assert!(logos.is_empty());
        assert_eq!(recorder.events().len(), 1);
    }

    #[test]
    fn test_partial_row_reports_count_mismatch() {
        let mut page = PageTree::new();
        let body = page.add_element(page.root(), "body");
        let row = page.add_element(body, "div");
        page.add_text(row, "Chicago Cubs Texas Rangers");
        for (odds, logo) in [("-120", "a"), ("+1.5-150", "b"), ("o8.5-110", "c"), ("+100", "d")] {
            let cell = page.add_element(row, "div");
            page.add_text(cell, odds);
            page.add_image(cell, &fixtures::logo_url(logo));
        }

        let recorder = MemoryRecorder::new();
        let logos = map_logos(&page, row, &SixSlotCycle, &recorder);

        assert_eq!(logos.len(), 4);
        assert_eq!(
            recorder.events(),
            vec![Diagnostic::LogoCountMismatch { expected: 6, found: 4 }]
        );
    }

    #[test]
    fn test_context_walk_is_bounded() {
        let mut page = PageTree::new();
        let body = page.add_element(page.root(), "body");
        page.add_text(body, "+110");
        let mut parent = page.add_element(body, "div");
        for _ in 0..5 {
            parent = page.add_element(parent, "div");
        }
        let logo = page.add_image(parent, &fixtures::logo_url("deep"));

        let (odds, raw) = logo_context(&page, logo);
        assert!(odds.is_empty());
        assert!(raw.is_empty());
    }
}
