use crate::models::{BetType, BookLineOdds, ExtractedGame, SportsbookLine};
use crate::scrapers::dedup::remove_duplicate_games;
use crate::scrapers::diagnostics::{Diagnostic, Recorder};
use crate::scrapers::game_time::TimeResolver;
use crate::scrapers::logos::{extract_sportsbook_logos, LayoutStrategy};
use crate::scrapers::odds::{extract_odds, is_reasonable};
use crate::scrapers::page::{NodeId, PageTree};
use crate::scrapers::sections::{clean_game_text, is_game_container, split_sections};
use crate::scrapers::teams::extract_matchup;
use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};

pub const PIKKIT_URL: &str = "https://app.pikkit.com/";

const EXTRACTION_METHOD: &str = "odds-pattern";

pub struct PikkitScraper {
    client: reqwest::Client,
}

impl PikkitScraper {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
                .build()
                .unwrap_or_default(),
        }
    }

    /// Fetch a rendered Pikkit page and turn it into a page tree
    pub async fn fetch_page(&self, url: &str) -> Result<PageTree> {
        let html = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to fetch Pikkit page")?
            .error_for_status()
            .context("Pikkit returned an error status")?
            .text()
            .await
            .context("Failed to read Pikkit page body")?;

        tracing::info!("fetched {} bytes from {}", html.len(), url);
        Ok(PageTree::from_html(&html))
    }
}

impl Default for PikkitScraper {
    fn default() -> Self {
        Self::new()
    }
}

/// Every game on the page, deduplicated.
///
/// Each element whose text looks like a list of game blocks is split into
/// sections; nested containers produce the same games again and are collapsed
/// by [`remove_duplicate_games`].
pub fn extract_games<Tz: TimeZone>(
    tree: &PageTree,
    now: &DateTime<Tz>,
    strategy: &dyn LayoutStrategy,
    recorder: &dyn Recorder,
) -> Vec<ExtractedGame> {
    let body_text = tree.text_content(tree.body());
    let mut games = Vec::new();

    let elements = std::iter::once(tree.root()).chain(tree.descendant_elements(tree.root()));
    for element in elements {
        let text = tree.text_content(element);
        if !is_game_container(&text) {
            continue;
        }

        let resolver = TimeResolver::new(&text, &body_text, now.clone());
        let found = games_from_element(tree, element, &text, games.len(), &resolver, strategy, recorder);
        tracing::debug!("{} games from container {:?}", found.len(), element);
        games.extend(found);
    }

    let unique = remove_duplicate_games(games);
    tracing::info!("extracted {} unique games", unique.len());
    unique
}

fn games_from_element<Tz: TimeZone>(
    tree: &PageTree,
    element: NodeId,
    text: &str,
    start_index: usize,
    resolver: &TimeResolver<Tz>,
    strategy: &dyn LayoutStrategy,
    recorder: &dyn Recorder,
) -> Vec<ExtractedGame> {
    let mut games = Vec::new();

    for section in split_sections(text) {
        let game_time = resolver.resolve(section.text, section.index);
        let cleaned = clean_game_text(section.text);

        let Some(matchup) = extract_matchup(&cleaned) else {
            recorder.record(Diagnostic::SectionSkipped {
                section: section.index,
                reason: "fewer than two known teams".to_string(),
            });
            continue;
        };

        let logos = extract_sportsbook_logos(tree, element, &matchup, strategy, recorder);
        let odds = extract_odds(&cleaned, &matchup, &logos, recorder);

        let book_odds = BookLineOdds {
            moneyline: odds.away_moneyline,
            spread: odds.away_spread,
            total_over: odds.total_over,
            total_under: odds.total_under,
        };
        let sportsbooks = if logos.is_empty() {
            vec![placeholder_book(book_odds)]
        } else {
            logos
                .into_iter()
                .enumerate()
                .map(|(i, logo)| logo.into_sportsbook(i, book_odds))
                .collect()
        };

        games.push(ExtractedGame {
            id: format!("pikkit-game-{}", start_index + section.index),
            sport: "MLB".to_string(),
            league: "MLB".to_string(),
            game_time,
            away_team: matchup.away_team(),
            home_team: matchup.home_team(),
            sportsbooks,
            raw_text: cleaned.trim().to_string(),
            extraction_method: EXTRACTION_METHOD.to_string(),
            odds,
        });
    }

    games
}

/// Stand-in book when no logo could be found for the game
fn placeholder_book(odds: BookLineOdds) -> SportsbookLine {
    SportsbookLine {
        name: "Pikkit".to_string(),
        abbreviation: "PK".to_string(),
        icon_src: String::new(),
        icon_alt: String::new(),
        bet_type: BetType::Unknown,
        position: None,
        team_position: None,
        associated_odds: Vec::new(),
        raw_text: String::new(),
        odds,
    }
}

/// Drop games whose odds fall outside sane ranges
pub fn filter_reasonable(games: Vec<ExtractedGame>) -> Vec<ExtractedGame> {
    games
        .into_iter()
        .filter(|game| {
            let keep = is_reasonable(game);
            if !keep {
                tracing::debug!(id = %game.id, "dropping game with unreasonable odds");
            }
            keep
        })
        .collect()
}
