use crate::models::ExtractedGame;
use std::collections::HashMap;

/// Collapse games that share teams and kickoff, keeping whichever copy has
/// strictly more odds filled in. Output keeps first-seen order.
pub fn remove_duplicate_games(games: Vec<ExtractedGame>) -> Vec<ExtractedGame> {
    let before = games.len();
    let mut unique: Vec<ExtractedGame> = Vec::with_capacity(games.len());
    let mut seen: HashMap<(String, String, String), usize> = HashMap::new();

    for game in games {
        let key = (
            game.away_team.name.clone(),
            game.home_team.name.clone(),
            game.game_time.to_string(),
        );

        match seen.get(&key) {
            Some(&index) => {
                if game.odds.populated_count() > unique[index].odds.populated_count() {
                    tracing::debug!(
                        away = %game.away_team.name,
                        home = %game.home_team.name,
                        "replacing duplicate with richer copy"
                    );
                    unique[index] = game;
                }
            }
            None => {
                seen.insert(key, unique.len());
                unique.push(game);
            }
        }
    }

    tracing::debug!("deduplication: {} -> {} games", before, unique.len());
    unique
}
