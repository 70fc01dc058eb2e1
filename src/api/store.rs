use crate::api::pikkit_import::import_pikkit_json;
use crate::models::Game;
use crate::utils::best_lines::annotate_best_lines;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::sync::{OnceCell, RwLock};

/// Where the Pikkit data file lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl DataSource {
    /// HTTP(S) locations are fetched, anything else is read from disk
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            DataSource::Url(location.to_string())
        } else {
            DataSource::File(PathBuf::from(location))
        }
    }
}

/// Read the data source and import its games, with best lines filled in
pub async fn load_games(source: &DataSource) -> Result<Vec<Game>> {
    let json = match source {
        DataSource::File(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        DataSource::Url(url) => reqwest::get(url)
            .await
            .context("Failed to fetch Pikkit data")?
            .error_for_status()
            .context("Failed to load Pikkit data")?
            .text()
            .await
            .context("Failed to read Pikkit data")?,
    };

    let mut games = import_pikkit_json(&json).context("Failed to import Pikkit data")?;
    annotate_best_lines(&mut games);
    Ok(games)
}

#[derive(Debug, Default)]
struct StoreState {
    games: Vec<Game>,
    is_loading: bool,
}

/// Games shared with request handlers. Loaded once; a failed load leaves the
/// list empty.
#[derive(Debug)]
pub struct GameStore {
    source: DataSource,
    state: RwLock<StoreState>,
    loaded: OnceCell<()>,
}

impl GameStore {
    pub fn new(source: DataSource) -> Self {
        Self {
            source,
            state: RwLock::new(StoreState::default()),
            loaded: OnceCell::new(),
        }
    }

    /// Load the data source. Later calls return once the first load is done.
    pub async fn load_pikkit_data(&self) {
        self.loaded
            .get_or_init(|| async {
                self.state.write().await.is_loading = true;

                let games = match load_games(&self.source).await {
                    Ok(games) => {
                        tracing::info!(count = games.len(), "loaded Pikkit games");
                        games
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load Pikkit data: {:#}", e);
                        Vec::new()
                    }
                };

                let mut state = self.state.write().await;
                state.games = games;
                state.is_loading = false;
            })
            .await;
    }

    pub async fn games(&self) -> Vec<Game> {
        self.state.read().await.games.clone()
    }

    pub async fn game(&self, id: &str) -> Option<Game> {
        self.state.read().await.games.iter().find(|g| g.id == id).cloned()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = r#"[{
        "id": "pikkit-game-0", "sport": "MLB", "league": "MLB",
        "gameTime": "2026-10-16T23:05:00.000Z",
        "awayTeam": {"name": "New York Yankees", "abbreviation": "NYY"},
        "homeTeam": {"name": "Houston Astros", "abbreviation": "HOU"},
        "spreadLine": -1.5, "totalLine": 8.5, "sportsbooks": [],
        "awayMoneyline": -140, "homeMoneyline": 120
    }]"#;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("oddsedge-store-{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_data_source_parse() {
        assert_eq!(
            DataSource::parse("https://example.com/pikkit-data.json"),
            DataSource::Url("https://example.com/pikkit-data.json".to_string())
        );
        assert_eq!(
            DataSource::parse("static/pikkit-data.json"),
            DataSource::File(PathBuf::from("static/pikkit-data.json"))
        );
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let path = temp_file("games.json", DATA);
        let store = GameStore::new(DataSource::File(path.clone()));

        store.load_pikkit_data().await;
        std::fs::remove_file(&path).ok();

        let games = store.games().await;
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].moneyline.away.novig, -140);
        assert_eq!(games[0].spread.home.line, 1.5);
        assert!(games[0].best_lines.is_some());
        assert!(!store.is_loading().await);
        assert!(store.game("pikkit-game-0").await.is_some());
        assert!(store.game("pikkit-game-7").await.is_none());
    }

    #[tokio::test]
    async fn test_missing_file_leaves_store_empty() {
        let store = GameStore::new(DataSource::File(PathBuf::from("/nonexistent/pikkit-data.json")));
        store.load_pikkit_data().await;

        assert!(store.games().await.is_empty());
        assert!(!store.is_loading().await);
    }

    #[tokio::test]
    async fn test_malformed_file_leaves_store_empty() {
        let path = temp_file("broken.json", "[{\"id\": ");
        let store = GameStore::new(DataSource::File(path.clone()));
        store.load_pikkit_data().await;
        std::fs::remove_file(&path).ok();

        assert!(store.games().await.is_empty());
        assert!(!store.is_loading().await);
    }

    #[tokio::test]
    async fn test_bundled_sample_data() {
        let games = load_games(&DataSource::parse("static/pikkit-data.json")).await.unwrap();
        assert_eq!(games.len(), 3);
        assert_eq!(games[2].starts_at, "");
        assert_eq!(
            crate::utils::best_lines::count_novig_picks(&games, crate::utils::links::NOVIG_LOGO_URL),
            2
        );
    }

    #[tokio::test]
    async fn test_loads_only_once() {
        let path = temp_file("once.json", DATA);
        let store = GameStore::new(DataSource::File(path.clone()));
        store.load_pikkit_data().await;

        // A second load does not re-read the file
        std::fs::write(&path, "[]").unwrap();
        store.load_pikkit_data().await;
        std::fs::remove_file(&path).ok();

        assert_eq!(store.games().await.len(), 1);
    }
}
