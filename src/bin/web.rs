use anyhow::{Context, Result};
use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use oddsedge::best_lines::{comparison_rows, count_novig_picks, ComparisonBook, ComparisonRow};
use oddsedge::links::{bet_url, NOVIG_LOGO_URL};
use oddsedge::store::GameStore;
use oddsedge::{BetSlot, Book, Config, Game};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::services::ServeDir;

// Custom filters for formatting
mod filters {
    pub fn format_odds(odds: &i32) -> ::askama::Result<String> {
        Ok(oddsedge::odds_calculator::format_american_odds(*odds))
    }

    pub fn format_money(value: &f64) -> ::askama::Result<String> {
        Ok(oddsedge::odds_calculator::format_currency(*value))
    }

    pub fn format_percent(value: &f64) -> ::askama::Result<String> {
        Ok(oddsedge::odds_calculator::format_probability(*value))
    }
}

/// One comparison row plus what the page needs to render it
struct RowView {
    row: ComparisonRow,
    best_book: &'static str,
    bet_link: String,
}

struct GameView {
    away: String,
    home: String,
    starts_at: String,
    rows: Vec<RowView>,
}

#[derive(Template)]
#[template(path = "games.html")]
struct GamesTemplate {
    is_loading: bool,
    book: String,
    books: Vec<(String, String)>,
    value_opportunities: usize,
    games: Vec<GameView>,
}

struct HtmlTemplate<T>(T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template: {}", err),
            )
                .into_response(),
        }
    }
}

#[derive(Clone)]
struct AppState {
    store: Arc<GameStore>,
    novig_url: String,
}

#[derive(Deserialize)]
struct GamesQuery {
    book: Option<String>,
}

fn game_view(game: &Game, book: ComparisonBook) -> GameView {
    let rows = comparison_rows(game, book)
        .into_iter()
        .zip(BetSlot::ALL)
        .map(|(row, slot)| RowView {
            best_book: game
                .best_lines
                .map_or(Book::Novig, |best| best.for_slot(slot))
                .display_name(),
            bet_link: format!("/bet/{}/{}", game.id, row.market),
            row,
        })
        .collect();

    GameView {
        away: game.away_team.name.clone(),
        home: game.home_team.name.clone(),
        starts_at: if game.starts_at.is_empty() {
            "TBD".to_string()
        } else {
            game.starts_at.clone()
        },
        rows,
    }
}

async fn games_page(State(state): State<AppState>, Query(query): Query<GamesQuery>) -> impl IntoResponse {
    let book = query
        .book
        .and_then(|b| b.parse::<ComparisonBook>().ok())
        .unwrap_or_default();
    let games = state.store.games().await;

    let template = GamesTemplate {
        is_loading: state.store.is_loading().await,
        book: book.to_string(),
        books: [ComparisonBook::DraftKings, ComparisonBook::FanDuel, ComparisonBook::BetMGM]
            .into_iter()
            .map(|b| (b.to_string(), b.book().display_name().to_lowercase()))
            .collect(),
        value_opportunities: count_novig_picks(&games, NOVIG_LOGO_URL),
        games: games.iter().map(|game| game_view(game, book)).collect(),
    };

    HtmlTemplate(template)
}

async fn api_games(State(state): State<AppState>) -> Json<Vec<Game>> {
    Json(state.store.games().await)
}

async fn bet(State(state): State<AppState>, Path((game_id, market)): Path<(String, String)>) -> Response {
    if BetSlot::from_market(&market).is_none() || state.store.game(&game_id).await.is_none() {
        return (StatusCode::NOT_FOUND, "Unknown game or market").into_response();
    }

    match bet_url(&state.novig_url, &game_id, &market) {
        Ok(url) => Redirect::to(url.as_str()).into_response(),
        Err(e) => {
            tracing::error!("Failed to build bet link: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to build bet link").into_response()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = Config::from_env();
    let store = Arc::new(GameStore::new(config.data_source()));

    println!("Loading Pikkit data from {}", config.data);
    let loader = store.clone();
    tokio::spawn(async move { loader.load_pikkit_data().await });

    let state = AppState {
        store,
        novig_url: config.novig_url.clone(),
    };

    // Build router with routes
    let app = Router::new()
        // This will serve files from the "static" directory at the "/static" URL path
        .nest_service("/static", ServeDir::new("static"))
        .route("/", get(games_page))
        .route("/api/games", get(api_games))
        .route("/bet/:game_id/:market", get(bet))
        .with_state(state);

    println!("\nStarting web server at http://{}", config.bind);
    println!("Press Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
