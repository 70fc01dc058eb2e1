use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Local};
use clap::{Parser, Subcommand};
use oddsedge::best_lines::{comparison_rows, count_novig_picks, ComparisonBook};
use oddsedge::data::{save_comparison_to_csv, save_json};
use oddsedge::links::NOVIG_LOGO_URL;
use oddsedge::odds_calculator::format_american_odds;
use oddsedge::pikkit_import::to_app_format;
use oddsedge::store::{load_games, DataSource};
use oddsedge::{extract_games, filter_reasonable, Config, PageTree, PikkitScraper, SixSlotCycle, TracingRecorder};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cli", about = "Scrape Pikkit MLB lines and compare them against other books")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract games from a Pikkit page and write them as JSON
    Scrape {
        /// Saved HTML of a rendered Pikkit page
        #[arg(long, conflicts_with = "url")]
        input: Option<PathBuf>,
        /// Fetch the page instead (defaults to PIKKIT_URL)
        #[arg(long)]
        url: Option<String>,
        #[arg(long, default_value = "pikkit-data.json")]
        output: PathBuf,
        /// Write the shape the odds table loads
        #[arg(long)]
        app_format: bool,
        /// Reference time for resolving kickoffs (RFC 3339)
        #[arg(long)]
        now: Option<String>,
        /// Drop games whose odds fall outside sane ranges
        #[arg(long)]
        filter_unreasonable: bool,
    },
    /// Import a Pikkit JSON file and print the odds table
    Import {
        /// File path or URL (defaults to ODDSEDGE_DATA)
        input: Option<String>,
        /// Also save the comparison rows to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Book to compare Novig against
        #[arg(long, default_value = "draftkings")]
        book: ComparisonBook,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = Config::from_env();

    match Cli::parse().command {
        Command::Scrape {
            input,
            url,
            output,
            app_format,
            now,
            filter_unreasonable,
        } => {
            let page = match input {
                Some(path) => {
                    println!("Reading page from {}\n", path.display());
                    let html = std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    PageTree::from_html(&html)
                }
                None => {
                    let url = url.unwrap_or(config.pikkit_url.clone());
                    println!("Fetching {}\n", url);
                    PikkitScraper::new().fetch_page(&url).await?
                }
            };

            let now: DateTime<FixedOffset> = match now {
                Some(now) => DateTime::parse_from_rfc3339(&now).context("Invalid --now timestamp")?,
                None => Local::now().fixed_offset(),
            };

            let mut games = extract_games(&page, &now, &SixSlotCycle, &TracingRecorder);
            if filter_unreasonable {
                let before = games.len();
                games = filter_reasonable(games);
                println!("Filtered out {} games with unreasonable odds", before - games.len());
            }

            println!("Found {} games", games.len());
            for game in &games {
                println!(
                    "  {} @ {} ({}) | ML {} / {} | Total {} o{} u{}",
                    game.away_team.abbreviation,
                    game.home_team.abbreviation,
                    game.game_time,
                    format_american_odds(game.odds.away_moneyline),
                    format_american_odds(game.odds.home_moneyline),
                    game.odds.total_line,
                    format_american_odds(game.odds.total_over),
                    format_american_odds(game.odds.total_under),
                );
            }

            if app_format {
                save_json(&to_app_format(&games), &output)?;
            } else {
                save_json(&games, &output)?;
            }
            println!("\nSaved games to {}", output.display());
        }
        Command::Import { input, csv, book } => {
            let source = DataSource::parse(input.as_deref().unwrap_or(&config.data));
            let games = load_games(&source).await?;

            println!("Loaded {} games\n", games.len());
            let mut rows = Vec::new();
            for game in &games {
                let starts = if game.starts_at.is_empty() { "TBD" } else { game.starts_at.as_str() };
                println!("{} @ {} ({})", game.away_team.name, game.home_team.name, starts);

                let game_rows = comparison_rows(game, book);
                for row in &game_rows {
                    println!("  {}", row.format());
                }
                println!();
                rows.extend(game_rows);
            }

            println!(
                "{} games with a Novig line among Pikkit's best",
                count_novig_picks(&games, NOVIG_LOGO_URL)
            );

            if let Some(path) = csv {
                save_comparison_to_csv(&rows, &path)?;
                println!("Saved comparison against {} to {}", book, path.display());
            }
        }
    }

    Ok(())
}
