pub mod api;
pub mod config;
pub mod models;
pub mod scrapers;
pub mod utils;

pub use api::*;
pub use config::Config;
pub use models::*;
pub use scrapers::*;
pub use utils::*;
