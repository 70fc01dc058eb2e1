pub mod best_lines;
pub mod data;
pub mod links;
pub mod odds_calculator;

pub use best_lines::*;
pub use data::*;
pub use links::*;
pub use odds_calculator::*;
