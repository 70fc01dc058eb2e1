pub mod dedup;
pub mod diagnostics;
pub mod game_time;
pub mod logos;
pub mod odds;
pub mod page;
pub mod pikkit;
pub mod sections;
pub mod teams;

#[cfg(test)]
pub(crate) mod fixtures;

pub use diagnostics::{Diagnostic, MemoryRecorder, Recorder, TracingRecorder};
pub use logos::{LayoutStrategy, SixSlotCycle};
pub use page::PageTree;
pub use pikkit::{extract_games, filter_reasonable, PikkitScraper, PIKKIT_URL};
