pub mod pikkit_import;
pub mod store;

pub use pikkit_import::*;
pub use store::*;
