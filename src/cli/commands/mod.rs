//! CLI command implementations

pub mod config;
pub mod create;
pub mod resolve;

pub use config::execute as config;
pub use create::execute as create;
pub use resolve::execute as resolve;
