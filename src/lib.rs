// Crate root library declaration and module exports.
pub mod bootstrap;
pub mod cli;
pub mod client;
pub mod config;
pub mod context;
pub mod dashboard;
pub mod model;
pub mod storage;
pub mod system;

#[cfg(feature = "tui")]
pub mod tui;
