// File: ./src/client/mod.rs
pub mod core;
pub mod error;
pub mod middleware;
pub mod redirect;

pub use crate::client::core::CanvasClient;
pub use crate::client::error::{ApiError, FetchFailure, FetchOutcome};
