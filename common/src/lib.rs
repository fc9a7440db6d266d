//! Shared building blocks for the dataview client.
//!
//! Wire models, response envelopes, the error type, configuration and
//! logging setup used by both the API client and the console binary.

pub mod config;
pub mod errors;
pub mod logging;
pub mod models;
pub mod response;
pub mod utils;

pub use errors::{AppError, AppResult};
