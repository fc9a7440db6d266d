//! Utility functions and helpers.

pub mod bearer;
pub mod id_generator;
pub mod time;

// Re-export commonly used types
pub use bearer::{bearer_value, strip_bearer};
pub use id_generator::{IdGenerator, REQUEST_ID_HEADER};
pub use time::local_timestamp;
