//! Unique ID generator.
//!
//! Provides identifiers attached to outgoing requests for tracing.

use uuid::Uuid;

/// Header name carrying the request ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Generates unique identifiers.
pub struct IdGenerator;

impl IdGenerator {
    /// Generates a unique request ID.
    ///
    /// # Returns
    /// A unique UUID string.
    pub fn request_id() -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_is_unique() {
        let id1 = IdGenerator::request_id();
        let id2 = IdGenerator::request_id();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_request_id_is_uuid() {
        let id = IdGenerator::request_id();
        assert!(Uuid::parse_str(&id).is_ok());
    }
}
