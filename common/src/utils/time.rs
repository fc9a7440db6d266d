//! Timestamp display helpers.

use chrono::{DateTime, Local};

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders a server timestamp in local time; unparsable input is returned as is.
pub fn local_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(ts) => ts.with_timezone(&Local).format(DISPLAY_FORMAT).to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc3339_is_reformatted() {
        let shown = local_timestamp("2024-05-01T10:00:00Z");
        assert_eq!(shown.len(), 19);
        assert!(shown.starts_with("2024-"));
    }

    #[test]
    fn test_garbage_passes_through() {
        assert_eq!(local_timestamp("yesterday"), "yesterday");
    }
}
