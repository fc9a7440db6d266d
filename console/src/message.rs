//! Colour-coded status messages.

use std::fmt;

use owo_colors::{OwoColorize, Stream};

use common::errors::AppError;

/// Severity of a message, which decides its colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
    Warning,
    Info,
}

impl Level {
    fn symbol(self) -> &'static str {
        match self {
            Level::Success => "✓",
            Level::Error => "×",
            Level::Warning => "⚠",
            Level::Info => "•",
        }
    }
}

/// One line of user-facing feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub level: Level,
    pub text: String,
}

impl Message {
    pub fn new(level: Level, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(Level::Success, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(Level::Error, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(Level::Warning, text)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(Level::Info, text)
    }

    /// Every failure is shown as an error prefixed with `Error: `.
    pub fn from_error(err: &AppError) -> Self {
        Self::error(format!("Error: {}", err))
    }

    /// Prints the message. Errors go to stderr, everything else to stdout.
    ///
    /// Colour is dropped when the stream is not a terminal or `NO_COLOR` is set.
    pub fn print(&self) {
        let line = format!("{} {}", self.level.symbol(), self.text);
        match self.level {
            Level::Success => println!(
                "{}",
                line.if_supports_color(Stream::Stdout, |t| t.green())
            ),
            Level::Error => eprintln!(
                "{}",
                line.if_supports_color(Stream::Stderr, |t| t.red())
            ),
            // owo-colors has no orange; yellow is the closest terminal colour.
            Level::Warning => println!(
                "{}",
                line.if_supports_color(Stream::Stdout, |t| t.yellow())
            ),
            Level::Info => println!(
                "{}",
                line.if_supports_color(Stream::Stdout, |t| t.blue())
            ),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.level.symbol(), self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_are_prefixed() {
        let msg = Message::from_error(&AppError::NotAuthenticated);
        assert_eq!(msg.level, Level::Error);
        assert_eq!(msg.text, "Error: Please log in first.");

        let api = Message::from_error(&AppError::Api {
            status: 409,
            message: "Username already taken".into(),
        });
        assert_eq!(api.text, "Error: Username already taken");
    }

    #[test]
    fn test_display_is_plain_text() {
        assert_eq!(Message::success("Saved").to_string(), "✓ Saved");
        assert_eq!(Message::info("Loading").to_string(), "• Loading");
    }
}
