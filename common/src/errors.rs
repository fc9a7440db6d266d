//! Application error type.
//!
//! Every failure the client can hit ends up as one of these variants and is
//! rendered to the user as a single error message. None of them is retried.

use thiserror::Error;
use validator::ValidationErrors;

/// Result alias used throughout the workspace.
pub type AppResult<T> = Result<T, AppError>;

/// Errors raised by the client.
#[derive(Error, Debug)]
pub enum AppError {
    /// A protected action was attempted without a stored token.
    #[error("Please log in first.")]
    NotAuthenticated,

    /// The login endpoint answered without issuing a token.
    #[error("Login failed. Check credentials.")]
    LoginFailed,

    /// A presence check failed before anything was sent.
    #[error("{0}")]
    Validation(String),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request never produced a response.
    #[error("Unexpected error occurred: {0}")]
    Network(String),

    /// The server answered with a body we could not decode.
    #[error("invalid response from server: {0}")]
    InvalidResponse(String),

    /// Reading or writing the persisted token failed.
    #[error("token storage failed: {0}")]
    TokenStore(String),

    /// A configuration value is missing or malformed.
    #[error("invalid value for {field}: {reason}")]
    Config { field: &'static str, reason: String },

    /// An interactive prompt was aborted or failed.
    #[error("prompt failed: {0}")]
    Prompt(String),
}

impl AppError {
    /// Shorthand for a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    /// HTTP status carried by the error, when there is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let messages: Vec<String> = fields
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();

        AppError::Validation(messages.join("; "))
    }
}
