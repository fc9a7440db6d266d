//! Account models.
//!
//! Request and response bodies for registration and login.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for `POST /api/register`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct RegisterRequest {
    /// Desired username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Contact email (optional on the server side).
    pub email: String,
    /// Plain-text password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response body of a successful registration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RegisterResponse {
    /// Human-readable status.
    #[serde(default)]
    pub message: Option<String>,
    /// Id of the new account.
    #[serde(default, rename = "userID")]
    pub user_id: Option<String>,
}

/// Request body for `POST /api/login`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginRequest {
    /// Account username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Plain-text password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response body of `POST /api/login`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoginResponse {
    /// Bearer token; absent or empty means the login did not succeed.
    #[serde(default)]
    pub token: Option<String>,
    /// Human-readable status.
    #[serde(default)]
    pub message: Option<String>,
    /// Id of the authenticated account.
    #[serde(default, rename = "userID")]
    pub user_id: Option<String>,
}

impl LoginResponse {
    /// The token, if the server actually issued one.
    pub fn issued_token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.trim().is_empty())
    }
}
