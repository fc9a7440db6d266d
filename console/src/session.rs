//! Shared client state.

use std::sync::Arc;

use api_client::{Api, AuthToken, TokenStore};
use common::errors::{AppError, AppResult};

/// API client plus token storage, shared by every manager.
#[derive(Clone)]
pub struct Session {
    api: Arc<dyn Api>,
    tokens: Arc<dyn TokenStore>,
}

impl Session {
    pub fn new(api: Arc<dyn Api>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { api, tokens }
    }

    pub fn api(&self) -> &dyn Api {
        self.api.as_ref()
    }

    pub fn tokens(&self) -> &dyn TokenStore {
        self.tokens.as_ref()
    }

    /// The stored token, or `NotAuthenticated` when there is none.
    ///
    /// Every protected action calls this before building its request.
    pub fn token(&self) -> AppResult<AuthToken> {
        self.tokens.load()?.ok_or(AppError::NotAuthenticated)
    }
}
