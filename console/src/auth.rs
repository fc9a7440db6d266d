//! 账户与会话管理
//!
//! 注册、登录、登出以及登录状态检查。

use validator::Validate;

use api_client::AuthToken;
use common::errors::{AppError, AppResult};
use common::models::{LoginRequest, RegisterRequest};

use crate::message::Message;
use crate::session::Session;

/// Where the user should go next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Surface {
    /// The login prompt, optionally with the username pre-filled.
    Login { username: Option<String> },
    /// The authenticated area.
    Dashboard,
}

impl Surface {
    pub fn login() -> Self {
        Surface::Login { username: None }
    }
}

/// Result of an account action: what to show and where to go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub message: Message,
    pub surface: Surface,
}

/// 账户管理器
pub struct AuthManager {
    session: Session,
}

impl AuthManager {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// 注册新账户，成功后跳转到登录并预填用户名
    pub async fn register(&self, username: &str, email: &str, password: &str) -> AppResult<Outcome> {
        let req = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        req.validate()?;

        let resp = self.session.api().register(&req).await?;
        tracing::info!(username, user_id = ?resp.user_id, "账户已注册");

        Ok(Outcome {
            message: Message::success("Registration successful! Redirecting to login page."),
            surface: Surface::Login {
                username: Some(username.to_string()),
            },
        })
    }

    /// 登录；只有响应中带有非空 token 时才会保存
    pub async fn login(&self, username: &str, password: &str) -> AppResult<Outcome> {
        let req = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        req.validate()?;

        let resp = self.session.api().login(&req).await?;
        let token = resp
            .issued_token()
            .and_then(AuthToken::new)
            .ok_or(AppError::LoginFailed)?;

        self.session.tokens().save(&token)?;
        tracing::info!(username, "登录成功");

        Ok(Outcome {
            message: Message::success("Login successful! Redirecting to dashboard."),
            surface: Surface::Dashboard,
        })
    }

    /// 登出；无论之前是否存在 token 都会清除并回到登录页
    pub fn logout(&self) -> Outcome {
        let message = match self.session.tokens().clear() {
            Ok(()) => Message::success("Logged out."),
            Err(e) => {
                tracing::warn!(error = %e, "清除 token 失败");
                Message::warning(format!("Logged out, but the stored token could not be removed: {}", e))
            }
        };
        Outcome {
            message,
            surface: Surface::login(),
        }
    }

    /// 未登录时返回登录页
    pub fn require_auth(&self) -> Surface {
        if self.is_authenticated() {
            Surface::Dashboard
        } else {
            Surface::login()
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.tokens().is_authenticated()
    }
}
