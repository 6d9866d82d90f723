//! Authorization system for yamdb
//!
//! Provides context-based authorization:
//! - Anonymous access for reads
//! - Bearer-token authenticated users with a role
//! - Author-or-staff checks for reviews and comments
//!
//! Token cryptography is out of scope: tokens are opaque strings handed out
//! by a [`TokenIssuer`] in exchange for a valid confirmation code.

use crate::core::error::{ApiError, ApiResult, StorageError};
use crate::server::AppState;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Moderator,
    Admin,
}

impl Role {
    /// Moderators and admins may edit other people's reviews and comments
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Moderator | Role::Admin)
    }
}

/// Authorization context extracted from a request
#[derive(Debug, Clone)]
pub enum AuthContext {
    /// Authenticated user
    User {
        user_id: i64,
        username: String,
        role: Role,
    },

    /// No authentication (public access)
    Anonymous,
}

impl AuthContext {
    /// Get user_id if available
    pub fn user_id(&self) -> Option<i64> {
        match self {
            AuthContext::User { user_id, .. } => Some(*user_id),
            AuthContext::Anonymous => None,
        }
    }

    /// Check if context represents an admin
    pub fn is_admin(&self) -> bool {
        matches!(self, AuthContext::User { role: Role::Admin, .. })
    }

    /// Check if context represents a moderator or an admin
    pub fn is_staff(&self) -> bool {
        matches!(self, AuthContext::User { role, .. } if role.is_staff())
    }

    /// The authenticated user's id, or 401
    pub fn require_user(&self) -> ApiResult<i64> {
        self.user_id()
            .ok_or_else(|| ApiError::Unauthorized("authentication required".into()))
    }
}

/// Authorization policy for an operation
#[derive(Debug, Clone)]
pub enum AuthPolicy {
    /// Public access (no auth required)
    Public,

    /// Any authenticated user
    Authenticated,

    /// Admin only
    AdminOnly,

    /// The resource author, a moderator or an admin
    AuthorOrStaff { author_id: i64 },
}

impl AuthPolicy {
    /// Check if auth context satisfies this policy
    pub fn check(&self, context: &AuthContext) -> bool {
        match self {
            AuthPolicy::Public => true,

            AuthPolicy::Authenticated => !matches!(context, AuthContext::Anonymous),

            AuthPolicy::AdminOnly => context.is_admin(),

            AuthPolicy::AuthorOrStaff { author_id } => {
                context.user_id() == Some(*author_id) || context.is_staff()
            }
        }
    }

    /// Like [`check`](Self::check), but as an error: 401 for anonymous callers, 403 otherwise
    pub fn enforce(&self, context: &AuthContext) -> ApiResult<()> {
        if self.check(context) {
            return Ok(());
        }
        match context {
            AuthContext::Anonymous => {
                Err(ApiError::Unauthorized("authentication required".into()))
            }
            AuthContext::User { username, .. } => Err(ApiError::Forbidden(format!(
                "user '{}' is not allowed to perform this action",
                username
            ))),
        }
    }
}

// =============================================================================
// Tokens and confirmation codes
// =============================================================================

/// Issues and resolves access tokens
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Issue a new token for a user
    async fn issue(&self, user_id: i64) -> ApiResult<String>;

    /// Resolve a token to the user it was issued for
    async fn resolve(&self, token: &str) -> ApiResult<Option<i64>>;
}

/// Opaque random tokens kept in memory
#[derive(Default)]
pub struct InMemoryTokenIssuer {
    tokens: RwLock<HashMap<String, i64>>,
}

impl InMemoryTokenIssuer {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenIssuer for InMemoryTokenIssuer {
    async fn issue(&self, user_id: i64) -> ApiResult<String> {
        let token = Uuid::new_v4().simple().to_string();
        self.tokens
            .write()
            .map_err(|e| StorageError::Unavailable(format!("token store: {}", e)))?
            .insert(token.clone(), user_id);
        Ok(token)
    }

    async fn resolve(&self, token: &str) -> ApiResult<Option<i64>> {
        Ok(self
            .tokens
            .read()
            .map_err(|e| StorageError::Unavailable(format!("token store: {}", e)))?
            .get(token)
            .copied())
    }
}

/// One current confirmation code per user
#[derive(Default)]
pub struct ConfirmationCodes {
    codes: RwLock<HashMap<i64, String>>,
}

impl ConfirmationCodes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh code for the user, replacing any previous one
    pub fn generate(&self, user_id: i64) -> String {
        let code = Uuid::new_v4().simple().to_string();
        if let Ok(mut codes) = self.codes.write() {
            codes.insert(user_id, code.clone());
        }
        code
    }

    /// Check a submitted code against the user's current one
    pub fn verify(&self, user_id: i64, code: &str) -> bool {
        self.codes
            .read()
            .map(|codes| codes.get(&user_id).is_some_and(|current| current == code))
            .unwrap_or(false)
    }

    /// Forget the user's code (user deleted)
    pub fn revoke(&self, user_id: i64) {
        if let Ok(mut codes) = self.codes.write() {
            codes.remove(&user_id);
        }
    }
}

/// Out-of-band delivery of confirmation codes
#[async_trait]
pub trait CodeSender: Send + Sync {
    async fn send(&self, username: &str, email: &str, code: &str) -> ApiResult<()>;
}

/// Delivers codes to the log, like a console mail backend
pub struct LogCodeSender;

#[async_trait]
impl CodeSender for LogCodeSender {
    async fn send(&self, username: &str, email: &str, code: &str) -> ApiResult<()> {
        tracing::info!(%username, %email, confirmation_code = %code, "Confirmation code sent");
        Ok(())
    }
}

// =============================================================================
// Extractor
// =============================================================================

impl FromRequestParts<AppState> for AuthContext {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> ApiResult<Self> {
        let Some(header) = parts.headers.get(AUTHORIZATION) else {
            return Ok(AuthContext::Anonymous);
        };

        let token = header
            .to_str()
            .ok()
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::Unauthorized("malformed Authorization header".into()))?;

        let user_id = state
            .tokens
            .resolve(token)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("invalid token".into()))?;

        let user = state
            .store
            .users
            .get(user_id)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("user no longer exists".into()))?;

        Ok(AuthContext::User {
            user_id: user.id,
            username: user.username,
            role: user.role,
        })
    }
}
