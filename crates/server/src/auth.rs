//! Bearer-token identity.
//!
//! Requests carry `Authorization: Bearer <token>`; an [`IdentityProvider`]
//! turns the token into the [`UserId`] that keys the caller's session.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use session::UserId;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::AppState;

/// Resolves a bearer token to a user identity
pub trait IdentityProvider: Send + Sync {
    fn resolve(&self, token: &str) -> Option<UserId>;
}

/// Fixed token table, typically loaded from a JSON object `token -> user`
#[derive(Debug, Clone, Default)]
pub struct TokenTable {
    tokens: HashMap<String, UserId>,
}

impl TokenTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: impl Into<String>, user: impl Into<UserId>) -> Self {
        self.tokens.insert(token.into(), user.into());
        self
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read token file {}", path.display()))?;
        let table = Self::from_json(&content)
            .with_context(|| format!("Failed to parse token file {}", path.display()))?;
        info!("Loaded {} bearer tokens from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let tokens: HashMap<String, String> = serde_json::from_str(content)?;
        Ok(Self {
            tokens: tokens
                .into_iter()
                .map(|(token, user)| (token, UserId::new(user)))
                .collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl IdentityProvider for TokenTable {
    fn resolve(&self, token: &str) -> Option<UserId> {
        self.tokens.get(token).cloned()
    }
}

/// `Bearer <token>` from the Authorization header value
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// The authenticated caller. Rejects with 401 when the token is missing or unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub UserId);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> std::result::Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .ok_or(ApiError::Unauthorized)?;

        let user = state.identity.resolve(token).ok_or_else(|| {
            debug!("Unknown bearer token");
            ApiError::Unauthorized
        })?;
        Ok(CurrentUser(user))
    }
}
