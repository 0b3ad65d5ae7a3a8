//! Bearer token sources.
//!
//! The token lives in local persistent client storage; the executor reads it
//! on every request and attaches it when present. There is no refresh flow.

use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

/// Environment variable pointing at a token file.
pub const TOKEN_FILE_ENV_VAR: &str = "CLIPSTUDIO_TOKEN_FILE";

/// Source of the current auth token.
pub trait TokenStore: Send + Sync {
    /// Current token, if the user is signed in.
    fn token(&self) -> Option<String>;
}

/// No authentication.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoToken;

impl TokenStore for NoToken {
    fn token(&self) -> Option<String> {
        None
    }
}

/// In-memory token, set on sign-in and cleared on sign-out.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }

    pub fn set(&self, token: impl Into<String>) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = Some(token.into());
    }

    pub fn clear(&self) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .filter(|t| !t.is_empty())
    }
}

/// Token persisted in a file, re-read on every call.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create from `CLIPSTUDIO_TOKEN_FILE`, if set.
    pub fn from_env() -> Option<Self> {
        std::env::var(TOKEN_FILE_ENV_VAR)
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(Self::new)
    }
}

impl TokenStore for FileTokenStore {
    fn token(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                (!token.is_empty()).then(|| token.to_string())
            }
            Err(e) => {
                debug!(path = %self.path.display(), "No auth token available: {}", e);
                None
            }
        }
    }
}
