//! Durable storage for the token pair.
//!
//! Tokens live under two fixed keys in a small key-value file. Rotation
//! writes both keys together and logout clears both together; no observer
//! ever sees one half updated without the other.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::auth_api::TokenPair;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

pub trait TokenStore: Send + Sync {
    /// Load the stored pair, if both keys are present.
    fn load(&self) -> Result<Option<TokenPair>>;

    /// Persist both tokens in one write.
    fn store(&self, pair: &TokenPair) -> Result<()>;

    /// Remove both tokens.
    fn clear(&self) -> Result<()>;
}

// Field names are the two fixed storage keys.
#[derive(Serialize, Deserialize)]
struct StoredTokens {
    access_token: String,
    refresh_token: String,
}

/// JSON-file token store surviving process restarts.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<TokenPair>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read token file {:?}", self.path))?;
        let stored: StoredTokens = match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            // A half-written or corrupt file counts as no stored session.
            Err(_) => return Ok(None),
        };
        Ok(Some(TokenPair {
            access_token: stored.access_token,
            refresh_token: stored.refresh_token,
        }))
    }

    fn store(&self, pair: &TokenPair) -> Result<()> {
        let stored = StoredTokens {
            access_token: pair.access_token.clone(),
            refresh_token: pair.refresh_token.clone(),
        };
        let raw = serde_json::to_string(&stored).context("Failed to serialize tokens")?;

        // Write to a sibling file then rename, so a crash mid-write never
        // leaves a pair with only one rotated half.
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, raw)
            .with_context(|| format!("Failed to write token file {:?}", tmp_path))?;
        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("Failed to move token file into place at {:?}", self.path))?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove token file {:?}", self.path))?;
        }
        Ok(())
    }
}

/// In-memory token store. Used in tests and for sessions that should not
/// survive a restart.
#[derive(Default)]
pub struct MemoryTokenStore {
    tokens: Mutex<Option<TokenPair>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<TokenPair>> {
        Ok(self.tokens.lock().unwrap().clone())
    }

    fn store(&self, pair: &TokenPair) -> Result<()> {
        *self.tokens.lock().unwrap() = Some(pair.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.tokens.lock().unwrap() = None;
        Ok(())
    }
}
