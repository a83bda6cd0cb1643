//! User profile providers
//!
//! The scanner asks a [`ProfileProvider`] for the current profile at scan
//! time. Until a profile store exists the demo profile is served statically;
//! deployments can point at a file instead.

use crate::error::ProfileError;
use crate::types::UserProfile;
use std::path::{Path, PathBuf};

/// Source of the requester's profile
pub trait ProfileProvider: Send + Sync {
    /// Profile to send with the next analysis
    fn current_profile(&self) -> UserProfile;
}

/// Serves one fixed profile
#[derive(Debug, Clone)]
pub struct StaticProfileProvider {
    profile: UserProfile,
}

impl StaticProfileProvider {
    /// Create provider for the given profile
    #[inline]
    #[must_use]
    pub fn new(profile: UserProfile) -> Self {
        Self { profile }
    }

    /// Provider for the demo profile
    #[inline]
    #[must_use]
    pub fn demo() -> Self {
        Self::new(UserProfile::demo())
    }
}

impl ProfileProvider for StaticProfileProvider {
    fn current_profile(&self) -> UserProfile {
        self.profile.clone()
    }
}

/// Serves a profile read from disk once, at construction
#[derive(Debug, Clone)]
pub struct FileProfileProvider {
    path: PathBuf,
    profile: UserProfile,
}

impl FileProfileProvider {
    /// Load a profile. Files ending in `.toml` are parsed as TOML, anything
    /// else as JSON.
    ///
    /// # Errors
    /// Fails when the file cannot be read or does not match the profile shape.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let path = path.as_ref().to_path_buf();
        let raw = std::fs::read_to_string(&path).map_err(|source| ProfileError::Read {
            path: path.clone(),
            source,
        })?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        let parsed = if is_toml {
            toml::from_str::<UserProfile>(&raw).map_err(|e| e.to_string())
        } else {
            serde_json::from_str::<UserProfile>(&raw).map_err(|e| e.to_string())
        };

        let profile = parsed.map_err(|message| ProfileError::Parse {
            path: path.clone(),
            message,
        })?;
        tracing::info!("Loaded profile {} from {}", profile.user_id, path.display());

        Ok(Self { path, profile })
    }

    /// Source file
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProfileProvider for FileProfileProvider {
    fn current_profile(&self) -> UserProfile {
        self.profile.clone()
    }
}
