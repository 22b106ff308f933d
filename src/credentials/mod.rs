//! Credential profile resolution.
//!
//! Profiles are named sets of access credentials. They live either in the
//! platform keychain (encrypted at rest) or in the plaintext shared
//! credentials file. [`CredentialProfileChain`] resolves a name by walking
//! its stores in order; the first store that knows the profile wins. The
//! default chain tries the keychain first and falls back to the shared file,
//! unless an explicit profiles location was given, in which case only that
//! file is consulted.

pub mod keychain;
pub mod shared_file;

use std::fmt;
use std::path::Path;

use aws_credential_types::Credentials;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use keychain::KeychainStore;
pub use shared_file::SharedFileStore;

/// A named set of access credentials.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialProfile {
    /// AWS access key id
    pub access_key_id: String,
    /// AWS secret access key
    pub secret_access_key: String,
    /// Optional session token for temporary credentials
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
}

impl CredentialProfile {
    /// Converts the profile into an SDK credentials provider.
    pub fn into_credentials(self) -> Credentials {
        Credentials::from_keys(self.access_key_id, self.secret_access_key, self.session_token)
    }
}

// Secrets never appear in logs, even at trace level.
impl fmt::Debug for CredentialProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialProfile")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .field("session_token", &self.session_token.as_ref().map(|_| "***"))
            .finish()
    }
}

/// A backing store for credential profiles.
pub trait ProfileStore: Send + Sync {
    /// Store name, for diagnostics.
    fn name(&self) -> &'static str;

    /// Whether the store is usable on this platform.
    fn available(&self) -> bool {
        true
    }

    /// Looks up a profile. `Ok(None)` means the store is healthy but does
    /// not know the profile.
    fn get(&self, profile: &str) -> Result<Option<CredentialProfile>>;

    /// Writes or replaces a profile.
    fn put(&self, profile: &str, credentials: &CredentialProfile) -> Result<()>;

    /// Removes a profile. Returns whether anything was removed.
    fn remove(&self, profile: &str) -> Result<bool>;
}

/// An ordered fallback chain of profile stores.
pub struct CredentialProfileChain {
    stores: Vec<Box<dyn ProfileStore>>,
}

impl CredentialProfileChain {
    /// Builds the default chain. With no profiles location override, the
    /// keychain is tried before the shared credentials file; an explicit
    /// location restricts the chain to that file alone.
    pub fn new(profiles_location: Option<&Path>) -> Self {
        let stores: Vec<Box<dyn ProfileStore>> = match profiles_location {
            Some(path) => vec![Box::new(SharedFileStore::at(path))],
            None => vec![
                Box::new(KeychainStore::new()),
                Box::new(SharedFileStore::default_location()),
            ],
        };
        Self { stores }
    }

    /// Builds a chain from explicit stores, in precedence order.
    pub fn from_stores(stores: Vec<Box<dyn ProfileStore>>) -> Self {
        Self { stores }
    }

    /// Resolves a profile name. First match wins; store failures degrade to
    /// a miss so a broken keychain never masks the shared file.
    pub fn try_get(&self, profile: &str) -> Option<CredentialProfile> {
        for store in &self.stores {
            if !store.available() {
                tracing::debug!(store = store.name(), "profile store unavailable, skipping");
                continue;
            }
            match store.get(profile) {
                Ok(Some(found)) => {
                    tracing::debug!(store = store.name(), profile, "resolved credential profile");
                    return Some(found);
                }
                Ok(None) => {}
                Err(err) => {
                    tracing::debug!(
                        store = store.name(),
                        profile,
                        error = %err,
                        "profile store lookup failed, falling through"
                    );
                }
            }
        }
        None
    }

    /// Like [`try_get`](Self::try_get) but turns a miss into an error.
    pub fn resolve(&self, profile: &str) -> Result<CredentialProfile> {
        self.try_get(profile)
            .ok_or_else(|| Error::ProfileNotFound(profile.to_string()))
    }

    /// Registers a profile in the first available store.
    pub fn register(&self, profile: &str, credentials: &CredentialProfile) -> Result<()> {
        let store = self
            .stores
            .iter()
            .find(|s| s.available())
            .ok_or_else(|| Error::credential_store("chain", "no store available"))?;
        store.put(profile, credentials)?;
        tracing::info!(store = store.name(), profile, "registered credential profile");
        Ok(())
    }

    /// Removes a profile from every store that has it.
    pub fn unregister(&self, profile: &str) -> Result<bool> {
        let mut removed = false;
        for store in &self.stores {
            if store.available() {
                removed |= store.remove(profile)?;
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_secrets() {
        let profile = CredentialProfile {
            access_key_id: "AKIAEXAMPLE".into(),
            secret_access_key: "super-secret".into(),
            session_token: Some("FwoGZXIvYXdzEXAMPLE".into()),
        };
        let rendered = format!("{profile:?}");
        assert!(rendered.contains("AKIAEXAMPLE"));
        assert!(rendered.contains("***"));
        assert!(!rendered.contains("super-secret"));
        assert!(!rendered.contains("FwoGZXIvYXdzEXAMPLE"));
    }
}
