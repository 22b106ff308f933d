//! Platform keychain store for credential profiles.
//!
//! Profiles are stored encrypted at rest by the OS secret service (macOS
//! Keychain, Windows Credential Manager, the freedesktop Secret Service on
//! Linux), one entry per profile name, with the credential material as a
//! JSON payload.

use keyring::Entry;

use super::{CredentialProfile, ProfileStore};
use crate::error::{Error, Result};

/// Keychain service name under which profiles are filed.
pub const KEYCHAIN_SERVICE: &str = "mgnctl";

/// Credential store backed by the OS keychain.
pub struct KeychainStore {
    service: String,
}

impl KeychainStore {
    /// Creates a store using the default service name.
    pub fn new() -> Self {
        Self::with_service(KEYCHAIN_SERVICE)
    }

    /// Creates a store under a custom service name. Used by tests to avoid
    /// touching real entries.
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, profile: &str) -> Result<Entry> {
        Entry::new(&self.service, profile)
            .map_err(|e| Error::credential_store("keychain", e.to_string()))
    }
}

impl Default for KeychainStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileStore for KeychainStore {
    fn name(&self) -> &'static str {
        "keychain"
    }

    /// Probes the platform secret service. A clean "no entry" answer means
    /// the store works; anything else (no backend, locked daemon) marks it
    /// unavailable and the chain falls through to the shared file.
    fn available(&self) -> bool {
        match Entry::new(&self.service, "__mgnctl_probe__") {
            Ok(entry) => match entry.get_password() {
                Ok(_) | Err(keyring::Error::NoEntry) => true,
                Err(err) => {
                    tracing::debug!(error = %err, "keychain probe failed");
                    false
                }
            },
            Err(err) => {
                tracing::debug!(error = %err, "keychain entry construction failed");
                false
            }
        }
    }

    fn get(&self, profile: &str) -> Result<Option<CredentialProfile>> {
        match self.entry(profile)?.get_password() {
            Ok(payload) => {
                let parsed = serde_json::from_str(&payload).map_err(|e| {
                    Error::credential_store("keychain", format!("corrupt entry for '{profile}': {e}"))
                })?;
                Ok(Some(parsed))
            }
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(Error::credential_store("keychain", err.to_string())),
        }
    }

    fn put(&self, profile: &str, credentials: &CredentialProfile) -> Result<()> {
        let payload = serde_json::to_string(credentials)?;
        self.entry(profile)?
            .set_password(&payload)
            .map_err(|e| Error::credential_store("keychain", e.to_string()))
    }

    fn remove(&self, profile: &str) -> Result<bool> {
        match self.entry(profile)?.delete_credential() {
            Ok(()) => Ok(true),
            Err(keyring::Error::NoEntry) => Ok(false),
            Err(err) => Err(Error::credential_store("keychain", err.to_string())),
        }
    }
}
