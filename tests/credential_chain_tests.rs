//! Integration tests for the credential profile chain and the shared
//! credentials file store.

use std::collections::HashMap;
use std::io::Write;

use parking_lot::Mutex;
use tempfile::NamedTempFile;

use mgnctl::credentials::{
    CredentialProfile, CredentialProfileChain, ProfileStore, SharedFileStore,
};
use mgnctl::error::{Error, Result};

/// In-memory store standing in for the keychain or the shared file.
struct MemoryStore {
    label: &'static str,
    available: bool,
    fail_reads: bool,
    profiles: Mutex<HashMap<String, CredentialProfile>>,
}

impl MemoryStore {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            available: true,
            fail_reads: false,
            profiles: Mutex::new(HashMap::new()),
        }
    }

    fn unavailable(label: &'static str) -> Self {
        Self {
            available: false,
            ..Self::new(label)
        }
    }

    fn broken(label: &'static str) -> Self {
        Self {
            fail_reads: true,
            ..Self::new(label)
        }
    }

    fn with(self, name: &str, access_key_id: &str) -> Self {
        self.profiles
            .lock()
            .insert(name.to_string(), profile(access_key_id));
        self
    }
}

impl ProfileStore for MemoryStore {
    fn name(&self) -> &'static str {
        self.label
    }

    fn available(&self) -> bool {
        self.available
    }

    fn get(&self, name: &str) -> Result<Option<CredentialProfile>> {
        if self.fail_reads {
            return Err(Error::CredentialStore {
                store: self.label,
                message: "simulated backend failure".into(),
            });
        }
        Ok(self.profiles.lock().get(name).cloned())
    }

    fn put(&self, name: &str, credentials: &CredentialProfile) -> Result<()> {
        self.profiles
            .lock()
            .insert(name.to_string(), credentials.clone());
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<bool> {
        Ok(self.profiles.lock().remove(name).is_some())
    }
}

fn profile(access_key_id: &str) -> CredentialProfile {
    CredentialProfile {
        access_key_id: access_key_id.to_string(),
        secret_access_key: "secret".to_string(),
        session_token: None,
    }
}

#[test]
fn first_store_wins_when_both_know_the_profile() {
    let chain = CredentialProfileChain::from_stores(vec![
        Box::new(MemoryStore::new("keychain").with("prod", "AKIAKEYCHAIN")),
        Box::new(MemoryStore::new("shared-file").with("prod", "AKIASHAREDFILE")),
    ]);

    let found = chain.resolve("prod").unwrap();
    assert_eq!(found.access_key_id, "AKIAKEYCHAIN");
}

#[test]
fn misses_fall_through_to_the_next_store() {
    let chain = CredentialProfileChain::from_stores(vec![
        Box::new(MemoryStore::new("keychain")),
        Box::new(MemoryStore::new("shared-file").with("staging", "AKIASHAREDFILE")),
    ]);

    let found = chain.resolve("staging").unwrap();
    assert_eq!(found.access_key_id, "AKIASHAREDFILE");
}

#[test]
fn unavailable_stores_are_skipped() {
    let chain = CredentialProfileChain::from_stores(vec![
        Box::new(MemoryStore::unavailable("keychain")),
        Box::new(MemoryStore::new("shared-file").with("prod", "AKIASHAREDFILE")),
    ]);

    let found = chain.resolve("prod").unwrap();
    assert_eq!(found.access_key_id, "AKIASHAREDFILE");
}

#[test]
fn store_failures_degrade_to_misses() {
    let chain = CredentialProfileChain::from_stores(vec![
        Box::new(MemoryStore::broken("keychain")),
        Box::new(MemoryStore::new("shared-file").with("prod", "AKIASHAREDFILE")),
    ]);

    let found = chain.resolve("prod").unwrap();
    assert_eq!(found.access_key_id, "AKIASHAREDFILE");
}

#[test]
fn unknown_profiles_are_an_error() {
    let chain =
        CredentialProfileChain::from_stores(vec![Box::new(MemoryStore::new("keychain"))]);
    let err = chain.resolve("nope").unwrap_err();
    assert!(matches!(err, Error::ProfileNotFound(name) if name == "nope"));
}

#[test]
fn register_targets_the_first_available_store() {
    let chain = CredentialProfileChain::from_stores(vec![
        Box::new(MemoryStore::unavailable("keychain")),
        Box::new(MemoryStore::new("shared-file")),
    ]);

    chain.register("new-profile", &profile("AKIANEW")).unwrap();
    assert_eq!(
        chain.resolve("new-profile").unwrap().access_key_id,
        "AKIANEW"
    );
}

#[test]
fn unregister_removes_from_every_store() {
    let chain = CredentialProfileChain::from_stores(vec![
        Box::new(MemoryStore::new("keychain").with("dup", "AKIAONE")),
        Box::new(MemoryStore::new("shared-file").with("dup", "AKIATWO")),
    ]);

    assert!(chain.unregister("dup").unwrap());
    assert!(chain.try_get("dup").is_none());
    assert!(!chain.unregister("dup").unwrap());
}

#[test]
fn shared_file_round_trip_preserves_other_sections() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[default]\naws_access_key_id = AKIADEFAULT\naws_secret_access_key = defaultsecret\n"
    )
    .unwrap();

    let store = SharedFileStore::at(file.path());
    store
        .put(
            "prod",
            &CredentialProfile {
                access_key_id: "AKIAPROD".into(),
                secret_access_key: "prodsecret".into(),
                session_token: Some("token".into()),
            },
        )
        .unwrap();

    // Both the pre-existing and the new section resolve.
    let default = store.get("default").unwrap().unwrap();
    assert_eq!(default.access_key_id, "AKIADEFAULT");

    let prod = store.get("prod").unwrap().unwrap();
    assert_eq!(prod.access_key_id, "AKIAPROD");
    assert_eq!(prod.session_token.as_deref(), Some("token"));

    assert!(store.remove("prod").unwrap());
    assert!(store.get("prod").unwrap().is_none());
    assert!(store.get("default").unwrap().is_some());
}

#[test]
fn explicit_location_restricts_the_chain_to_the_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[ci]\naws_access_key_id = AKIACI\naws_secret_access_key = cisecret\n"
    )
    .unwrap();

    let chain = CredentialProfileChain::new(Some(file.path()));
    assert_eq!(chain.resolve("ci").unwrap().access_key_id, "AKIACI");
}
