//! Shared credentials file store.
//!
//! Reads the AWS shared credentials file (INI sections keyed by profile
//! name, `~/.aws/credentials` by default). The file is read-only from the
//! resolution chain's perspective; writes happen only through the profile
//! registration helper, which rewrites the target section and leaves every
//! other section untouched.

use std::fs;
use std::path::{Path, PathBuf};

use config::{File, FileFormat};

use super::{CredentialProfile, ProfileStore};
use crate::error::{Error, Result};

const KEY_ACCESS_KEY_ID: &str = "aws_access_key_id";
const KEY_SECRET_ACCESS_KEY: &str = "aws_secret_access_key";
const KEY_SESSION_TOKEN: &str = "aws_session_token";

/// Credential store backed by the plaintext shared credentials file.
pub struct SharedFileStore {
    path: PathBuf,
}

impl SharedFileStore {
    /// Store at an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the conventional `~/.aws/credentials` location.
    pub fn default_location() -> Self {
        let path = dirs::home_dir()
            .map(|home| home.join(".aws").join("credentials"))
            .unwrap_or_else(|| PathBuf::from(".aws/credentials"));
        Self { path }
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_section(&self, profile: &str) -> Result<Option<CredentialProfile>> {
        let path_str = self.path.to_string_lossy();
        let settings = config::Config::builder()
            .add_source(File::new(path_str.as_ref(), FileFormat::Ini))
            .build()
            .map_err(|e| Error::credential_store("shared-file", e.to_string()))?;

        let Ok(section) = settings.get_table(profile) else {
            return Ok(None);
        };

        let get = |key: &str| -> Option<String> {
            section
                .get(key)
                .and_then(|value| value.clone().into_string().ok())
        };

        let Some(access_key_id) = get(KEY_ACCESS_KEY_ID) else {
            return Ok(None);
        };
        let Some(secret_access_key) = get(KEY_SECRET_ACCESS_KEY) else {
            return Ok(None);
        };

        Ok(Some(CredentialProfile {
            access_key_id,
            secret_access_key,
            session_token: get(KEY_SESSION_TOKEN),
        }))
    }

    /// Writes the file, keeping it readable only by the owner. The shared
    /// credentials file holds plaintext secrets and AWS tooling creates it
    /// as 0600.
    fn write_file(&self, content: String) -> Result<()> {
        fs::write(&self.path, content)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }
}

impl ProfileStore for SharedFileStore {
    fn name(&self) -> &'static str {
        "shared-file"
    }

    fn get(&self, profile: &str) -> Result<Option<CredentialProfile>> {
        if !self.path.exists() {
            return Ok(None);
        }
        self.load_section(profile)
    }

    fn put(&self, profile: &str, credentials: &CredentialProfile) -> Result<()> {
        let mut sections = if self.path.exists() {
            parse_sections(&fs::read_to_string(&self.path)?)
        } else {
            Vec::new()
        };

        let mut body = vec![
            format!("{KEY_ACCESS_KEY_ID} = {}", credentials.access_key_id),
            format!("{KEY_SECRET_ACCESS_KEY} = {}", credentials.secret_access_key),
        ];
        if let Some(token) = &credentials.session_token {
            body.push(format!("{KEY_SESSION_TOKEN} = {token}"));
        }

        match sections.iter_mut().find(|(name, _)| name == profile) {
            Some((_, lines)) => *lines = body,
            None => sections.push((profile.to_string(), body)),
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        self.write_file(render_sections(&sections))?;
        Ok(())
    }

    fn remove(&self, profile: &str) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        let mut sections = parse_sections(&fs::read_to_string(&self.path)?);
        let before = sections.len();
        sections.retain(|(name, _)| name != profile);
        if sections.len() == before {
            return Ok(false);
        }
        self.write_file(render_sections(&sections))?;
        Ok(true)
    }
}

/// Splits an INI file into (section, body lines), preserving body lines
/// verbatim. Content before the first section header is dropped; the shared
/// credentials format always starts with a header.
fn parse_sections(content: &str) -> Vec<(String, Vec<String>)> {
    let mut sections: Vec<(String, Vec<String>)> = Vec::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            let name = trimmed[1..trimmed.len() - 1].trim().to_string();
            sections.push((name, Vec::new()));
        } else if let Some((_, body)) = sections.last_mut() {
            if !trimmed.is_empty() {
                body.push(line.to_string());
            }
        }
    }
    sections
}

fn render_sections(sections: &[(String, Vec<String>)]) -> String {
    let mut out = String::new();
    for (name, body) in sections {
        out.push('[');
        out.push_str(name);
        out.push_str("]\n");
        for line in body {
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with(content: &str) -> (TempDir, SharedFileStore) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials");
        fs::write(&path, content).unwrap();
        (dir, SharedFileStore::at(path))
    }

    #[test]
    fn reads_profile_section() {
        let (_dir, store) = store_with(
            "[default]\n\
             aws_access_key_id = AKIADEFAULT\n\
             aws_secret_access_key = defaultsecret\n\
             \n\
             [migration]\n\
             aws_access_key_id = AKIAMIGRATION\n\
             aws_secret_access_key = migrationsecret\n\
             aws_session_token = sessiontoken\n",
        );

        let profile = store.get("migration").unwrap().unwrap();
        assert_eq!(profile.access_key_id, "AKIAMIGRATION");
        assert_eq!(profile.secret_access_key, "migrationsecret");
        assert_eq!(profile.session_token.as_deref(), Some("sessiontoken"));

        let default = store.get("default").unwrap().unwrap();
        assert_eq!(default.access_key_id, "AKIADEFAULT");
        assert_eq!(default.session_token, None);
    }

    #[test]
    fn missing_profile_is_a_miss_not_an_error() {
        let (_dir, store) = store_with("[default]\naws_access_key_id = A\naws_secret_access_key = B\n");
        assert!(store.get("nope").unwrap().is_none());
    }

    #[test]
    fn missing_file_is_a_miss() {
        let dir = TempDir::new().unwrap();
        let store = SharedFileStore::at(dir.path().join("absent"));
        assert!(store.get("default").unwrap().is_none());
    }

    #[test]
    fn incomplete_section_is_a_miss() {
        let (_dir, store) = store_with("[partial]\naws_access_key_id = AKIAONLY\n");
        assert!(store.get("partial").unwrap().is_none());
    }

    #[test]
    fn put_preserves_other_sections() {
        let (_dir, store) = store_with(
            "[default]\naws_access_key_id = A\naws_secret_access_key = B\n",
        );

        store
            .put(
                "migration",
                &CredentialProfile {
                    access_key_id: "AKIANEW".into(),
                    secret_access_key: "newsecret".into(),
                    session_token: None,
                },
            )
            .unwrap();

        assert_eq!(store.get("default").unwrap().unwrap().access_key_id, "A");
        assert_eq!(
            store.get("migration").unwrap().unwrap().access_key_id,
            "AKIANEW"
        );
    }

    #[test]
    fn put_replaces_existing_section() {
        let (_dir, store) = store_with(
            "[migration]\naws_access_key_id = OLD\naws_secret_access_key = OLDSECRET\n",
        );

        store
            .put(
                "migration",
                &CredentialProfile {
                    access_key_id: "NEW".into(),
                    secret_access_key: "NEWSECRET".into(),
                    session_token: Some("tok".into()),
                },
            )
            .unwrap();

        let profile = store.get("migration").unwrap().unwrap();
        assert_eq!(profile.access_key_id, "NEW");
        assert_eq!(profile.session_token.as_deref(), Some("tok"));
    }

    #[test]
    fn remove_deletes_only_target_section() {
        let (_dir, store) = store_with(
            "[default]\naws_access_key_id = A\naws_secret_access_key = B\n\
             [migration]\naws_access_key_id = C\naws_secret_access_key = D\n",
        );

        assert!(store.remove("migration").unwrap());
        assert!(!store.remove("migration").unwrap());
        assert!(store.get("default").unwrap().is_some());
        assert!(store.get("migration").unwrap().is_none());
    }

    #[test]
    fn creates_file_on_first_put() {
        let dir = TempDir::new().unwrap();
        let store = SharedFileStore::at(dir.path().join("fresh").join("credentials"));
        store
            .put(
                "default",
                &CredentialProfile {
                    access_key_id: "AK".into(),
                    secret_access_key: "SK".into(),
                    session_token: None,
                },
            )
            .unwrap();
        assert_eq!(store.get("default").unwrap().unwrap().access_key_id, "AK");
    }

    #[cfg(unix)]
    #[test]
    fn written_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = SharedFileStore::at(dir.path().join("credentials"));
        store
            .put(
                "default",
                &CredentialProfile {
                    access_key_id: "AK".into(),
                    secret_access_key: "SK".into(),
                    session_token: None,
                },
            )
            .unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
