use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use toml;

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

/// Flat keyed-value credential file, kept separate from config.toml so the
/// config can be shared or committed without leaking tokens.
pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let creds_data: CredentialsData = toml::from_str(&content)?;
            self.credentials = creds_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.credentials.remove(key);
    }

    pub fn clear(&mut self) {
        self.credentials.clear();
    }

    // Convenience methods for the identity session
    pub fn get_user_id(&self) -> Option<&String> {
        self.get("identity_user_id")
    }

    pub fn set_user_id(&mut self, uid: String) {
        self.set("identity_user_id".to_string(), uid);
    }

    pub fn get_id_token(&self) -> Option<&String> {
        self.get("identity_id_token")
    }

    pub fn set_id_token(&mut self, token: String) {
        self.set("identity_id_token".to_string(), token);
    }

    pub fn get_refresh_token(&self) -> Option<&String> {
        self.get("identity_refresh_token")
    }

    pub fn set_refresh_token(&mut self, token: String) {
        self.set("identity_refresh_token".to_string(), token);
    }

    pub fn get_token_expires(&self) -> Option<DateTime<Utc>> {
        self.get("identity_token_expires")
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub fn set_token_expires(&mut self, expires: DateTime<Utc>) {
        self.set("identity_token_expires".to_string(), expires.to_rfc3339());
    }

    pub fn is_signed_in(&self) -> bool {
        self.get_user_id().is_some() && self.get_id_token().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_store_load_and_save() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();

        let mut store = CredentialStore::new(path.clone());
        store.set_user_id("uid-123".to_string());
        store.set_id_token("token-abc".to_string());
        store.save().unwrap();

        let mut loaded = CredentialStore::new(path);
        loaded.load().unwrap();
        assert_eq!(loaded.get_user_id(), Some(&"uid-123".to_string()));
        assert_eq!(loaded.get_id_token(), Some(&"token-abc".to_string()));
        assert!(loaded.is_signed_in());
    }

    #[test]
    fn test_credential_store_token_expires() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();

        let mut store = CredentialStore::new(path.clone());
        let expires = Utc::now() + chrono::Duration::hours(1);
        store.set_token_expires(expires);
        store.save().unwrap();

        let mut loaded = CredentialStore::new(path);
        loaded.load().unwrap();
        let loaded_expires = loaded.get_token_expires().unwrap();
        // Allow 1 second difference for serialization
        assert!((loaded_expires - expires).num_seconds().abs() < 2);
    }

    #[test]
    fn test_credential_store_clear() {
        let mut store = CredentialStore::new(PathBuf::from("/tmp/unused"));
        store.set_user_id("uid".to_string());
        store.set_id_token("tok".to_string());
        assert!(store.is_signed_in());
        store.clear();
        assert!(!store.is_signed_in());
        assert_eq!(store.get_user_id(), None);
    }
}
