use anyhow::Result;
use bincode::{deserialize, serialize};
use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use media_track_models::UserData;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// On-disk snapshot of the last synchronized user document.
///
/// Binary format (bincode) with gzip compression. The snapshot lets the
/// list views render without a round trip to the store; it is never treated
/// as authoritative and a snapshot that fails to decode is discarded.
pub struct SessionCache {
    cache_dir: PathBuf,
}

impl SessionCache {
    pub fn new(cache_dir: &Path) -> Self {
        Self {
            cache_dir: cache_dir.to_path_buf(),
        }
    }

    fn snapshot_path(&self, uid: &str) -> PathBuf {
        // User ids come from the identity provider and may contain path
        // separators or other unsafe characters.
        let sanitized: String = uid
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        self.cache_dir.join(format!("{}.bin", sanitized))
    }

    /// Load the snapshot for a user, or None when absent or unreadable.
    pub fn load(&self, uid: &str) -> Option<UserData> {
        let path = self.snapshot_path(uid);
        if !path.exists() {
            debug!("no session snapshot for this user");
            return None;
        }
        match self.read_snapshot(&path) {
            Ok(data) => Some(data),
            Err(err) => {
                warn!(error = %err, "discarding unreadable session snapshot");
                let _ = std::fs::remove_file(&path);
                None
            }
        }
    }

    fn read_snapshot(&self, path: &Path) -> Result<UserData> {
        let raw = std::fs::read(path)?;
        let mut decoder = GzDecoder::new(&raw[..]);
        let mut decoded = Vec::new();
        decoder.read_to_end(&mut decoded)?;
        Ok(deserialize(&decoded)?)
    }

    /// Persist a snapshot. Writes through a temp file then renames, so a
    /// crash mid-write leaves the previous snapshot intact.
    pub fn save(&self, uid: &str, data: &UserData) -> Result<()> {
        std::fs::create_dir_all(&self.cache_dir)?;
        let serialized = serialize(data)?;
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&serialized)?;
        let encoded = encoder.finish()?;

        let path = self.snapshot_path(uid);
        let temp_path = path.with_extension("tmp");
        std::fs::write(&temp_path, encoded)?;
        std::fs::rename(&temp_path, &path)?;
        Ok(())
    }

    /// Remove the snapshot for a user, if any. Used on sign-out.
    pub fn clear(&self, uid: &str) -> Result<()> {
        let path = self.snapshot_path(uid);
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }

    /// Remove every snapshot in the cache directory.
    pub fn clear_all(&self) -> Result<()> {
        if self.cache_dir.exists() {
            std::fs::remove_dir_all(&self.cache_dir)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::film;
    use tempfile::TempDir;

    fn sample_data() -> UserData {
        let mut data = UserData::default();
        data.watchlist.push(film(42, "Cached", 8.0, &["Drama"]));
        data
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let cache = SessionCache::new(dir.path());

        cache.save("user-1", &sample_data()).unwrap();
        let loaded = cache.load("user-1").unwrap();

        assert_eq!(loaded.watchlist.len(), 1);
        assert_eq!(loaded.watchlist[0].id, 42);
    }

    #[test]
    fn test_missing_snapshot_is_none() {
        let dir = TempDir::new().unwrap();
        let cache = SessionCache::new(dir.path());
        assert!(cache.load("nobody").is_none());
    }

    #[test]
    fn test_corrupt_snapshot_is_discarded() {
        let dir = TempDir::new().unwrap();
        let cache = SessionCache::new(dir.path());

        cache.save("user-1", &sample_data()).unwrap();
        let path = dir.path().join("user_1.bin");
        std::fs::write(&path, b"not a snapshot").unwrap();

        assert!(cache.load("user-1").is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_snapshots_are_per_user() {
        let dir = TempDir::new().unwrap();
        let cache = SessionCache::new(dir.path());

        cache.save("alice", &sample_data()).unwrap();
        assert!(cache.load("alice").is_some());
        assert!(cache.load("bob").is_none());
    }

    #[test]
    fn test_unsafe_uid_characters_are_sanitized() {
        let dir = TempDir::new().unwrap();
        let cache = SessionCache::new(dir.path());

        cache.save("../sneaky/uid", &sample_data()).unwrap();
        assert!(cache.load("../sneaky/uid").is_some());
        // Snapshot stays inside the cache directory.
        assert!(dir.path().join("___sneaky_uid.bin").exists());
    }

    #[test]
    fn test_clear_removes_snapshot() {
        let dir = TempDir::new().unwrap();
        let cache = SessionCache::new(dir.path());

        cache.save("user-1", &sample_data()).unwrap();
        cache.clear("user-1").unwrap();
        assert!(cache.load("user-1").is_none());

        // Clearing again is a no-op.
        cache.clear("user-1").unwrap();
    }
}
