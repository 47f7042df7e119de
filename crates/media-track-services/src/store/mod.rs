pub mod patch;
pub mod rest;
pub mod watch;

pub use patch::UserDataPatch;
pub use rest::RestDocumentStore;
pub use watch::spawn_watch;

use crate::error::ServiceError;
use async_trait::async_trait;
use media_track_models::UserData;

/// The per-user document store. One document per user id, field-level
/// partial merge writes, last-writer-wins. No schema enforcement beyond
/// what the client imposes.
#[async_trait]
pub trait UserDocumentStore: Send + Sync {
    /// Fetch the user's document, None if it has never been created.
    async fn load(&self, uid: &str) -> Result<Option<UserData>, ServiceError>;

    /// Create the document (first sign-in).
    async fn create(&self, uid: &str, data: &UserData) -> Result<(), ServiceError>;

    /// Merge-write only the fields present in the patch.
    async fn merge(&self, uid: &str, patch: &UserDataPatch) -> Result<(), ServiceError>;
}
