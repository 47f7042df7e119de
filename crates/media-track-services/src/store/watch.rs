use crate::store::UserDocumentStore;
use media_track_models::UserData;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Long-lived push channel over the user document.
///
/// Polls the store and publishes every changed document on a watch channel.
/// Receivers overwrite their local state unconditionally: last-writer-wins,
/// no merging of concurrent local edits. A failed poll is logged and skipped;
/// the previous value stays current. The task ends when every receiver is
/// dropped.
pub fn spawn_watch(
    store: Arc<dyn UserDocumentStore>,
    uid: String,
    interval: Duration,
    initial: UserData,
) -> (watch::Receiver<UserData>, JoinHandle<()>) {
    let (tx, rx) = watch::channel(initial);

    let handle = tokio::spawn(async move {
        loop {
            tokio::time::sleep(interval).await;
            if tx.is_closed() {
                debug!(uid, "All document watchers dropped, stopping poll loop");
                break;
            }
            match store.load(&uid).await {
                Ok(Some(data)) => {
                    tx.send_if_modified(|current| {
                        if *current != data {
                            *current = data;
                            true
                        } else {
                            false
                        }
                    });
                }
                Ok(None) => {
                    debug!(uid, "User document missing during watch poll");
                }
                Err(e) => {
                    warn!(uid, "Document watch poll failed: {}", e);
                }
            }
        }
    });

    (rx, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::UserDataPatch;
    use crate::ServiceError;
    use async_trait::async_trait;
    use media_track_models::MediaItem;
    use std::sync::Mutex;

    struct ScriptedStore {
        docs: Mutex<Vec<Option<UserData>>>,
    }

    #[async_trait]
    impl UserDocumentStore for ScriptedStore {
        async fn load(&self, _uid: &str) -> Result<Option<UserData>, ServiceError> {
            let mut docs = self.docs.lock().unwrap();
            if docs.len() > 1 {
                Ok(docs.remove(0))
            } else {
                Ok(docs[0].clone())
            }
        }

        async fn create(&self, _uid: &str, _data: &UserData) -> Result<(), ServiceError> {
            Ok(())
        }

        async fn merge(&self, _uid: &str, _patch: &UserDataPatch) -> Result<(), ServiceError> {
            Ok(())
        }
    }

    fn doc_with_item(id: u64) -> UserData {
        let mut data = UserData::default();
        data.watchlist.push(MediaItem {
            id,
            title: format!("Item {}", id),
            rating: 7.0,
            poster: Some("/p.jpg".to_string()),
            genres: vec![],
            overview: String::new(),
            kind: media_track_models::MediaKind::Film,
            release_year: None,
        });
        data
    }

    #[tokio::test]
    async fn test_watch_publishes_changed_documents() {
        let initial = UserData::default();
        let updated = doc_with_item(1);
        let store = Arc::new(ScriptedStore {
            docs: Mutex::new(vec![Some(updated.clone())]),
        });

        let (mut rx, handle) = spawn_watch(
            store,
            "uid-1".to_string(),
            Duration::from_millis(10),
            initial,
        );

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), updated);

        drop(rx);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_watch_skips_unchanged_and_missing_documents() {
        let initial = doc_with_item(1);
        // Same document twice, then gone; neither should publish.
        let store = Arc::new(ScriptedStore {
            docs: Mutex::new(vec![Some(initial.clone()), None, None]),
        });

        let (mut rx, handle) = spawn_watch(
            store,
            "uid-1".to_string(),
            Duration::from_millis(5),
            initial,
        );

        let notified = tokio::time::timeout(Duration::from_millis(60), rx.changed()).await;
        assert!(notified.is_err());

        drop(rx);
        handle.await.unwrap();
    }
}
