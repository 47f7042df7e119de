use crate::error::CoreError;
use media_track_models::{MediaItem, SeenEntry, UserData, UserPreferences};
use media_track_services::{UserDataPatch, UserDocumentStore};
use std::sync::Arc;
use tracing::{debug, warn};

/// Where an item sits relative to the user's lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipState {
    Untracked,
    Watchlist,
    Seen(u8),
    Hidden,
}

/// A signed-in user's live view of their document, plus the transitions
/// that mutate it.
///
/// Every transition is one optimistic local mutation paired with one
/// best-effort merge write. A failed write is logged and the local state
/// stands; there is no retry and no rollback beyond what the store's
/// merge-write gives us.
pub struct Session {
    user_id: String,
    data: UserData,
    store: Arc<dyn UserDocumentStore>,
}

impl Session {
    /// Load the user's document, creating it with defaults on first sign-in.
    pub async fn open(store: Arc<dyn UserDocumentStore>, user_id: String) -> Result<Self, CoreError> {
        let data = match store.load(&user_id).await? {
            Some(data) => data,
            None => {
                let defaults = UserData::default();
                store.create(&user_id, &defaults).await?;
                debug!(user = %user_id, "Created user document with defaults");
                defaults
            }
        };
        Ok(Self {
            user_id,
            data,
            store,
        })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn data(&self) -> &UserData {
        &self.data
    }

    /// Overwrite local state with a pushed document. Last-writer-wins.
    pub fn apply_remote(&mut self, data: UserData) {
        self.data = data;
    }

    pub fn state_of(&self, id: u64) -> MembershipState {
        if let Some(rating) = self.data.seen_rating(id) {
            MembershipState::Seen(rating)
        } else if self.data.on_watchlist(id) {
            MembershipState::Watchlist
        } else if self.data.is_hidden(id) {
            MembershipState::Hidden
        } else {
            MembershipState::Untracked
        }
    }

    /// Add to the watchlist. Idempotent: an id already on any list is left
    /// alone and the call reports false.
    pub async fn add_to_watchlist(&mut self, item: MediaItem) -> bool {
        if self.data.tracked_ids().contains(&item.id) {
            return false;
        }
        self.data.watchlist.push(item);
        self.commit(UserDataPatch::watchlist(self.data.watchlist.clone()))
            .await;
        true
    }

    /// Mark an item seen with a rating. Removal from the watchlist or the
    /// hidden list and insertion into the seen list land in the same patch,
    /// so the move is atomic from the caller's perspective.
    pub async fn mark_seen(&mut self, item: MediaItem, rating: u8) -> Result<(), CoreError> {
        validate_rating(rating)?;
        if self.data.is_seen(item.id) {
            return self.rate(item.id, rating).await;
        }

        let was_listed = self.data.on_watchlist(item.id);
        let was_hidden = self.data.is_hidden(item.id);
        self.data.watchlist.retain(|m| m.id != item.id);
        self.data.hidden.retain(|m| m.id != item.id);
        self.data.seen_list.push(SeenEntry { item, rating });

        let patch = UserDataPatch {
            seen_list: Some(self.data.seen_list.clone()),
            watchlist: was_listed.then(|| self.data.watchlist.clone()),
            hidden: was_hidden.then(|| self.data.hidden.clone()),
            ..UserDataPatch::default()
        };
        self.commit(patch).await;
        Ok(())
    }

    /// Change the rating on an already-seen item.
    pub async fn rate(&mut self, id: u64, rating: u8) -> Result<(), CoreError> {
        validate_rating(rating)?;
        let entry = self
            .data
            .seen_list
            .iter_mut()
            .find(|e| e.item.id == id)
            .ok_or(CoreError::NotSeen(id))?;
        entry.rating = rating;
        self.commit(UserDataPatch::seen_list(self.data.seen_list.clone()))
            .await;
        Ok(())
    }

    pub async fn remove_seen(&mut self, id: u64) -> bool {
        let before = self.data.seen_list.len();
        self.data.seen_list.retain(|e| e.item.id != id);
        if self.data.seen_list.len() == before {
            return false;
        }
        self.commit(UserDataPatch::seen_list(self.data.seen_list.clone()))
            .await;
        true
    }

    pub async fn remove_from_watchlist(&mut self, id: u64) -> bool {
        let before = self.data.watchlist.len();
        self.data.watchlist.retain(|m| m.id != id);
        if self.data.watchlist.len() == before {
            return false;
        }
        self.commit(UserDataPatch::watchlist(self.data.watchlist.clone()))
            .await;
        true
    }

    /// Mark "not interested". Seen items cannot be hidden; a watchlisted
    /// item leaves the watchlist in the same patch.
    pub async fn hide(&mut self, item: MediaItem) -> bool {
        if self.data.is_seen(item.id) || self.data.is_hidden(item.id) {
            return false;
        }
        let was_listed = self.data.on_watchlist(item.id);
        self.data.watchlist.retain(|m| m.id != item.id);
        self.data.hidden.push(item);

        let patch = UserDataPatch {
            hidden: Some(self.data.hidden.clone()),
            watchlist: was_listed.then(|| self.data.watchlist.clone()),
            ..UserDataPatch::default()
        };
        self.commit(patch).await;
        true
    }

    /// Restore a hidden item to the untracked state.
    pub async fn restore(&mut self, id: u64) -> bool {
        let before = self.data.hidden.len();
        self.data.hidden.retain(|m| m.id != id);
        if self.data.hidden.len() == before {
            return false;
        }
        self.commit(UserDataPatch::hidden(self.data.hidden.clone()))
            .await;
        true
    }

    pub async fn update_preferences(&mut self, prefs: UserPreferences) {
        self.data.preferences = prefs.clone();
        self.commit(UserDataPatch::preferences(prefs)).await;
    }

    async fn commit(&self, patch: UserDataPatch) {
        if let Err(e) = self.store.merge(&self.user_id, &patch).await {
            warn!(user = %self.user_id, "Merge write failed, keeping local state: {}", e);
        }
    }
}

fn validate_rating(rating: u8) -> Result<(), CoreError> {
    if (1..=10).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::InvalidRating(rating))
    }
}
