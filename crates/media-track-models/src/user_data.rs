use crate::media::MediaItem;
use crate::preferences::UserPreferences;
use crate::seen::SeenEntry;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The per-user document held by the remote store. The client keeps a
/// live-updated projection of it for the session; the store is the sole
/// source of truth.
///
/// Each list is unique by item id. An id never appears in both watchlist
/// and seen_list: marking seen moves the item instead of copying it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserData {
    #[serde(default)]
    pub preferences: UserPreferences,
    #[serde(default)]
    pub watchlist: Vec<MediaItem>,
    #[serde(default)]
    pub seen_list: Vec<SeenEntry>,
    #[serde(default)]
    pub hidden: Vec<MediaItem>,
}

impl UserData {
    pub fn is_seen(&self, id: u64) -> bool {
        self.seen_list.iter().any(|e| e.item.id == id)
    }

    pub fn on_watchlist(&self, id: u64) -> bool {
        self.watchlist.iter().any(|m| m.id == id)
    }

    pub fn is_hidden(&self, id: u64) -> bool {
        self.hidden.iter().any(|m| m.id == id)
    }

    pub fn seen_rating(&self, id: u64) -> Option<u8> {
        self.seen_list.iter().find(|e| e.item.id == id).map(|e| e.rating)
    }

    /// All ids on any list. Items in this set never reappear in search,
    /// browse, or recommendation output.
    pub fn tracked_ids(&self) -> HashSet<u64> {
        self.seen_list
            .iter()
            .map(|e| e.item.id)
            .chain(self.watchlist.iter().map(|m| m.id))
            .chain(self.hidden.iter().map(|m| m.id))
            .collect()
    }
}
