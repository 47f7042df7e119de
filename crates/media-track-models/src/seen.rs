use crate::media::MediaItem;
use serde::{Deserialize, Serialize};

/// A catalog item the user has watched, with their own 1-10 rating.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeenEntry {
    pub item: MediaItem,
    pub rating: u8,
}
