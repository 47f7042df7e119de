use crate::error::ServiceError;
use async_trait::async_trait;
use media_track_models::{MediaItem, MediaKind};

/// One page of a paginated catalog response.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub page: u32,
    pub total_pages: u32,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

/// A person-entity hit from the catalog's person search.
#[derive(Debug, Clone)]
pub struct Person {
    pub id: u64,
    pub name: String,
}

/// Server-side candidate filtering for discovery requests. Results come
/// back sorted by popularity.
#[derive(Debug, Clone, Default)]
pub struct DiscoverQuery {
    pub genre_ids: Vec<u64>,
    pub year_from: Option<u32>,
    pub year_to: Option<u32>,
    pub cast_id: Option<u64>,
    pub page: u32,
}

/// The remote media catalog, as the core sees it. The concrete client is a
/// black-box REST consumer; tests substitute in-memory fakes.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn popular(&self, kind: MediaKind, page: u32) -> Result<Page<MediaItem>, ServiceError>;

    async fn search(
        &self,
        kind: MediaKind,
        query: &str,
        page: u32,
    ) -> Result<Page<MediaItem>, ServiceError>;

    /// Most relevant person entity for the query, if any.
    async fn search_person(&self, query: &str) -> Result<Option<Person>, ServiceError>;

    async fn discover(
        &self,
        kind: MediaKind,
        query: &DiscoverQuery,
    ) -> Result<Page<MediaItem>, ServiceError>;
}
