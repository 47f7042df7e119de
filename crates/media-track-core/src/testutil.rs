use async_trait::async_trait;
use media_track_models::{MediaItem, MediaKind, UserData};
use media_track_services::{
    Catalog, DiscoverQuery, Page, Person, ServiceError, UserDataPatch, UserDocumentStore,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

pub fn film(id: u64, title: &str, rating: f32, genres: &[&str]) -> MediaItem {
    MediaItem {
        id,
        title: title.to_string(),
        rating,
        poster: Some(format!("/{}.jpg", id)),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        overview: String::new(),
        kind: MediaKind::Film,
        release_year: Some(2010),
    }
}

pub fn series(id: u64, title: &str, rating: f32, genres: &[&str]) -> MediaItem {
    MediaItem {
        kind: MediaKind::Series,
        ..film(id, title, rating, genres)
    }
}

/// In-memory document store that records every write.
#[derive(Default)]
pub struct MemoryStore {
    doc: Mutex<Option<UserData>>,
    patches: Mutex<Vec<UserDataPatch>>,
    created: AtomicU32,
    fail_merges: AtomicBool,
}

impl MemoryStore {
    pub fn patches(&self) -> Vec<UserDataPatch> {
        self.patches.lock().unwrap().clone()
    }

    pub fn merge_count(&self) -> usize {
        self.patches.lock().unwrap().len()
    }

    pub fn created_count(&self) -> u32 {
        self.created.load(Ordering::SeqCst)
    }

    pub fn fail_merges(&self, fail: bool) {
        self.fail_merges.store(fail, Ordering::SeqCst);
    }

    pub fn document(&self) -> Option<UserData> {
        self.doc.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserDocumentStore for MemoryStore {
    async fn load(&self, _uid: &str) -> Result<Option<UserData>, ServiceError> {
        Ok(self.doc.lock().unwrap().clone())
    }

    async fn create(&self, _uid: &str, data: &UserData) -> Result<(), ServiceError> {
        self.created.fetch_add(1, Ordering::SeqCst);
        *self.doc.lock().unwrap() = Some(data.clone());
        Ok(())
    }

    async fn merge(&self, _uid: &str, patch: &UserDataPatch) -> Result<(), ServiceError> {
        if self.fail_merges.load(Ordering::SeqCst) {
            return Err(ServiceError::Auth("simulated write failure".to_string()));
        }
        self.patches.lock().unwrap().push(patch.clone());
        let mut doc = self.doc.lock().unwrap();
        let data = doc.get_or_insert_with(UserData::default);
        if let Some(prefs) = &patch.preferences {
            data.preferences = prefs.clone();
        }
        if let Some(list) = &patch.watchlist {
            data.watchlist = list.clone();
        }
        if let Some(list) = &patch.seen_list {
            data.seen_list = list.clone();
        }
        if let Some(list) = &patch.hidden {
            data.hidden = list.clone();
        }
        Ok(())
    }
}

/// Scriptable catalog fake. Pages are 1-based; `total_pages` follows the
/// scripted page count.
#[derive(Default)]
pub struct MockCatalog {
    pub popular_pages: Vec<Vec<MediaItem>>,
    pub search_results: HashMap<String, Vec<MediaItem>>,
    pub discover_pages: Vec<Vec<MediaItem>>,
    pub person: Option<Person>,
    pub discover_calls: Mutex<Vec<DiscoverQuery>>,
    pub fail_discover_from_page: Option<u32>,
    pub fail_person_search: bool,
}

fn page_of(pages: &[Vec<MediaItem>], page: u32) -> Page<MediaItem> {
    let total_pages = pages.len().max(1) as u32;
    let items = pages
        .get(page.saturating_sub(1) as usize)
        .cloned()
        .unwrap_or_default();
    Page {
        page,
        total_pages,
        items,
    }
}

#[async_trait]
impl Catalog for MockCatalog {
    async fn popular(&self, _kind: MediaKind, page: u32) -> Result<Page<MediaItem>, ServiceError> {
        Ok(page_of(&self.popular_pages, page))
    }

    async fn search(
        &self,
        _kind: MediaKind,
        query: &str,
        page: u32,
    ) -> Result<Page<MediaItem>, ServiceError> {
        let items = self.search_results.get(query).cloned().unwrap_or_default();
        Ok(page_of(&[items], page))
    }

    async fn search_person(&self, _query: &str) -> Result<Option<Person>, ServiceError> {
        if self.fail_person_search {
            return Err(ServiceError::Auth("person search unavailable".to_string()));
        }
        Ok(self.person.clone())
    }

    async fn discover(
        &self,
        _kind: MediaKind,
        query: &DiscoverQuery,
    ) -> Result<Page<MediaItem>, ServiceError> {
        if let Some(fail_from) = self.fail_discover_from_page {
            if query.page >= fail_from {
                return Err(ServiceError::Auth("discover unavailable".to_string()));
            }
        }
        self.discover_calls.lock().unwrap().push(query.clone());
        Ok(page_of(&self.discover_pages, query.page))
    }
}
