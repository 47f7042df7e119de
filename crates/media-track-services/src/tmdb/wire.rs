use media_track_models::{genre_label, MediaItem, MediaKind};
use serde::Deserialize;

/// Paginated envelope shared by the catalog's listing endpoints.
#[derive(Debug, Deserialize)]
pub struct PageEnvelope {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page")]
    pub total_pages: u32,
    #[serde(default)]
    pub results: Vec<ListEntry>,
}

fn default_page() -> u32 {
    1
}

/// A raw listing record. Film and series records use different field names
/// for the same concepts (title/name, release_date/first_air_date), so
/// everything is optional and validated during conversion.
#[derive(Debug, Deserialize)]
pub struct ListEntry {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub vote_count: u32,
    pub poster_path: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
    #[serde(default)]
    pub overview: String,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub media_type: Option<String>,
}

pub fn parse_year(date: Option<&str>) -> Option<u32> {
    date.and_then(|d| d.get(0..4)).and_then(|y| y.parse().ok())
}

impl ListEntry {
    /// Validate and convert a raw record into a `MediaItem`.
    ///
    /// Records without an id or poster, or with a vote count at or below
    /// `vote_floor`, are dropped rather than surfaced half-empty. Genre ids
    /// that are not in the kind's vocabulary are skipped.
    pub fn into_media_item(self, fallback_kind: MediaKind, vote_floor: u32) -> Option<MediaItem> {
        let id = self.id?;
        let poster = self.poster_path?;
        if self.vote_count <= vote_floor {
            return None;
        }

        // Multi-kind search tags each record with its own kind
        let kind = match self.media_type.as_deref() {
            Some("movie") => MediaKind::Film,
            Some("tv") => MediaKind::Series,
            Some(_) => return None,
            None => fallback_kind,
        };

        let title = match kind {
            MediaKind::Film => self.title.or(self.name),
            MediaKind::Series => self.name.or(self.title),
        }?;

        let genres = self
            .genre_ids
            .iter()
            .filter_map(|gid| genre_label(kind, *gid))
            .map(str::to_string)
            .collect();

        let release_year = parse_year(
            self.release_date
                .as_deref()
                .or(self.first_air_date.as_deref()),
        );

        Some(MediaItem {
            id,
            title,
            rating: self.vote_average,
            poster: Some(poster),
            genres,
            overview: self.overview,
            kind,
            release_year,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct PersonPageEnvelope {
    #[serde(default)]
    pub results: Vec<PersonEntry>,
}

#[derive(Debug, Deserialize)]
pub struct PersonEntry {
    pub id: Option<u64>,
    pub name: Option<String>,
    #[serde(default)]
    pub popularity: f32,
}

#[derive(Debug, Deserialize)]
pub struct DetailEnvelope {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    pub poster_path: Option<String>,
    #[serde(default)]
    pub genres: Vec<GenreEntry>,
    #[serde(default)]
    pub overview: String,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub credits: Option<CreditsEnvelope>,
}

#[derive(Debug, Deserialize)]
pub struct GenreEntry {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreditsEnvelope {
    #[serde(default)]
    pub cast: Vec<CastEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CastEntry {
    pub name: Option<String>,
    pub character: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProvidersEnvelope {
    #[serde(default)]
    pub results: std::collections::HashMap<String, RegionOffers>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RegionOffers {
    pub link: Option<String>,
    #[serde(default)]
    pub flatrate: Vec<ProviderEntry>,
    #[serde(default)]
    pub rent: Vec<ProviderEntry>,
    #[serde(default)]
    pub buy: Vec<ProviderEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ProviderEntry {
    #[serde(default)]
    pub provider_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ReleaseDatesEnvelope {
    #[serde(default)]
    pub results: Vec<RegionReleases>,
}

#[derive(Debug, Deserialize)]
pub struct RegionReleases {
    #[serde(default)]
    pub iso_3166_1: String,
    #[serde(default)]
    pub release_dates: Vec<ReleaseEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ReleaseEntry {
    #[serde(default)]
    pub certification: String,
}

#[derive(Debug, Deserialize)]
pub struct ContentRatingsEnvelope {
    #[serde(default)]
    pub results: Vec<ContentRatingEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ContentRatingEntry {
    #[serde(default)]
    pub iso_3166_1: String,
    #[serde(default)]
    pub rating: String,
}
