pub mod genre;
pub mod media;
pub mod preferences;
pub mod seen;
pub mod user_data;

pub use genre::{genre_id, genre_label, translate_genre, FILM_GENRES, SERIES_GENRES};
pub use media::{MediaItem, MediaKind};
pub use preferences::{Theme, UserPreferences};
pub use seen::SeenEntry;
pub use user_data::UserData;
