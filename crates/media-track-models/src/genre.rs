use crate::media::MediaKind;

/// Film genre vocabulary: catalog genre id paired with its display label.
pub const FILM_GENRES: &[(u64, &str)] = &[
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Science Fiction"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
];

/// Series genre vocabulary. The catalog uses a different (partially
/// overlapping) id space and labeling for series records.
pub const SERIES_GENRES: &[(u64, &str)] = &[
    (10759, "Action & Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (10762, "Kids"),
    (9648, "Mystery"),
    (10763, "News"),
    (10764, "Reality"),
    (10765, "Sci-Fi & Fantasy"),
    (10766, "Soap"),
    (10767, "Talk"),
    (10768, "War & Politics"),
    (37, "Western"),
];

fn table(kind: MediaKind) -> &'static [(u64, &'static str)] {
    match kind {
        MediaKind::Film => FILM_GENRES,
        MediaKind::Series => SERIES_GENRES,
    }
}

/// Look up the display label for a genre id within a kind's vocabulary.
pub fn genre_label(kind: MediaKind, id: u64) -> Option<&'static str> {
    table(kind).iter().find(|(gid, _)| *gid == id).map(|(_, name)| *name)
}

/// Look up the genre id for a display label within a kind's vocabulary.
pub fn genre_id(kind: MediaKind, label: &str) -> Option<u64> {
    table(kind)
        .iter()
        .find(|(_, name)| name.eq_ignore_ascii_case(label))
        .map(|(gid, _)| *gid)
}

/// Cross-kind label pairs (film label, series label) for genres that exist in
/// both vocabularies under different names.
const CROSS_KIND: &[(&str, &str)] = &[
    ("Action", "Action & Adventure"),
    ("Adventure", "Action & Adventure"),
    ("Fantasy", "Sci-Fi & Fantasy"),
    ("Science Fiction", "Sci-Fi & Fantasy"),
    ("War", "War & Politics"),
    ("History", "War & Politics"),
    ("Family", "Kids"),
];

/// Translate a genre label from one kind's vocabulary to the other's.
///
/// Labels shared verbatim by both vocabularies translate to themselves.
/// Labels with a counterpart under a different name go through the fixed
/// pair table. Labels with no counterpart (e.g. "Horror" for series) return
/// None and contribute nothing when remapped.
pub fn translate_genre(label: &str, from: MediaKind, to: MediaKind) -> Option<&'static str> {
    if from == to {
        return table(to)
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(label))
            .map(|(_, name)| *name);
    }
    if let Some((_, name)) = table(to)
        .iter()
        .find(|(_, name)| name.eq_ignore_ascii_case(label))
    {
        return Some(name);
    }
    match from {
        MediaKind::Film => CROSS_KIND
            .iter()
            .find(|(film, _)| film.eq_ignore_ascii_case(label))
            .map(|(_, series)| *series),
        MediaKind::Series => CROSS_KIND
            .iter()
            .find(|(_, series)| series.eq_ignore_ascii_case(label))
            .map(|(film, _)| *film),
    }
}
