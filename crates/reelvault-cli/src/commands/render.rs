use comfy_table::{Cell, Table};
use media_track_models::{MediaItem, SeenEntry};

fn base_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    let cells: Vec<Cell> = headers
        .into_iter()
        .map(|h| {
            Cell::new(h)
                .fg(comfy_table::Color::Cyan)
                .add_attribute(comfy_table::Attribute::Bold)
        })
        .collect();
    table.set_header(cells);
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn year_cell(item: &MediaItem) -> String {
    item.release_year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn media_table<'a>(items: impl IntoIterator<Item = &'a MediaItem>) -> Table {
    let mut table = base_table(vec!["ID", "Title", "Kind", "Year", "Rating", "Genres"]);
    for item in items {
        table.add_row(vec![
            item.id.to_string(),
            item.title.clone(),
            item.kind.label().to_string(),
            year_cell(item),
            format!("{:.1}", item.rating),
            item.genres.join(", "),
        ]);
    }
    table
}

pub fn seen_table<'a>(entries: impl IntoIterator<Item = &'a SeenEntry>) -> Table {
    let mut table = base_table(vec!["ID", "Title", "Kind", "Year", "My Rating", "Genres"]);
    for entry in entries {
        table.add_row(vec![
            entry.item.id.to_string(),
            entry.item.title.clone(),
            entry.item.kind.label().to_string(),
            year_cell(&entry.item),
            format!("{}/10", entry.rating),
            entry.item.genres.join(", "),
        ]);
    }
    table
}

pub fn scored_table<'a>(
    rows: impl IntoIterator<Item = (&'a MediaItem, f32)>,
) -> Table {
    let mut table = base_table(vec!["Score", "ID", "Title", "Year", "Rating", "Genres"]);
    for (item, score) in rows {
        table.add_row(vec![
            format!("{:.2}", score),
            item.id.to_string(),
            item.title.clone(),
            year_cell(item),
            format!("{:.1}", item.rating),
            item.genres.join(", "),
        ]);
    }
    table
}
