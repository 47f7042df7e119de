use super::{context, render};
use crate::output::Output;
use color_eyre::Result;
use media_track_core::{filter_untracked, BrowseContext, Browser};
use media_track_models::MediaKind;

pub async fn run_search(
    query: String,
    kind: MediaKind,
    all_kinds: bool,
    pages: u32,
    include_tracked: bool,
    output: &Output,
) -> Result<()> {
    let (paths, config) = context::load_paths_and_config()?;
    let catalog = context::catalog_client(&config)?;

    let mut has_more = false;
    let mut items = if all_kinds && !query.trim().is_empty() {
        let mut collected: Vec<media_track_models::MediaItem> = Vec::new();
        for page in 1..=pages {
            let result = catalog.search_multi(query.trim(), page).await?;
            has_more = result.has_more();
            for item in result.items {
                if collected.iter().all(|known| known.id != item.id) {
                    collected.push(item);
                }
            }
            if !has_more {
                break;
            }
        }
        collected
    } else {
        let mut browser = Browser::new(catalog, kind);
        browser.refine(&query).await?;
        for _ in 1..pages {
            if !browser.load_more().await? {
                break;
            }
        }
        if let BrowseContext::Cast(person) = browser.context() {
            output.info(format!("Showing items featuring {}", person.name));
        }
        has_more = browser.has_more();
        browser.items().to_vec()
    };
    // Search only shows what the user can still act on; tracked items are
    // filtered against the offline snapshot so this works signed out too.
    if !include_tracked {
        if let Some((_, data)) = context::local_user_data(&paths) {
            items = filter_untracked(items, &data);
        }
    }

    if items.is_empty() {
        output.info("No results");
        return Ok(());
    }

    match output.format() {
        crate::output::OutputFormat::Human => {
            output.println(render::media_table(&items).to_string());
            if has_more {
                output.info("More results available, pass --pages to fetch more");
            }
        }
        _ => {
            output.json(&serde_json::to_value(&items)?);
        }
    }

    Ok(())
}
