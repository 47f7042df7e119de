use super::context;
use crate::output::Output;
use color_eyre::Result;
use media_track_models::MediaKind;
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_detail(id: u64, kind: MediaKind, output: &Output) -> Result<()> {
    let (_paths, config) = context::load_paths_and_config()?;
    let catalog = context::catalog_client(&config)?;

    // The three lookups hit independent endpoints.
    let (detail, availability, certification) = futures::try_join!(
        catalog.detail(kind, id),
        catalog.watch_providers(kind, id),
        catalog.certification(kind, id),
    )?;

    match output.format() {
        crate::output::OutputFormat::Human => {
            let item = &detail.item;
            let year = item
                .release_year
                .map(|y| format!(" ({})", y))
                .unwrap_or_default();
            println!("\n{}{}", item.title.bright_cyan().bold(), year);

            let mut facts = vec![format!("{:.1}/10", item.rating)];
            if let Some(cert) = &certification {
                facts.push(cert.clone());
            }
            if !item.genres.is_empty() {
                facts.push(item.genres.join(", "));
            }
            println!("{}", facts.join("  ·  ").dimmed());

            if !item.overview.is_empty() {
                println!("\n{}", item.overview);
            }

            if !detail.cast.is_empty() {
                println!("\n{}", "Cast".bright_white().bold());
                for credit in detail.cast.iter().take(10) {
                    match &credit.character {
                        Some(character) if !character.is_empty() => {
                            println!("  {} as {}", credit.name, character.dimmed());
                        }
                        _ => println!("  {}", credit.name),
                    }
                }
            }

            let has_offers = !availability.stream.is_empty()
                || !availability.rent.is_empty()
                || !availability.buy.is_empty();
            if has_offers {
                println!("\n{}", "Where to watch".bright_white().bold());
                if !availability.stream.is_empty() {
                    println!("  Stream: {}", availability.stream.join(", "));
                }
                if !availability.rent.is_empty() {
                    println!("  Rent:   {}", availability.rent.join(", "));
                }
                if !availability.buy.is_empty() {
                    println!("  Buy:    {}", availability.buy.join(", "));
                }
            } else {
                println!(
                    "\nNo watch providers in region {}",
                    config.catalog.region
                );
            }
            println!();
        }
        _ => {
            let cast: Vec<serde_json::Value> = detail
                .cast
                .iter()
                .map(|c| json!({"name": c.name, "character": c.character}))
                .collect();
            output.json(&json!({
                "item": detail.item,
                "cast": cast,
                "certification": certification,
                "availability": {
                    "link": availability.link,
                    "stream": availability.stream,
                    "rent": availability.rent,
                    "buy": availability.buy,
                },
            }));
        }
    }

    Ok(())
}
