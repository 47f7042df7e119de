use super::{context, prompts};
use crate::output::Output;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use dialoguer::MultiSelect;
use media_track_config::{Config, PathManager};
use media_track_models::{UserPreferences, FILM_GENRES};
use serde_json::json;

pub async fn run_config(cmd: crate::ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show { full } => show_config(full, output).await,
        crate::ConfigCommands::Catalog { api_key } => configure_catalog(api_key, output).await,
        crate::ConfigCommands::Identity { client_id } => {
            configure_identity(client_id, output).await
        }
        crate::ConfigCommands::Prefs => configure_prefs(output).await,
    }
}

fn mask(value: &str, full: bool) -> String {
    if value.is_empty() {
        "(not set)".to_string()
    } else if full {
        value.to_string()
    } else if value.len() > 8 {
        format!("{}...{}", &value[..4], &value[value.len() - 4..])
    } else {
        "****".to_string()
    }
}

fn section_table(title: &str) -> Table {
    let mut table = Table::new();
    table.set_header(vec![Cell::new(title)
        .fg(comfy_table::Color::Cyan)
        .add_attribute(comfy_table::Attribute::Bold)]);
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

async fn show_config(full: bool, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config_file = paths.config_file();

    if !config_file.exists() {
        output.warn(format!(
            "Configuration file not found at: {}",
            config_file.display()
        ));
        output.info("Run 'reelvault config catalog' or 'reelvault config identity' to create it.");
        return Ok(());
    }

    let config = Config::load_from_file(&config_file).map_err(|e| {
        color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e)
    })?;

    match output.format() {
        crate::output::OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            output.info(format!("Config file: {}\n", config_file.display()));

            let mut catalog = section_table("Catalog");
            catalog.add_row(vec!["API key", &mask(&config.catalog.api_key, full)]);
            catalog.add_row(vec!["Base URL", &config.catalog.base_url]);
            catalog.add_row(vec!["Language", &config.catalog.language]);
            catalog.add_row(vec!["Region", &config.catalog.region]);
            println!("{catalog}");

            let mut identity = section_table("Identity");
            identity.add_row(vec!["Client id", &mask(&config.identity.client_id, full)]);
            identity.add_row(vec!["Token URL", &config.identity.token_url]);
            identity.add_row(vec!["Authorize URL", &config.identity.authorize_url]);
            println!("{identity}");

            let mut store = section_table("Document store");
            store.add_row(vec!["Base URL", &config.store.base_url]);
            store.add_row(vec![
                "Watch interval",
                &format!("{}s", config.store.watch_interval_secs),
            ]);
            println!("{store}");

            let mut recommend = section_table("Recommendations");
            recommend.add_row(vec!["Pool target", &config.recommend.pool_target.to_string()]);
            recommend.add_row(vec!["Page limit", &config.recommend.page_limit.to_string()]);
            recommend.add_row(vec![
                "Result count",
                &config.recommend.result_count.to_string(),
            ]);
            recommend.add_row(vec!["Min votes", &config.recommend.min_votes.to_string()]);
            println!("{recommend}");
        }
        _ => {
            output.json(&json!({
                "config_file": config_file.display().to_string(),
                "catalog": {
                    "api_key": mask(&config.catalog.api_key, full),
                    "base_url": config.catalog.base_url,
                    "language": config.catalog.language,
                    "region": config.catalog.region,
                },
                "identity": {
                    "client_id": mask(&config.identity.client_id, full),
                    "token_url": config.identity.token_url,
                    "authorize_url": config.identity.authorize_url,
                },
                "store": {
                    "base_url": config.store.base_url,
                    "watch_interval_secs": config.store.watch_interval_secs,
                },
                "recommend": {
                    "pool_target": config.recommend.pool_target,
                    "page_limit": config.recommend.page_limit,
                    "result_count": config.recommend.result_count,
                    "min_votes": config.recommend.min_votes,
                },
            }));
        }
    }

    Ok(())
}

async fn configure_catalog(api_key: Option<String>, output: &Output) -> Result<()> {
    let (paths, mut config) = context::load_paths_and_config()?;

    let api_key = match api_key {
        Some(key) => key,
        None => prompts::prompt_string("Catalog API key", None)?,
    };
    if api_key.trim().is_empty() {
        return Err(color_eyre::eyre::eyre!("API key cannot be empty"));
    }
    config.catalog.api_key = api_key.trim().to_string();

    let language =
        prompts::prompt_string("Display language", Some(&config.catalog.language))?;
    if !language.trim().is_empty() {
        config.catalog.language = language.trim().to_string();
    }
    let region = prompts::prompt_string("Region", Some(&config.catalog.region))?;
    if !region.trim().is_empty() {
        config.catalog.region = region.trim().to_string();
    }

    config
        .save_to_file(&paths.config_file())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save config: {}", e))?;
    output.success("Catalog configuration saved");
    Ok(())
}

async fn configure_identity(client_id: Option<String>, output: &Output) -> Result<()> {
    let (paths, mut config) = context::load_paths_and_config()?;

    let client_id = match client_id {
        Some(id) => id,
        None => prompts::prompt_string("Identity client id", None)?,
    };
    if client_id.trim().is_empty() {
        return Err(color_eyre::eyre::eyre!("Client id cannot be empty"));
    }
    config.identity.client_id = client_id.trim().to_string();

    config.identity.token_url = prompts::prompt_string(
        "Token endpoint URL",
        Some(&config.identity.token_url),
    )?
    .trim()
    .to_string();
    config.identity.authorize_url = prompts::prompt_string(
        "Authorize endpoint URL",
        Some(&config.identity.authorize_url),
    )?
    .trim()
    .to_string();
    config.store.base_url = prompts::prompt_string(
        "Document store base URL",
        Some(&config.store.base_url),
    )?
    .trim()
    .to_string();

    config
        .save_to_file(&paths.config_file())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save config: {}", e))?;
    output.success("Identity configuration saved");
    Ok(())
}

/// Edit stored preferences. These live in the user document, not the local
/// config file, so this requires being signed in.
async fn configure_prefs(output: &Output) -> Result<()> {
    let (paths, config) = context::load_paths_and_config()?;
    let mut ctx = context::open_user_session(&paths, &config).await?;

    let current = ctx.session.data().preferences.clone();

    let labels: Vec<&str> = FILM_GENRES.iter().map(|(_, label)| *label).collect();
    let checked: Vec<bool> = labels
        .iter()
        .map(|label| current.genres.iter().any(|g| g.eq_ignore_ascii_case(label)))
        .collect();

    let selection = MultiSelect::new()
        .with_prompt("Favorite genres (space to toggle, enter to confirm)")
        .items(&labels)
        .defaults(&checked)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read selection: {}", e))?;
    let genres: Vec<String> = selection
        .into_iter()
        .map(|i| labels[i].to_string())
        .collect();

    let min_rating =
        prompts::prompt_threshold("Minimum rating for recommendations", current.min_rating)?;

    let mut theme = current.theme;
    let background =
        prompts::prompt_string("Theme background color", Some(&theme.background))?;
    if !background.trim().is_empty() {
        theme.background = background.trim().to_string();
    }
    let text = prompts::prompt_string("Theme text color", Some(&theme.text))?;
    if !text.trim().is_empty() {
        theme.text = text.trim().to_string();
    }

    ctx.session
        .update_preferences(UserPreferences {
            min_rating,
            genres,
            theme,
        })
        .await;
    ctx.snapshot();

    output.success("Preferences saved");
    Ok(())
}
