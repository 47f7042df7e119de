use super::{context, render};
use crate::output::Output;
use color_eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use media_track_core::{recommend, RecommendRequest};
use media_track_models::MediaKind;
use std::io::IsTerminal;
use std::time::Duration;

pub async fn run_recommend(
    kind: MediaKind,
    genres: Vec<String>,
    from: Option<u32>,
    to: Option<u32>,
    limit: Option<usize>,
    output: &Output,
) -> Result<()> {
    let (paths, config) = context::load_paths_and_config()?;
    let catalog = context::catalog_client(&config)?;
    let ctx = context::open_user_session(&paths, &config).await?;

    let spinner = if std::io::stdout().is_terminal() && !output.is_quiet() {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.set_message("Scoring candidates...");
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let request = RecommendRequest {
        kind,
        genres,
        year_from: from,
        year_to: to,
        limit,
    };
    let ranked = recommend(
        catalog.as_ref(),
        ctx.session.data(),
        &request,
        &config.recommend,
    )
    .await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let ranked = ranked?;

    if ranked.is_empty() {
        output.info("No results");
        return Ok(());
    }

    match output.format() {
        crate::output::OutputFormat::Human => {
            let rows = ranked.iter().map(|s| (&s.item, s.score));
            output.println(render::scored_table(rows).to_string());
        }
        _ => {
            output.json(&serde_json::to_value(&ranked)?);
        }
    }

    Ok(())
}
