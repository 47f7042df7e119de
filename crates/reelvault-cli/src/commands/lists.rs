use super::{context, render};
use crate::output::Output;
use clap::ValueEnum;
use color_eyre::Result;
use media_track_core::ListFilter;
use media_track_models::UserData;
use media_track_services::spawn_watch;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListName {
    Watchlist,
    Seen,
    Hidden,
}

pub async fn run_lists(
    list: ListName,
    title: Option<String>,
    genre: Option<String>,
    follow: bool,
    output: &Output,
) -> Result<()> {
    let (paths, config) = context::load_paths_and_config()?;
    let filter = ListFilter { title, genre };

    let mut ctx = match context::open_user_session(&paths, &config).await {
        Ok(ctx) => ctx,
        Err(err) => {
            if follow {
                return Err(err);
            }
            // Offline fallback: render the last synchronized snapshot.
            let Some((_, data)) = context::local_user_data(&paths) else {
                return Err(err);
            };
            output.warn(format!("Store unreachable ({}), showing cached snapshot", err));
            render_list(list, &filter, &data, output)?;
            return Ok(());
        }
    };

    render_list(list, &filter, ctx.session.data(), output)?;

    if follow {
        let (mut rx, _handle) = spawn_watch(
            ctx.store.clone(),
            ctx.session.user_id().to_string(),
            Duration::from_secs(config.store.watch_interval_secs),
            ctx.session.data().clone(),
        );
        output.info("Watching for remote changes (Ctrl-C to stop)");
        while rx.changed().await.is_ok() {
            let data = rx.borrow().clone();
            ctx.session.apply_remote(data.clone());
            ctx.snapshot();
            render_list(list, &filter, &data, output)?;
        }
    }

    Ok(())
}

fn render_list(
    list: ListName,
    filter: &ListFilter,
    data: &UserData,
    output: &Output,
) -> Result<()> {
    match output.format() {
        crate::output::OutputFormat::Human => {
            let (table, count) = match list {
                ListName::Watchlist => {
                    let items = filter.apply(&data.watchlist);
                    (render::media_table(items.iter().copied()), items.len())
                }
                ListName::Seen => {
                    let entries = filter.apply_seen(&data.seen_list);
                    (render::seen_table(entries.iter().copied()), entries.len())
                }
                ListName::Hidden => {
                    let items = filter.apply(&data.hidden);
                    (render::media_table(items.iter().copied()), items.len())
                }
            };
            if count == 0 {
                output.info("No results");
            } else {
                output.println(table.to_string());
            }
        }
        _ => {
            let value = match list {
                ListName::Watchlist => serde_json::to_value(filter.apply(&data.watchlist))?,
                ListName::Seen => serde_json::to_value(filter.apply_seen(&data.seen_list))?,
                ListName::Hidden => serde_json::to_value(filter.apply(&data.hidden))?,
            };
            output.json(&value);
        }
    }
    Ok(())
}
