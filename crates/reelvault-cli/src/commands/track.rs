use super::context;
use crate::output::Output;
use color_eyre::Result;
use media_track_core::MembershipState;
use media_track_models::{MediaItem, MediaKind};

async fn fetch_item(
    config: &media_track_config::Config,
    kind: MediaKind,
    id: u64,
) -> Result<MediaItem> {
    let catalog = context::catalog_client(config)?;
    let detail = catalog.detail(kind, id).await?;
    Ok(detail.item)
}

pub async fn run_add(id: u64, kind: MediaKind, output: &Output) -> Result<()> {
    let (paths, config) = context::load_paths_and_config()?;
    let mut ctx = context::open_user_session(&paths, &config).await?;

    let item = fetch_item(&config, kind, id).await?;
    let title = item.title.clone();
    if ctx.session.add_to_watchlist(item).await {
        ctx.snapshot();
        output.success(format!("Added '{}' to your watchlist", title));
    } else {
        let where_it_sits = match ctx.session.state_of(id) {
            MembershipState::Seen(rating) => format!("already seen (rated {}/10)", rating),
            MembershipState::Hidden => "hidden".to_string(),
            _ => "already on your watchlist".to_string(),
        };
        output.info(format!("'{}' is {}", title, where_it_sits));
    }
    Ok(())
}

pub async fn run_seen(id: u64, kind: MediaKind, rating: u8, output: &Output) -> Result<()> {
    let (paths, config) = context::load_paths_and_config()?;
    let mut ctx = context::open_user_session(&paths, &config).await?;

    let item = fetch_item(&config, kind, id).await?;
    let title = item.title.clone();
    ctx.session.mark_seen(item, rating).await?;
    ctx.snapshot();
    output.success(format!("Marked '{}' seen, rated {}/10", title, rating));
    Ok(())
}

pub async fn run_rate(id: u64, rating: u8, output: &Output) -> Result<()> {
    let (paths, config) = context::load_paths_and_config()?;
    let mut ctx = context::open_user_session(&paths, &config).await?;

    ctx.session.rate(id, rating).await?;
    ctx.snapshot();
    output.success(format!("Rating updated to {}/10", rating));
    Ok(())
}

pub async fn run_remove(id: u64, output: &Output) -> Result<()> {
    let (paths, config) = context::load_paths_and_config()?;
    let mut ctx = context::open_user_session(&paths, &config).await?;

    if ctx.session.remove_from_watchlist(id).await {
        ctx.snapshot();
        output.success("Removed from your watchlist");
    } else if ctx.session.remove_seen(id).await {
        ctx.snapshot();
        output.success("Removed from your seen list");
    } else {
        output.warn("Item is not on your watchlist or seen list");
    }
    Ok(())
}

pub async fn run_hide(id: u64, kind: MediaKind, output: &Output) -> Result<()> {
    let (paths, config) = context::load_paths_and_config()?;
    let mut ctx = context::open_user_session(&paths, &config).await?;

    let item = fetch_item(&config, kind, id).await?;
    let title = item.title.clone();
    if ctx.session.hide(item).await {
        ctx.snapshot();
        output.success(format!("'{}' will no longer appear in search or recommendations", title));
    } else {
        output.warn(format!("'{}' cannot be hidden (already seen or hidden)", title));
    }
    Ok(())
}

pub async fn run_restore(id: u64, output: &Output) -> Result<()> {
    let (paths, config) = context::load_paths_and_config()?;
    let mut ctx = context::open_user_session(&paths, &config).await?;

    if ctx.session.restore(id).await {
        ctx.snapshot();
        output.success("Item restored");
    } else {
        output.warn("Item is not on your hidden list");
    }
    Ok(())
}
