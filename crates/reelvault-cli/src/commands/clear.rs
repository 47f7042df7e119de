use crate::output::Output;
use color_eyre::Result;
use media_track_config::PathManager;
use media_track_core::SessionCache;
use std::fs;

pub async fn run_clear(all: bool, cache: bool, credentials: bool, output: &Output) -> Result<()> {
    let paths = PathManager::default();

    if all {
        clear_cache(&paths, output)?;
        clear_credentials(&paths, output)?;
        output.success("All cache and credentials cleared");
        return Ok(());
    }

    let mut cleared_anything = false;

    if cache {
        clear_cache(&paths, output)?;
        cleared_anything = true;
    }

    if credentials {
        clear_credentials(&paths, output)?;
        cleared_anything = true;
    }

    if !cleared_anything {
        output.warn("No clear option specified. Use --cache, --credentials, or --all");
        output.println("\nExample: reelvault clear --cache");
    }

    Ok(())
}

fn clear_cache(paths: &PathManager, output: &Output) -> Result<()> {
    let cache_dir = paths.session_cache_dir();
    if cache_dir.exists() {
        SessionCache::new(&cache_dir)
            .clear_all()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to clear session cache: {}", e))?;
        output.success(format!("Cleared session cache: {}", cache_dir.display()));
    } else {
        output.info("No session cache found to clear");
    }
    Ok(())
}

fn clear_credentials(paths: &PathManager, output: &Output) -> Result<()> {
    let credentials_file = paths.credentials_file();
    if credentials_file.exists() {
        fs::remove_file(&credentials_file).map_err(|e| {
            color_eyre::eyre::eyre!(
                "Failed to remove credentials file at {}: {}",
                credentials_file.display(),
                e
            )
        })?;
        output.success(format!("Cleared credentials: {}", credentials_file.display()));
    } else {
        output.info("No credentials file found to clear");
    }
    Ok(())
}
