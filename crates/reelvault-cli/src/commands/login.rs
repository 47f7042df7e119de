use super::context;
use crate::output::Output;
use color_eyre::Result;
use media_track_config::CredentialStore;
use media_track_core::{Session, SessionCache};
use media_track_services::{sign_in, RestDocumentStore, UserDocumentStore};
use std::sync::Arc;

pub async fn run_login(output: &Output) -> Result<()> {
    let (paths, config) = context::load_paths_and_config()?;

    if !config.is_identity_configured() {
        output.error("Identity provider is not configured.");
        output.info("Run 'reelvault config identity' to set the client id and endpoints.");
        return Err(color_eyre::eyre::eyre!("Identity provider not configured"));
    }

    let mut creds = CredentialStore::new(paths.credentials_file());
    creds
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials: {}", e))?;

    let tokens = sign_in(&config.identity, creds.get_refresh_token().map(String::as_str))
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Sign-in failed: {}", e))?;

    let uid = tokens.user_id.clone();
    creds.set_user_id(tokens.user_id);
    creds.set_id_token(tokens.id_token.clone());
    creds.set_refresh_token(tokens.refresh_token);
    creds.set_token_expires(tokens.expires_at);
    creds
        .save()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials: {}", e))?;

    // First sign-in creates the user document with default preferences.
    let store: Arc<dyn UserDocumentStore> = Arc::new(RestDocumentStore::new(
        config.store.base_url.clone(),
        tokens.id_token,
    ));
    let session = Session::open(store, uid.clone()).await?;

    let cache = SessionCache::new(&paths.session_cache_dir());
    if let Err(e) = cache.save(&uid, session.data()) {
        tracing::debug!("Failed to write session snapshot: {}", e);
    }

    output.success(format!("Signed in as {}", uid));
    Ok(())
}

pub async fn run_logout(output: &Output) -> Result<()> {
    let (paths, _config) = context::load_paths_and_config()?;

    let mut creds = CredentialStore::new(paths.credentials_file());
    creds
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials: {}", e))?;

    if !creds.is_signed_in() {
        output.info("Not signed in, nothing to do");
        return Ok(());
    }

    // Drop the offline snapshot along with the tokens; local state resets
    // to defaults on sign-out.
    if let Some(uid) = creds.get_user_id().cloned() {
        let cache = SessionCache::new(&paths.session_cache_dir());
        if let Err(e) = cache.clear(&uid) {
            output.warn(format!("Failed to remove session snapshot: {}", e));
        }
    }

    for key in [
        "identity_user_id",
        "identity_id_token",
        "identity_refresh_token",
        "identity_token_expires",
    ] {
        creds.remove(key);
    }
    creds
        .save()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials: {}", e))?;

    output.success("Signed out");
    Ok(())
}
