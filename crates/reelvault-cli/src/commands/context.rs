use chrono::Utc;
use color_eyre::Result;
use media_track_config::{Config, CredentialStore, PathManager};
use media_track_core::{Session, SessionCache};
use media_track_models::UserData;
use media_track_services::{sign_in, RestDocumentStore, TmdbClient, UserDocumentStore};
use std::sync::Arc;
use tracing::debug;

/// A signed-in session plus the handles the commands need around it.
pub struct UserContext {
    pub session: Session,
    pub store: Arc<dyn UserDocumentStore>,
    pub cache: SessionCache,
}

impl UserContext {
    /// Persist the current local state as the offline snapshot. Failures
    /// are logged and ignored; the snapshot is a convenience, not truth.
    pub fn snapshot(&self) {
        if let Err(e) = self.cache.save(self.session.user_id(), self.session.data()) {
            debug!("Failed to write session snapshot: {}", e);
        }
    }
}

pub fn load_paths_and_config() -> Result<(PathManager, Config)> {
    let paths = PathManager::default();
    let config_file = paths.config_file();
    let config = if config_file.exists() {
        Config::load_from_file(&config_file).map_err(|e| {
            color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e)
        })?
    } else {
        Config::default()
    };
    Ok((paths, config))
}

pub fn catalog_client(config: &Config) -> Result<Arc<TmdbClient>> {
    if !config.is_catalog_configured() {
        return Err(color_eyre::eyre::eyre!(
            "Catalog API key is not configured. Run 'reelvault config catalog' first."
        ));
    }
    Ok(Arc::new(TmdbClient::new(
        config.catalog.base_url.clone(),
        config.catalog.api_key.clone(),
        config.catalog.language.clone(),
        config.catalog.region.clone(),
        config.search.min_votes,
        config.recommend.min_votes,
    )))
}

/// Open a session against the remote document store for the signed-in user.
///
/// Refreshes the identity token first when the stored one has expired, and
/// writes a fresh offline snapshot after loading.
pub async fn open_user_session(paths: &PathManager, config: &Config) -> Result<UserContext> {
    let mut creds = CredentialStore::new(paths.credentials_file());
    creds
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials: {}", e))?;

    if !creds.is_signed_in() {
        return Err(color_eyre::eyre::eyre!(
            "Not signed in. Run 'reelvault login' first."
        ));
    }

    let expired = creds
        .get_token_expires()
        .map(|t| t <= Utc::now())
        .unwrap_or(true);
    if expired {
        debug!("Identity token expired, refreshing");
        let tokens = sign_in(&config.identity, creds.get_refresh_token().map(String::as_str))
            .await
            .map_err(|e| color_eyre::eyre::eyre!("Sign-in failed: {}", e))?;
        creds.set_user_id(tokens.user_id);
        creds.set_id_token(tokens.id_token);
        creds.set_refresh_token(tokens.refresh_token);
        creds.set_token_expires(tokens.expires_at);
        creds
            .save()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials: {}", e))?;
    }

    let uid = creds
        .get_user_id()
        .cloned()
        .ok_or_else(|| color_eyre::eyre::eyre!("Credentials are missing the user id"))?;
    let id_token = creds
        .get_id_token()
        .cloned()
        .ok_or_else(|| color_eyre::eyre::eyre!("Credentials are missing the identity token"))?;

    if config.store.base_url.is_empty() {
        return Err(color_eyre::eyre::eyre!(
            "Document store base_url is not configured. Run 'reelvault config identity' first."
        ));
    }

    let store: Arc<dyn UserDocumentStore> =
        Arc::new(RestDocumentStore::new(config.store.base_url.clone(), id_token));
    let session = Session::open(store.clone(), uid).await?;
    let cache = SessionCache::new(&paths.session_cache_dir());

    let context = UserContext {
        session,
        store,
        cache,
    };
    context.snapshot();
    Ok(context)
}

/// Best-effort read of the offline snapshot for the signed-in user, without
/// touching the network. None when signed out or no snapshot exists.
pub fn local_user_data(paths: &PathManager) -> Option<(String, UserData)> {
    let mut creds = CredentialStore::new(paths.credentials_file());
    creds.load().ok()?;
    let uid = creds.get_user_id()?.clone();
    let cache = SessionCache::new(&paths.session_cache_dir());
    cache.load(&uid).map(|data| (uid, data))
}
