use anyhow::{anyhow, Result};
use chrono::{DateTime, Duration, Utc};
use media_track_config::IdentityConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

const REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";

#[derive(Debug, Serialize, Deserialize)]
struct TokenResponse {
    user_id: String,
    id_token: String,
    refresh_token: String,
    expires_in: u64,
}

/// Tokens and identity established by a federated sign-in.
#[derive(Debug)]
pub struct SessionTokens {
    pub user_id: String,
    pub id_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Federated sign-in against the identity provider.
///
/// Tries the refresh-token grant first when one is stored; otherwise walks
/// the user through the authorize-then-paste-code flow.
pub async fn sign_in(config: &IdentityConfig, refresh_token: Option<&str>) -> Result<SessionTokens> {
    let client = Client::new();

    if let Some(refresh_token) = refresh_token {
        match refresh_session(&client, config, refresh_token).await {
            Ok(tokens) => return Ok(tokens),
            Err(e) => {
                // Refresh failed, fall through to new authorization
                debug!("Token refresh failed, starting new sign-in: {}", e);
            }
        }
    }

    authorize_new(&client, config).await
}

async fn refresh_session(
    client: &Client,
    config: &IdentityConfig,
    refresh_token: &str,
) -> Result<SessionTokens> {
    let payload = serde_json::json!({
        "refresh_token": refresh_token,
        "client_id": config.client_id,
        "grant_type": "refresh_token"
    });

    let response = client
        .post(&config.token_url)
        .json(&payload)
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(anyhow!("Token refresh failed: {}", response.status()));
    }

    let token_response: TokenResponse = response.json().await?;
    Ok(into_session(token_response))
}

async fn authorize_new(client: &Client, config: &IdentityConfig) -> Result<SessionTokens> {
    let auth_url = format!(
        "{}?response_type=code&client_id={}&redirect_uri={}",
        config.authorize_url,
        urlencoding::encode(&config.client_id),
        urlencoding::encode(REDIRECT_URI)
    );

    println!("\nPlease visit the following URL to sign in:");
    println!("{}\n", auth_url);

    use std::io::{self, Write};
    print!("Please enter the authorization code from the URL: ");
    io::stdout().flush()?;

    let mut code = String::new();
    io::stdin().read_line(&mut code)?;
    let code = code.trim();

    if code.is_empty() {
        return Err(anyhow!("Authorization code cannot be empty"));
    }

    let payload = serde_json::json!({
        "code": code,
        "client_id": config.client_id,
        "redirect_uri": REDIRECT_URI,
        "grant_type": "authorization_code"
    });

    let response = client
        .post(&config.token_url)
        .json(&payload)
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(anyhow!(
            "Failed to exchange authorization code: {} - {}",
            status,
            error_text
        ));
    }

    let token_response: TokenResponse = response.json().await?;
    Ok(into_session(token_response))
}

fn into_session(token_response: TokenResponse) -> SessionTokens {
    // Renew two minutes before the provider-reported expiry
    let expires_at = Utc::now() + Duration::seconds(token_response.expires_in as i64 - 120);
    SessionTokens {
        user_id: token_response.user_id,
        id_token: token_response.id_token,
        refresh_token: token_response.refresh_token,
        expires_at,
    }
}
