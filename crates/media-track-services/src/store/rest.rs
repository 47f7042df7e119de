use crate::error::ServiceError;
use crate::store::{UserDataPatch, UserDocumentStore};
use async_trait::async_trait;
use media_track_models::UserData;
use reqwest::StatusCode;
use tracing::debug;

/// REST-backed document store. Documents are addressed by user id under
/// `{base_url}/users/{uid}`; requests carry the identity token as a bearer
/// header. GET reads, PUT creates, PATCH merge-writes.
pub struct RestDocumentStore {
    client: reqwest::Client,
    base_url: String,
    id_token: String,
}

impl RestDocumentStore {
    pub fn new(base_url: String, id_token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            id_token,
        }
    }

    fn document_url(&self, uid: &str) -> String {
        format!("{}/users/{}", self.base_url, urlencoding::encode(uid))
    }
}

#[async_trait]
impl UserDocumentStore for RestDocumentStore {
    async fn load(&self, uid: &str) -> Result<Option<UserData>, ServiceError> {
        let response = self
            .client
            .get(self.document_url(uid))
            .bearer_auth(&self.id_token)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(uid, "User document does not exist yet");
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Api {
                service: "store",
                status,
                body,
            });
        }

        let value: serde_json::Value = response.json().await?;
        let data: UserData = serde_json::from_value(value)?;
        Ok(Some(data))
    }

    async fn create(&self, uid: &str, data: &UserData) -> Result<(), ServiceError> {
        let response = self
            .client
            .put(self.document_url(uid))
            .bearer_auth(&self.id_token)
            .json(data)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Api {
                service: "store",
                status,
                body,
            });
        }
        debug!(uid, "Created user document with defaults");
        Ok(())
    }

    async fn merge(&self, uid: &str, patch: &UserDataPatch) -> Result<(), ServiceError> {
        if patch.is_empty() {
            return Ok(());
        }
        let response = self
            .client
            .patch(self.document_url(uid))
            .bearer_auth(&self.id_token)
            .json(patch)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Api {
                service: "store",
                status,
                body,
            });
        }
        Ok(())
    }
}
