use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    bal::zoom::password::generate_password,
    config::{SecretRef, ZoomSecrets},
    dal::{
        model::zoom::{MeetingRequest, ZoomMeeting, ZoomToken},
        reader::secrets_reader::SecretStore,
    },
    error::ZoomError,
};

/// Creates one meeting per call. Any failure aborts the whole operation.
#[async_trait]
pub trait MeetingProvisioner: Send + Sync {
    async fn create_meeting(&self, topic: &str) -> Result<ZoomMeeting, ZoomError>;
}

/// Talks to Zoom with server-to-server OAuth. Credentials and tokens are
/// fetched fresh on every call.
pub struct ZoomProvisioner {
    client: Client,
    secrets: Arc<dyn SecretStore>,
    credentials: ZoomSecrets,
    oauth_base: String,
    api_base: String,
}

impl ZoomProvisioner {
    pub fn new(
        client: Client,
        secrets: Arc<dyn SecretStore>,
        credentials: ZoomSecrets,
        oauth_base: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            client,
            secrets,
            credentials,
            oauth_base: oauth_base.into(),
            api_base: api_base.into(),
        }
    }

    async fn read_secret(&self, secret: &SecretRef) -> Result<String, ZoomError> {
        self.secrets
            .read_secret(secret)
            .await
            .map_err(|e| ZoomError::Secret(format!("{e:#}")))
    }

    async fn request_token(
        &self,
        account_id: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<ZoomToken, ZoomError> {
        let url = format!("{}/oauth/token", self.oauth_base);

        let resp = self
            .client
            .post(&url)
            .basic_auth(client_id, Some(client_secret))
            .query(&[
                ("grant_type", "account_credentials"),
                ("account_id", account_id),
            ])
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();

        if status != StatusCode::OK {
            return Err(ZoomError::TokenRequest(body));
        }

        let token: ZoomToken = serde_json::from_str(&body)?;
        debug!("Zoom token acquired, expires in {}s", token.expires_in);

        Ok(token)
    }
}

#[async_trait]
impl MeetingProvisioner for ZoomProvisioner {
    async fn create_meeting(&self, topic: &str) -> Result<ZoomMeeting, ZoomError> {
        let account_id = self.read_secret(&self.credentials.account_id).await?;
        let client_id = self.read_secret(&self.credentials.client_id).await?;
        let client_secret = self.read_secret(&self.credentials.client_secret).await?;

        let token = self
            .request_token(&account_id, &client_id, &client_secret)
            .await?;

        let request = MeetingRequest::scheduled(topic, generate_password());
        let url = format!("{}/users/me/meetings", self.api_base);

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&token.access_token)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();

        if status != StatusCode::CREATED {
            return Err(ZoomError::MeetingRequest {
                status: status.as_u16(),
                body,
            });
        }

        let meeting: ZoomMeeting = serde_json::from_str(&body)?;
        info!("Zoom meeting {} created", meeting.id);

        Ok(meeting)
    }
}
