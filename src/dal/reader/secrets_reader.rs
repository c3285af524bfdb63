use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_secretsmanager::Client;
use serde_json::Value;

use crate::config::SecretRef;

/// Source of secret values. Every call goes to the backing store.
#[async_trait]
pub trait SecretStore: Send + Sync {
    async fn read_secret(&self, secret: &SecretRef) -> Result<String>;
}

/// Reads JSON secrets from AWS Secrets Manager.
#[derive(Clone)]
pub struct SecretsReader {
    client: Client,
}

impl SecretsReader {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn fetch_secret_json(&self, secret_id: &str) -> Result<Value> {
        let response = self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .context("Failed to retrieve secret value from Secrets Manager")?;

        let secret_str = response
            .secret_string()
            .context("Secret value is missing or not a string")?;

        serde_json::from_str(secret_str).context("Failed to parse secret string as JSON")
    }
}

#[async_trait]
impl SecretStore for SecretsReader {
    async fn read_secret(&self, secret: &SecretRef) -> Result<String> {
        let json = self.fetch_secret_json(&secret.secret_id).await?;

        extract_key(&json, &secret.key)
    }
}

fn extract_key(json: &Value, key: &str) -> Result<String> {
    json.get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .context(format!("Key '{}' not found in secret JSON", key))
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::HashMap;

    /// In-memory store keyed by `(secret_id, key)`.
    #[derive(Default)]
    pub struct StaticSecrets {
        values: HashMap<(String, String), String>,
    }

    impl StaticSecrets {
        pub fn with(mut self, secret: &SecretRef, value: impl Into<String>) -> Self {
            self.values.insert(
                (secret.secret_id.clone(), secret.key.clone()),
                value.into(),
            );
            self
        }
    }

    #[async_trait]
    impl SecretStore for StaticSecrets {
        async fn read_secret(&self, secret: &SecretRef) -> Result<String> {
            self.values
                .get(&(secret.secret_id.clone(), secret.key.clone()))
                .cloned()
                .with_context(|| format!("Secret '{}' is unavailable", secret.secret_id))
        }
    }
}
