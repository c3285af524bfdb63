use anyhow::{bail, Context, Result};
use reqwest::{Client, StatusCode};
use tracing::info;

use crate::dal::model::application_command::ApplicationCommand;

const USER_AGENT: &str = "DiscordBot (https://github.com/discord-zoom-rs, 1)";

/// Registers application commands with the Discord REST API.
pub struct CommandRegistrar {
    client: Client,
    bot_token: String,
    api_base: String,
}

impl CommandRegistrar {
    pub fn new(client: Client, bot_token: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            client,
            bot_token: bot_token.into(),
            api_base: api_base.into(),
        }
    }

    pub async fn register(&self, application_id: &str, command: &ApplicationCommand) -> Result<()> {
        let url = format!("{}/applications/{}/commands", self.api_base, application_id);

        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bot {}", self.bot_token))
            .header("User-Agent", USER_AGENT)
            .json(command)
            .send()
            .await
            .context("Failed to send command registration request")?;

        let status = resp.status();
        info!("Command status: {}", status.as_u16());

        match status {
            StatusCode::OK | StatusCode::CREATED => {
                info!("Registered command /{}", command.name);
                Ok(())
            }
            other => {
                let body = resp.text().await.unwrap_or_default();
                bail!("Unable to register command: {}, body: {}", other, body)
            }
        }
    }
}
