use lambda_http::{run, service_fn, Error};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod bal;
pub mod config;
pub mod dal;
pub mod error;
pub mod http_handler;

use crate::{
    bal::{
        discord::command_registrar::CommandRegistrar,
        route::{command_router::CommandRouter, interaction_router::InteractionRouter},
        zoom::meeting_provisioner::ZoomProvisioner,
    },
    config::Config,
    dal::{
        model::application_command::ApplicationCommand,
        reader::secrets_reader::{SecretStore, SecretsReader},
    },
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    info!("Authorized users {:?}", config.authorized_users.usernames());

    if config.authorized_users.is_empty() {
        warn!("DISCORD_USERNAMES is empty, every /zoom request will be denied");
    }

    if !config.verify_all_interactions {
        warn!("Signatures are only verified for ping interactions");
    }

    let shared_config = aws_config::load_from_env().await;
    let secrets: Arc<dyn SecretStore> = Arc::new(SecretsReader::new(
        aws_sdk_secretsmanager::Client::new(&shared_config),
    ));
    let http_client = reqwest::Client::new();

    register_commands(&config, secrets.as_ref(), &http_client).await?;

    let provisioner = ZoomProvisioner::new(
        http_client,
        secrets.clone(),
        config.zoom.clone(),
        config.zoom_oauth_base.clone(),
        config.zoom_api_base.clone(),
    );

    let router = Arc::new(
        InteractionRouter::new(
            CommandRouter::new(config.authorized_users.clone(), Arc::new(provisioner)),
            secrets,
            config.discord_public_key.clone(),
        )
        .with_verify_all_interactions(config.verify_all_interactions)
        .with_print_input(config.print_input),
    );

    run(service_fn(move |event| {
        let router = router.clone();
        async move { http_handler::function_handler(event, &router).await }
    }))
    .await
}

/// An unreadable bot token aborts startup; a rejected registration does not.
async fn register_commands(
    config: &Config,
    secrets: &dyn SecretStore,
    http_client: &reqwest::Client,
) -> Result<(), Error> {
    let bot_token = secrets.read_secret(&config.discord_bot_token).await?;

    let registrar = CommandRegistrar::new(
        http_client.clone(),
        bot_token,
        config.discord_api_base.clone(),
    );

    if let Err(e) = registrar
        .register(&config.discord_client_id, &ApplicationCommand::zoom())
        .await
    {
        warn!("Unable to register command: {:#}", e);
    }

    Ok(())
}
