use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    bal::auth::verify::verify_discord_request,
    config::SecretRef,
    dal::{
        model::{
            interaction_request::{InteractionRequest, InteractionType},
            interaction_response::InteractionResponse,
        },
        reader::secrets_reader::SecretStore,
    },
    error::InteractionError,
};

use super::command_router::CommandRouter;

/// The parts of an inbound request the router needs.
#[derive(Debug, Clone, Copy)]
pub struct SignedRequest<'a> {
    pub signature: &'a str,
    pub timestamp: &'a str,
    pub body: &'a [u8],
}

pub struct InteractionRouter {
    command_router: CommandRouter,
    secrets: Arc<dyn SecretStore>,
    public_key: SecretRef,
    verify_all_interactions: bool,
    print_input: bool,
}

impl InteractionRouter {
    pub fn new(
        command_router: CommandRouter,
        secrets: Arc<dyn SecretStore>,
        public_key: SecretRef,
    ) -> Self {
        Self {
            command_router,
            secrets,
            public_key,
            verify_all_interactions: false,
            print_input: false,
        }
    }

    pub fn with_verify_all_interactions(mut self, enabled: bool) -> Self {
        self.verify_all_interactions = enabled;
        self
    }

    pub fn with_print_input(mut self, enabled: bool) -> Self {
        self.print_input = enabled;
        self
    }

    pub async fn route(
        &self,
        request: SignedRequest<'_>,
    ) -> Result<InteractionResponse, InteractionError> {
        if self.print_input {
            info!("Input\n{}", String::from_utf8_lossy(request.body));
        }

        let interaction: InteractionRequest = serde_json::from_slice(request.body)
            .map_err(|e| InteractionError::BadRequest(e.to_string()))?;

        debug!(
            "Interaction {} of type {:?}",
            interaction.id.as_deref().unwrap_or("-"),
            interaction.interaction_type
        );

        let is_ping = interaction.interaction_type == InteractionType::Ping;

        // Commands are only verified when explicitly enabled.
        if is_ping || self.verify_all_interactions {
            self.verify(request).await?;
        }

        if is_ping {
            info!("Ping verified");
            return Ok(InteractionResponse::pong());
        }

        self.command_router.handle_command(&interaction).await
    }

    async fn verify(&self, request: SignedRequest<'_>) -> Result<(), InteractionError> {
        let public_key = self
            .secrets
            .read_secret(&self.public_key)
            .await
            .map_err(|e| InteractionError::Internal(format!("{e:#}")))?;

        verify_discord_request(
            request.signature,
            request.timestamp,
            request.body,
            &public_key,
        )
        .map_err(|e| {
            warn!("Signature verification failed: {:#}", e);
            InteractionError::Authentication(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bal::{
            auth::verify::testing::{public_key_hex, sign},
            route::command_router::testing::RecordingProvisioner,
        },
        config::AuthorizedUsers,
        dal::{
            model::interaction_response::InteractionCallbackType,
            reader::secrets_reader::testing::StaticSecrets,
        },
    };

    const TIMESTAMP: &str = "1700000000";
    const COMMAND: &str = r#"{"type":2,"data":{"name":"zoom","options":[{"name":"topic","value":"Weekly Sync"}]},"member":{"user":{"username":"alice"}}}"#;

    fn key_ref() -> SecretRef {
        SecretRef::new("arn:discord-public-key", "key")
    }

    fn router_with(
        provisioner: Arc<RecordingProvisioner>,
        secrets: StaticSecrets,
    ) -> InteractionRouter {
        InteractionRouter::new(
            CommandRouter::new(AuthorizedUsers::parse("alice"), provisioner),
            Arc::new(secrets),
            key_ref(),
        )
    }

    fn router(provisioner: Arc<RecordingProvisioner>) -> InteractionRouter {
        router_with(provisioner, StaticSecrets::default().with(&key_ref(), public_key_hex()))
    }

    #[tokio::test]
    async fn test_signed_ping_is_ponged() {
        let body = br#"{"type":1}"#;
        let signature = sign(TIMESTAMP, body);

        let resp = router(Arc::new(RecordingProvisioner::succeeding()))
            .route(SignedRequest {
                signature: &signature,
                timestamp: TIMESTAMP,
                body,
            })
            .await
            .unwrap();

        assert_eq!(resp.kind, InteractionCallbackType::Pong);
        assert!(resp.data.is_none());
    }

    #[tokio::test]
    async fn test_unsigned_ping_is_rejected() {
        let err = router(Arc::new(RecordingProvisioner::succeeding()))
            .route(SignedRequest {
                signature: "",
                timestamp: TIMESTAMP,
                body: br#"{"type":1}"#,
            })
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 401);
    }

    #[tokio::test]
    async fn test_ping_without_public_key_is_internal_error() {
        let body = br#"{"type":1}"#;
        let signature = sign(TIMESTAMP, body);

        let err = router_with(
            Arc::new(RecordingProvisioner::succeeding()),
            StaticSecrets::default(),
        )
        .route(SignedRequest {
            signature: &signature,
            timestamp: TIMESTAMP,
            body,
        })
        .await
        .unwrap_err();

        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let provisioner = Arc::new(RecordingProvisioner::succeeding());

        let bodies: [&[u8]; 3] = [b"not json", br#"{"data":{}}"#, br#"{"type":"ping"}"#];

        for body in bodies {
            let err = router(provisioner.clone())
                .route(SignedRequest {
                    signature: "",
                    timestamp: "",
                    body,
                })
                .await
                .unwrap_err();

            assert!(matches!(err, InteractionError::BadRequest(_)));
        }

        assert!(provisioner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_command_skips_verification_by_default() {
        let provisioner = Arc::new(RecordingProvisioner::succeeding());

        let resp = router(provisioner.clone())
            .route(SignedRequest {
                signature: "",
                timestamp: "",
                body: COMMAND.as_bytes(),
            })
            .await
            .unwrap();

        assert_eq!(resp.kind, InteractionCallbackType::ChannelMessageWithSource);
        assert_eq!(provisioner.calls(), vec!["Weekly Sync"]);
    }

    #[tokio::test]
    async fn test_verify_all_rejects_unsigned_command() {
        let provisioner = Arc::new(RecordingProvisioner::succeeding());

        let err = router(provisioner.clone())
            .with_verify_all_interactions(true)
            .route(SignedRequest {
                signature: "",
                timestamp: "",
                body: COMMAND.as_bytes(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 401);
        assert!(provisioner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_verify_all_accepts_signed_command() {
        let provisioner = Arc::new(RecordingProvisioner::succeeding());
        let signature = sign(TIMESTAMP, COMMAND.as_bytes());

        let resp = router(provisioner.clone())
            .with_verify_all_interactions(true)
            .with_print_input(true)
            .route(SignedRequest {
                signature: &signature,
                timestamp: TIMESTAMP,
                body: COMMAND.as_bytes(),
            })
            .await
            .unwrap();

        assert!(resp.content().unwrap().contains("Meeting ID: 123"));
        assert_eq!(provisioner.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_type_takes_command_path() {
        let err = router(Arc::new(RecordingProvisioner::succeeding()))
            .route(SignedRequest {
                signature: "",
                timestamp: "",
                body: br#"{"type":3}"#,
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "invalid command");
    }
}
