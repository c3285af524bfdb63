use std::sync::Arc;
use tracing::{error, info, warn};

use crate::{
    bal::zoom::meeting_provisioner::MeetingProvisioner,
    config::AuthorizedUsers,
    dal::model::{interaction_request::InteractionRequest, interaction_response::InteractionResponse},
    error::InteractionError,
};

pub const ZOOM_COMMAND: &str = "zoom";
pub const TOPIC_OPTION: &str = "topic";

pub struct CommandRouter {
    authorized_users: AuthorizedUsers,
    provisioner: Arc<dyn MeetingProvisioner>,
}

impl CommandRouter {
    pub fn new(authorized_users: AuthorizedUsers, provisioner: Arc<dyn MeetingProvisioner>) -> Self {
        Self {
            authorized_users,
            provisioner,
        }
    }

    /// Handles `/zoom`. Unknown commands are a 400; everything else,
    /// including denial and Zoom failures, is a normal chat reply.
    pub async fn handle_command(
        &self,
        interaction: &InteractionRequest,
    ) -> Result<InteractionResponse, InteractionError> {
        let cmd_data = match interaction.data.as_ref() {
            Some(d) if d.name == ZOOM_COMMAND => d,
            _ => {
                warn!("Rejecting unknown command {:?}", interaction.command_name());
                return Err(InteractionError::BadRequest("invalid command".to_string()));
            }
        };

        let username = interaction.username().unwrap_or_default();

        if !self.authorized_users.contains(username) {
            warn!(
                "User {} is not authorized to create a Zoom meeting",
                username
            );
            return Ok(InteractionResponse::not_authorized());
        }

        let topic = cmd_data.string_option(TOPIC_OPTION).unwrap_or_default();

        match self.provisioner.create_meeting(topic).await {
            Ok(meeting) => {
                info!("Created a Zoom call for: {}", meeting.topic);
                Ok(InteractionResponse::meeting_created(&meeting))
            }
            Err(e) => {
                error!("Failed to create Zoom meeting for {}: {}", username, e);
                Ok(InteractionResponse::meeting_failed(&e))
            }
        }
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use crate::{dal::model::zoom::ZoomMeeting, error::ZoomError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every topic it is asked for and answers with a fixed outcome.
    pub struct RecordingProvisioner {
        pub topics: Mutex<Vec<String>>,
        fail_with: Option<String>,
    }

    impl RecordingProvisioner {
        pub fn succeeding() -> Self {
            Self {
                topics: Mutex::new(Vec::new()),
                fail_with: None,
            }
        }

        pub fn failing(body: &str) -> Self {
            Self {
                topics: Mutex::new(Vec::new()),
                fail_with: Some(body.to_string()),
            }
        }

        pub fn calls(&self) -> Vec<String> {
            self.topics.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MeetingProvisioner for RecordingProvisioner {
        async fn create_meeting(&self, topic: &str) -> Result<ZoomMeeting, ZoomError> {
            self.topics.lock().unwrap().push(topic.to_string());

            if let Some(body) = &self.fail_with {
                return Err(ZoomError::TokenRequest(body.clone()));
            }

            Ok(ZoomMeeting {
                id: 123,
                topic: topic.to_string(),
                password: "ab12cd34".to_string(),
                join_url: "https://zoom.us/j/123".to_string(),
            })
        }
    }
}
