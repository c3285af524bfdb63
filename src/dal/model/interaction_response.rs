use serde::Serialize;
use serde_repr::Serialize_repr;

use crate::dal::model::zoom::ZoomMeeting;

pub const NOT_AUTHORIZED_MESSAGE: &str =
    "Sorry, you're not authorized to create a Zoom meeting right now.";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize_repr)]
#[repr(u8)]
pub enum InteractionCallbackType {
    Pong = 1,
    ChannelMessageWithSource = 4,
}

#[derive(Debug, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: InteractionCallbackType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<InteractionCallbackData>,
}

#[derive(Debug, Serialize)]
pub struct InteractionCallbackData {
    pub content: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Serialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub url: String,

    #[serde(rename = "type")]
    pub kind: String,
}

impl InteractionResponse {
    pub fn pong() -> Self {
        Self {
            kind: InteractionCallbackType::Pong,
            data: None,
        }
    }

    pub fn message(content: impl Into<String>) -> Self {
        Self {
            kind: InteractionCallbackType::ChannelMessageWithSource,
            data: Some(InteractionCallbackData {
                content: content.into(),
                embeds: Vec::new(),
            }),
        }
    }

    pub fn not_authorized() -> Self {
        Self::message(NOT_AUTHORIZED_MESSAGE)
    }

    pub fn meeting_created(meeting: &ZoomMeeting) -> Self {
        let content = format!(
            "A Zoom meeting has been created\n\nTopic: {}\nMeeting ID: {}\nPassword: {}\n",
            meeting.topic, meeting.id, meeting.password
        );

        Self {
            kind: InteractionCallbackType::ChannelMessageWithSource,
            data: Some(InteractionCallbackData {
                content,
                embeds: vec![Embed {
                    title: meeting.topic.clone(),
                    description: "Join the Zoom call".to_string(),
                    url: meeting.join_url.clone(),
                    kind: "link".to_string(),
                }],
            }),
        }
    }

    pub fn meeting_failed(error: impl std::fmt::Display) -> Self {
        Self::message(format!(
            "Sorry, we couldn't create the Zoom meeting, error: {}",
            error
        ))
    }
}

#[cfg(test)]
impl InteractionResponse {
    pub fn content(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.content.as_str())
    }
}
