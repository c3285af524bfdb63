use serde::Serialize;
use serde_repr::Serialize_repr;

#[derive(Debug, Copy, Clone, Serialize_repr)]
#[repr(u8)]
pub enum ApplicationCommandOptionType {
    String = 3,
}

/// Body of `POST /applications/{id}/commands`.
#[derive(Debug, Serialize)]
pub struct ApplicationCommand {
    pub name: String,
    pub description: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ApplicationCommandOption>,
}

#[derive(Debug, Serialize)]
pub struct ApplicationCommandOption {
    pub name: String,
    pub description: String,

    #[serde(rename = "type")]
    pub kind: ApplicationCommandOptionType,

    pub required: bool,
}

impl ApplicationCommand {
    /// The `/zoom` command with its optional `topic` string.
    pub fn zoom() -> Self {
        Self {
            name: "zoom".to_string(),
            description: "Create a Zoom meeting".to_string(),
            options: vec![ApplicationCommandOption {
                name: "topic".to_string(),
                description: "The topic of the meeting".to_string(),
                kind: ApplicationCommandOptionType::String,
                required: false,
            }],
        }
    }
}
