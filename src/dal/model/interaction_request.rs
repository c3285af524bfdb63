use serde::Deserialize;
use serde_repr::Deserialize_repr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize_repr)]
#[repr(u8)]
pub enum InteractionType {
    Ping = 1,
    ApplicationCommand = 2,

    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
pub struct InteractionRequest {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(rename = "type")]
    pub interaction_type: InteractionType,

    #[serde(default)]
    pub data: Option<ApplicationCommandData>,

    #[serde(default)]
    pub member: Option<Member>,

    /// Set instead of `member` when the command is invoked in a DM.
    #[serde(default)]
    pub user: Option<User>,
}

impl InteractionRequest {
    pub fn command_name(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.name.as_str())
    }

    pub fn username(&self) -> Option<&str> {
        self.member
            .as_ref()
            .map(|m| &m.user)
            .or(self.user.as_ref())
            .map(|u| u.username.as_str())
    }
}

#[derive(Debug, Deserialize)]
pub struct ApplicationCommandData {
    pub name: String,

    #[serde(default)]
    pub options: Vec<CommandOption>,
}

impl ApplicationCommandData {
    /// Value of the first option called `name`, if that value is a string.
    pub fn string_option(&self, name: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|opt| opt.name == name)
            .and_then(|opt| opt.value.as_ref())
            .and_then(|val| val.as_str())
    }
}

#[derive(Debug, Deserialize)]
pub struct CommandOption {
    pub name: String,

    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct Member {
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub struct User {
    pub username: String,
}
