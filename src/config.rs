//! Handler configuration.
//!
//! Loaded once from environment variables at process start and passed
//! into the request handler. Only secret identifiers live here; secret
//! values are read from the secret store when needed.

use std::collections::{HashMap, HashSet};
use std::env;
use std::fmt;
use thiserror::Error;

pub const DEFAULT_DISCORD_API_BASE: &str = "https://discord.com/api/v10";
pub const DEFAULT_ZOOM_OAUTH_BASE: &str = "https://zoom.us";
pub const DEFAULT_ZOOM_API_BASE: &str = "https://api.zoom.us/v2";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {name}: '{value}'")]
    InvalidValue { name: String, value: String },
}

/// Usernames allowed to create meetings. Matching is exact and case-sensitive.
#[derive(Debug, Clone, Default)]
pub struct AuthorizedUsers(HashSet<String>);

impl AuthorizedUsers {
    /// Parses a comma-separated list, trimming entries and dropping empty ones.
    pub fn parse(list: &str) -> Self {
        Self(
            list.split(',')
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn contains(&self, username: &str) -> bool {
        self.0.contains(username)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sorted copy of the usernames, for logging.
    pub fn usernames(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.0.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// A single value inside a JSON secret: the secret id plus the key to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretRef {
    pub secret_id: String,
    pub key: String,
}

impl SecretRef {
    pub fn new(secret_id: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            secret_id: secret_id.into(),
            key: key.into(),
        }
    }
}

/// The three Zoom server-to-server OAuth credentials.
#[derive(Debug, Clone)]
pub struct ZoomSecrets {
    pub account_id: SecretRef,
    pub client_id: SecretRef,
    pub client_secret: SecretRef,
}

impl ZoomSecrets {
    pub fn from_secret_id(secret_id: &str) -> Self {
        Self {
            account_id: SecretRef::new(secret_id, "account_id"),
            client_id: SecretRef::new(secret_id, "client_id"),
            client_secret: SecretRef::new(secret_id, "client_secret"),
        }
    }
}

#[derive(Clone)]
pub struct Config {
    /// Discord application id, used to register the `/zoom` command.
    pub discord_client_id: String,

    pub authorized_users: AuthorizedUsers,

    /// Hex-encoded Ed25519 public key of the Discord application.
    pub discord_public_key: SecretRef,

    pub discord_bot_token: SecretRef,

    pub zoom: ZoomSecrets,

    /// Log raw request bodies.
    pub print_input: bool,

    /// Verify signatures on every interaction rather than only on pings.
    pub verify_all_interactions: bool,

    pub discord_api_base: String,
    pub zoom_oauth_base: String,
    pub zoom_api_base: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("discord_client_id", &self.discord_client_id)
            .field("authorized_users", &self.authorized_users.len())
            .field("discord_public_key", &self.discord_public_key.secret_id)
            .field("discord_bot_token", &self.discord_bot_token.secret_id)
            .field("zoom", &self.zoom.account_id.secret_id)
            .field("print_input", &self.print_input)
            .field("verify_all_interactions", &self.verify_all_interactions)
            .field("discord_api_base", &self.discord_api_base)
            .field("zoom_oauth_base", &self.zoom_oauth_base)
            .field("zoom_api_base", &self.zoom_api_base)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a map (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let required = |name: &str| -> Result<String, ConfigError> {
            vars.get(name)
                .filter(|v| !v.trim().is_empty())
                .cloned()
                .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
        };

        let optional = |name: &str, default: &str| -> String {
            vars.get(name)
                .filter(|v| !v.trim().is_empty())
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|| default.to_string())
        };

        let discord_client_id = required("DISCORD_CLIENT_ID")?;

        let authorized_users = vars
            .get("DISCORD_USERNAMES")
            .map(|v| AuthorizedUsers::parse(v))
            .unwrap_or_default();

        let discord_public_key =
            SecretRef::new(required("DISCORD_PUBLIC_KEY_SECRET_ARN")?, "key");
        let discord_bot_token = SecretRef::new(required("DISCORD_TOKEN_SECRET_ARN")?, "token");
        let zoom = ZoomSecrets::from_secret_id(&required("ZOOM_SECRET_ARN")?);

        Ok(Self {
            discord_client_id,
            authorized_users,
            discord_public_key,
            discord_bot_token,
            zoom,
            print_input: parse_flag(vars, "PRINT_INPUT")?,
            verify_all_interactions: parse_flag(vars, "VERIFY_ALL_INTERACTIONS")?,
            discord_api_base: optional("DISCORD_API_BASE", DEFAULT_DISCORD_API_BASE),
            zoom_oauth_base: optional("ZOOM_OAUTH_BASE", DEFAULT_ZOOM_OAUTH_BASE),
            zoom_api_base: optional("ZOOM_API_BASE", DEFAULT_ZOOM_API_BASE),
        })
    }
}

fn parse_flag(vars: &HashMap<String, String>, name: &str) -> Result<bool, ConfigError> {
    let Some(value) = vars.get(name) else {
        return Ok(false);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "0" => Ok(false),
        "true" | "1" => Ok(true),
        _ => Err(ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.clone(),
        }),
    }
}
