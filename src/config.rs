//! Dispatcher configuration.
//!
//! Loaded from JSON; every field has a default so an empty object is a valid config.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatcherConfig {
    /// Mask push tokens in log output (default true).
    #[serde(default = "default_redact_tokens")]
    pub redact_tokens: bool,

    /// Payload keys used to recognise call invitations.
    #[serde(default)]
    pub call_payload: CallPayloadKeys,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            redact_tokens: default_redact_tokens(),
            call_payload: CallPayloadKeys::default(),
        }
    }
}

fn default_redact_tokens() -> bool {
    true
}

/// Which payload keys carry the call-invitation fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CallPayloadKeys {
    pub type_key: String,
    /// Values of `type_key` that mark a payload as a call invitation.
    pub invite_types: Vec<String>,
    pub session_id_key: String,
    pub caller_key: String,
    pub caller_name_key: String,
    pub video_key: String,
}

impl Default for CallPayloadKeys {
    fn default() -> Self {
        Self {
            type_key: "type".to_string(),
            invite_types: vec!["call_invite".to_string()],
            session_id_key: "sessionId".to_string(),
            caller_key: "caller".to_string(),
            caller_name_key: "callerName".to_string(),
            video_key: "isVideo".to_string(),
        }
    }
}

impl DispatcherConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let keys = &self.call_payload;
        let required = [
            ("callPayload.typeKey", &keys.type_key),
            ("callPayload.sessionIdKey", &keys.session_id_key),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must not be empty".to_string(),
                });
            }
        }
        if keys.invite_types.iter().all(|t| t.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                field: "callPayload.inviteTypes",
                reason: "at least one invite type is required".to_string(),
            });
        }
        Ok(())
    }
}
