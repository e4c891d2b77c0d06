//! Call invitations carried in push payload data.

use super::error::CallPayloadError;
use crate::config::CallPayloadKeys;
use crate::types::push::PayloadData;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CallMedia {
    #[default]
    Audio,
    Video,
}

impl fmt::Display for CallMedia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallMedia::Audio => f.write_str("audio"),
            CallMedia::Video => f.write_str("video"),
        }
    }
}

/// An incoming voice/video session request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallInvitation {
    pub session_id: String,
    /// The value of the type key that marked this payload as an invitation.
    pub invite_type: String,
    pub caller: Option<String>,
    pub caller_name: Option<String>,
    pub media: CallMedia,
}

impl CallInvitation {
    /// Quick check on the type key alone, without validating the rest.
    pub fn is_invitation(data: &PayloadData, keys: &CallPayloadKeys) -> bool {
        data.get(&keys.type_key)
            .is_some_and(|t| keys.invite_types.iter().any(|i| i == t))
    }

    /// Parse payload data into an invitation.
    ///
    /// The type key must carry one of the configured invite types and the
    /// session id must be present and non-blank. Caller fields are optional;
    /// the video flag accepts `true`/`false`/`1`/`0` and defaults to audio.
    pub fn parse(data: &PayloadData, keys: &CallPayloadKeys) -> Result<Self, CallPayloadError> {
        if !Self::is_invitation(data, keys) {
            return Err(CallPayloadError::NotAnInvitation(
                data.get(&keys.type_key).cloned(),
            ));
        }
        let invite_type = data
            .get(&keys.type_key)
            .cloned()
            .unwrap_or_default();

        let session_id = data
            .get(&keys.session_id_key)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CallPayloadError::MissingKey(keys.session_id_key.clone()))?
            .to_string();

        let media = match data.get(&keys.video_key).map(|s| s.trim()) {
            None | Some("") => CallMedia::Audio,
            Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => CallMedia::Video,
            Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => CallMedia::Audio,
            Some(v) => {
                return Err(CallPayloadError::InvalidValue {
                    key: keys.video_key.clone(),
                    value: v.to_string(),
                });
            }
        };

        Ok(Self {
            session_id,
            invite_type,
            caller: non_blank(data.get(&keys.caller_key)),
            caller_name: non_blank(data.get(&keys.caller_name_key)),
            media,
        })
    }
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
