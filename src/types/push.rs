use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Key/value data carried by one push delivery.
pub type PayloadData = HashMap<String, String>;

/// Delivery priority as reported by the push transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PushPriority {
    High,
    #[default]
    Normal,
}

/// Transport-level metadata attached to a delivery.
///
/// None of these fields take part in routing; they are carried through to
/// whichever handler ends up owning the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushMetadata {
    /// Sender identifier (e.g. the project or topic the push was sent from).
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub collapse_key: Option<String>,
    #[serde(default)]
    pub priority: PushPriority,
    #[serde(default)]
    pub sent_at: Option<DateTime<Utc>>,
}

/// A decoded inbound push delivery.
///
/// Immutable once constructed: the dispatcher only ever reads it, and the
/// value forwarded to the generic handler is the very value the transport
/// delivered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundPush {
    #[serde(default)]
    data: PayloadData,
    #[serde(default)]
    metadata: PushMetadata,
}

impl InboundPush {
    pub fn new(data: PayloadData) -> Self {
        Self {
            data,
            metadata: PushMetadata::default(),
        }
    }

    pub fn with_metadata(data: PayloadData, metadata: PushMetadata) -> Self {
        Self { data, metadata }
    }

    /// Build a payload from borrowed key/value pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self::new(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    pub fn data(&self) -> &PayloadData {
        &self.data
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    pub fn metadata(&self) -> &PushMetadata {
        &self.metadata
    }

    pub fn message_id(&self) -> Option<&str> {
        self.metadata.message_id.as_deref()
    }

    pub fn into_parts(self) -> (PayloadData, PushMetadata) {
        (self.data, self.metadata)
    }
}

/// Outcome of asking a call router to interpret a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The payload was a call invitation and has been handed to the call subsystem.
    Handled,
    /// Not a call invitation; the caller takes the fallback path.
    Unhandled,
}

impl Classification {
    pub fn is_handled(self) -> bool {
        matches!(self, Self::Handled)
    }
}

impl From<bool> for Classification {
    fn from(handled: bool) -> Self {
        if handled {
            Self::Handled
        } else {
            Self::Unhandled
        }
    }
}

/// The single path a delivery took through the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Consumed by the enterprise-messaging runtime.
    PreHandled,
    /// Dispatched into the call subsystem.
    Call,
    /// Forwarded to the application's generic handler.
    Generic,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Route::PreHandled => "pre-handled",
            Route::Call => "call",
            Route::Generic => "generic",
        };
        f.write_str(name)
    }
}
