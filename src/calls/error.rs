//! Call-invitation parsing errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CallPayloadError {
    #[error("not a call invitation (type: {0:?})")]
    NotAnInvitation(Option<String>),

    #[error("missing required key: {0}")]
    MissingKey(String),

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}
