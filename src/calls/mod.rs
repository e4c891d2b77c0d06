//! Call-invitation recognition.
//!
//! - [`CallInvitation`]: an incoming session request parsed from payload data
//! - [`PayloadCallRouter`]: a [`crate::handlers::CallRouter`] that recognises
//!   invitations by configured payload keys
//! - [`CallSessionSink`]: boundary to the call-session manager that owns
//!   everything after recognition

mod error;
mod handler;
mod invite;

pub use error::CallPayloadError;
pub use handler::{CallSessionSink, PayloadCallRouter};
pub use invite::{CallInvitation, CallMedia};
