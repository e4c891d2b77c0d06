//! Payload-driven call router.

use super::invite::CallInvitation;
use crate::config::CallPayloadKeys;
use crate::handlers::traits::CallRouter;
use crate::types::push::{Classification, PayloadData};
use log::{debug, warn};
use std::sync::Arc;

/// Boundary to the call-session manager.
///
/// Everything that happens once a call is recognised (showing the incoming
/// call UI, starting signaling) lives behind this trait. Long-running work
/// must be handed off, not performed inline.
pub trait CallSessionSink: Send + Sync {
    fn incoming_call(&self, invitation: CallInvitation) -> anyhow::Result<()>;
}

/// A [`CallRouter`] that recognises invitations by payload keys and hands
/// them to a [`CallSessionSink`].
pub struct PayloadCallRouter {
    keys: CallPayloadKeys,
    sink: Arc<dyn CallSessionSink>,
}

impl PayloadCallRouter {
    pub fn new(keys: CallPayloadKeys, sink: Arc<dyn CallSessionSink>) -> Self {
        Self { keys, sink }
    }

    pub fn keys(&self) -> &CallPayloadKeys {
        &self.keys
    }
}

impl CallRouter for PayloadCallRouter {
    fn try_handle_as_call(&self, data: &PayloadData) -> anyhow::Result<Classification> {
        if !CallInvitation::is_invitation(data, &self.keys) {
            return Ok(Classification::Unhandled);
        }

        let invitation = match CallInvitation::parse(data, &self.keys) {
            Ok(invitation) => invitation,
            Err(e) => {
                // Typed as an invitation but unusable; let the application see it.
                warn!("Ignoring malformed call invitation: {}", e);
                return Ok(Classification::Unhandled);
            }
        };

        debug!(
            "Incoming {} call (session: {}, caller: {:?})",
            invitation.media, invitation.session_id, invitation.caller
        );
        self.sink.incoming_call(invitation)?;
        Ok(Classification::Handled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        calls: Mutex<Vec<CallInvitation>>,
        fail: bool,
    }

    impl CallSessionSink for RecordingSink {
        fn incoming_call(&self, invitation: CallInvitation) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("call ui unavailable");
            }
            self.calls.lock().unwrap().push(invitation);
            Ok(())
        }
    }

    fn data(pairs: &[(&str, &str)]) -> PayloadData {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_invitation_is_handled() {
        let sink = Arc::new(RecordingSink::default());
        let router = PayloadCallRouter::new(CallPayloadKeys::default(), sink.clone());

        let result = router
            .try_handle_as_call(&data(&[("type", "call_invite"), ("sessionId", "abc")]))
            .unwrap();

        assert_eq!(result, Classification::Handled);
        let calls = sink.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].session_id, "abc");
    }

    #[test]
    fn test_other_payloads_are_unhandled() {
        let sink = Arc::new(RecordingSink::default());
        let router = PayloadCallRouter::new(CallPayloadKeys::default(), sink.clone());

        assert_eq!(
            router.try_handle_as_call(&PayloadData::new()).unwrap(),
            Classification::Unhandled
        );
        assert_eq!(
            router
                .try_handle_as_call(&data(&[("type", "chat"), ("sessionId", "abc")]))
                .unwrap(),
            Classification::Unhandled
        );
        assert!(sink.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_invitation_is_unhandled() {
        let sink = Arc::new(RecordingSink::default());
        let router = PayloadCallRouter::new(CallPayloadKeys::default(), sink.clone());

        let result = router
            .try_handle_as_call(&data(&[("type", "call_invite")]))
            .unwrap();

        assert_eq!(result, Classification::Unhandled);
        assert!(sink.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_sink_failure_propagates() {
        let sink = Arc::new(RecordingSink {
            fail: true,
            ..Default::default()
        });
        let router = PayloadCallRouter::new(CallPayloadKeys::default(), sink);

        let err = router
            .try_handle_as_call(&data(&[("type", "call_invite"), ("sessionId", "abc")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "call ui unavailable");
    }
}
