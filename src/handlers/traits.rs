use crate::context::{AppContext, DeliveryContext};
use crate::types::push::{Classification, InboundPush, PayloadData};

/// The platform messaging runtime that sits in front of the dispatcher.
///
/// It owns the enterprise-messaging SDK (which gets first right of refusal
/// over every payload and learns of every token refresh) and the lifecycle of
/// the calling subsystem.
pub trait MessagingRuntime: Send + Sync {
    /// Offer a payload to the enterprise-messaging SDK.
    ///
    /// # Returns
    /// `true` if the payload belongs to the SDK's own concerns (e.g. delivery
    /// receipts) and must not be routed any further.
    fn prehandle(&self, ctx: &DeliveryContext<'_>, push: &InboundPush) -> anyhow::Result<bool>;

    /// Tell the enterprise-messaging SDK about a new push token.
    fn notify_token_refresh(&self, ctx: &DeliveryContext<'_>, token: &str) -> anyhow::Result<()>;

    /// Make sure the calling subsystem is up.
    ///
    /// Receives the process-lifetime scope, never the delivery scope. Must be
    /// idempotent and safe to call from concurrent deliveries.
    fn ensure_initialized(&self, app: &AppContext) -> anyhow::Result<()>;
}

/// Interprets payload data as a call invitation.
pub trait CallRouter: Send + Sync {
    /// On [`Classification::Handled`] every call-session side effect has
    /// already been triggered; the caller does nothing further.
    fn try_handle_as_call(&self, data: &PayloadData) -> anyhow::Result<Classification>;
}

/// Application-defined handling for everything that is not a call.
pub trait GenericMessageHandler: Send + Sync {
    /// Receives the original payload exactly as the transport delivered it.
    fn on_unclassified_payload(&self, push: InboundPush) -> anyhow::Result<()>;

    fn on_token_refreshed(&self, token: &str) -> anyhow::Result<()>;
}
