use super::traits::GenericMessageHandler;
use crate::types::push::InboundPush;
use std::sync::Arc;

pub(crate) type MessageCallback = Arc<dyn Fn(InboundPush) -> anyhow::Result<()> + Send + Sync>;
pub(crate) type TokenCallback = Arc<dyn Fn(&str) -> anyhow::Result<()> + Send + Sync>;

/// A [`GenericMessageHandler`] assembled from a pair of closures.
///
/// Usually created through `DispatcherBuilder::on_message` and `on_token`.
#[derive(Clone)]
pub struct FnMessageHandler {
    on_message: MessageCallback,
    on_token: TokenCallback,
}

impl FnMessageHandler {
    pub fn new<M, T>(on_message: M, on_token: T) -> Self
    where
        M: Fn(InboundPush) -> anyhow::Result<()> + Send + Sync + 'static,
        T: Fn(&str) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self {
            on_message: Arc::new(on_message),
            on_token: Arc::new(on_token),
        }
    }

    pub(crate) fn from_callbacks(on_message: MessageCallback, on_token: TokenCallback) -> Self {
        Self {
            on_message,
            on_token,
        }
    }
}

impl GenericMessageHandler for FnMessageHandler {
    fn on_unclassified_payload(&self, push: InboundPush) -> anyhow::Result<()> {
        (self.on_message)(push)
    }

    fn on_token_refreshed(&self, token: &str) -> anyhow::Result<()> {
        (self.on_token)(token)
    }
}
