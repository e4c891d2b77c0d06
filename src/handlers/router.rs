use super::closure::{FnMessageHandler, MessageCallback, TokenCallback};
use super::traits::{CallRouter, GenericMessageHandler, MessagingRuntime};
use crate::calls::{CallSessionSink, PayloadCallRouter};
use crate::config::DispatcherConfig;
use crate::context::AppContext;
use crate::error::{BuildError, DispatchError};
use crate::runtime::LazySubsystem;
use crate::types::push::{Classification, InboundPush, Route};
use log::debug;
use std::sync::Arc;

type CallRouterFactory =
    Box<dyn Fn(&AppContext) -> anyhow::Result<Arc<dyn CallRouter>> + Send + Sync>;

/// Entry point for push traffic.
///
/// Every delivered payload ends up in exactly one place: consumed by the
/// enterprise-messaging runtime, dispatched into the call subsystem, or
/// forwarded to the application's generic handler. Every token refresh is
/// propagated to the runtime and then to the application.
///
/// Both entry points are synchronous and may be called concurrently from
/// transport-owned threads. A collaborator fault is returned as-is (tagged
/// with the step that raised it) and nothing after that step runs.
pub struct Dispatcher {
    app: AppContext,
    runtime: Arc<dyn MessagingRuntime>,
    call_router: LazySubsystem<Arc<dyn CallRouter>>,
    handler: Arc<dyn GenericMessageHandler>,
    redact_tokens: bool,
}

impl Dispatcher {
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    pub fn app_context(&self) -> &AppContext {
        &self.app
    }

    /// Whether the call router has been resolved (always true unless it was
    /// supplied as a factory and no delivery has reached call routing yet).
    pub fn is_call_router_ready(&self) -> bool {
        self.call_router.is_initialized()
    }

    /// Route one delivered payload.
    ///
    /// # Returns
    /// The [`Route`] the payload took, or the first collaborator fault.
    pub fn on_push(&self, push: InboundPush) -> Result<Route, DispatchError> {
        let ctx = self.app.delivery();
        let message_id = push.metadata().message_id.clone();

        if self
            .runtime
            .prehandle(&ctx, &push)
            .map_err(DispatchError::Prehandle)?
        {
            debug!(
                "Delivery #{} ({:?}) consumed by enterprise messaging",
                ctx.sequence(),
                message_id
            );
            return Ok(Route::PreHandled);
        }

        // Initialization gets the process scope: the delivery scope may be torn
        // down by the platform before the calling subsystem finishes setting up.
        self.runtime
            .ensure_initialized(&self.app)
            .map_err(DispatchError::Initialization)?;
        let router = self
            .call_router
            .get_or_init(&self.app)
            .map_err(DispatchError::Initialization)?;

        match router
            .try_handle_as_call(push.data())
            .map_err(DispatchError::CallRouting)?
        {
            Classification::Handled => {
                debug!(
                    "Delivery #{} ({:?}) dispatched as call",
                    ctx.sequence(),
                    message_id
                );
                Ok(Route::Call)
            }
            Classification::Unhandled => {
                debug!(
                    "Delivery #{} ({:?}) forwarded to generic handler",
                    ctx.sequence(),
                    message_id
                );
                self.handler
                    .on_unclassified_payload(push)
                    .map_err(DispatchError::GenericHandler)?;
                Ok(Route::Generic)
            }
        }
    }

    /// Propagate a new push token, first to the runtime and then to the application.
    pub fn on_token_refresh(&self, token: &str) -> Result<(), DispatchError> {
        let ctx = self.app.delivery();
        if self.redact_tokens {
            debug!("On new push token: {}", redact_token(token));
        } else {
            debug!("On new push token: {}", token);
        }

        self.runtime
            .notify_token_refresh(&ctx, token)
            .map_err(DispatchError::TokenPropagation)?;
        self.handler
            .on_token_refreshed(token)
            .map_err(DispatchError::TokenHandler)
    }
}

fn redact_token(token: &str) -> String {
    let len = token.chars().count();
    if len < 8 {
        return "***".to_string();
    }
    let prefix: String = token.chars().take(4).collect();
    format!("{prefix}...({len} chars)")
}

enum CallRouterSource {
    Ready(Arc<dyn CallRouter>),
    Factory(CallRouterFactory),
    Sink(Arc<dyn CallSessionSink>),
}

/// Assembles a [`Dispatcher`].
///
/// A runtime, a call router and both halves of the generic handler (either a
/// [`GenericMessageHandler`] or an `on_message`/`on_token` closure pair) are
/// required.
///
/// # Example
/// ```rust,ignore
/// let dispatcher = Dispatcher::builder()
///     .with_app_context(AppContext::new("com.example.app"))
///     .with_runtime(runtime)
///     .with_payload_call_router(call_manager)
///     .on_message(|push| { app.show_notification(push); Ok(()) })
///     .on_token(|token| backend.register(token))
///     .build()?;
/// ```
#[derive(Default)]
pub struct DispatcherBuilder {
    app: Option<AppContext>,
    config: DispatcherConfig,
    runtime: Option<Arc<dyn MessagingRuntime>>,
    call_router: Option<CallRouterSource>,
    handler: Option<Arc<dyn GenericMessageHandler>>,
    on_message: Option<MessageCallback>,
    on_token: Option<TokenCallback>,
}

impl DispatcherBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// The process-lifetime scope used for subsystem initialization.
    /// Defaults to a scope named after this crate.
    pub fn with_app_context(mut self, app: AppContext) -> Self {
        self.app = Some(app);
        self
    }

    pub fn with_config(mut self, config: DispatcherConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_runtime(mut self, runtime: Arc<dyn MessagingRuntime>) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn with_call_router(mut self, router: Arc<dyn CallRouter>) -> Self {
        self.call_router = Some(CallRouterSource::Ready(router));
        self
    }

    /// Resolve the call router on the first delivery that reaches call routing,
    /// after the runtime has initialized the calling subsystem.
    pub fn with_call_router_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(&AppContext) -> anyhow::Result<Arc<dyn CallRouter>> + Send + Sync + 'static,
    {
        self.call_router = Some(CallRouterSource::Factory(Box::new(factory)));
        self
    }

    /// Use a [`PayloadCallRouter`] built from the configured payload keys.
    pub fn with_payload_call_router(mut self, sink: Arc<dyn CallSessionSink>) -> Self {
        self.call_router = Some(CallRouterSource::Sink(sink));
        self
    }

    /// Use a handler object for both unclassified payloads and token refreshes.
    /// Replaces any closures set with `on_message`/`on_token`.
    pub fn with_handler(mut self, handler: Arc<dyn GenericMessageHandler>) -> Self {
        self.handler = Some(handler);
        self.on_message = None;
        self.on_token = None;
        self
    }

    pub fn on_message<F>(mut self, handler: F) -> Self
    where
        F: Fn(InboundPush) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.handler = None;
        self.on_message = Some(Arc::new(handler));
        self
    }

    pub fn on_token<F>(mut self, handler: F) -> Self
    where
        F: Fn(&str) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.handler = None;
        self.on_token = Some(Arc::new(handler));
        self
    }

    pub fn build(self) -> Result<Dispatcher, BuildError> {
        let runtime = self.runtime.ok_or(BuildError::MissingRuntime)?;

        let handler: Arc<dyn GenericMessageHandler> = match self.handler {
            Some(handler) => handler,
            None => {
                let on_message = self.on_message.ok_or(BuildError::MissingMessageHandler)?;
                let on_token = self.on_token.ok_or(BuildError::MissingTokenHandler)?;
                Arc::new(FnMessageHandler::from_callbacks(on_message, on_token))
            }
        };

        let call_router = match self.call_router.ok_or(BuildError::MissingCallRouter)? {
            CallRouterSource::Ready(router) => LazySubsystem::ready("call router", router),
            CallRouterSource::Factory(factory) => LazySubsystem::new("call router", factory),
            CallRouterSource::Sink(sink) => {
                let router: Arc<dyn CallRouter> = Arc::new(PayloadCallRouter::new(
                    self.config.call_payload.clone(),
                    sink,
                ));
                LazySubsystem::ready("call router", router)
            }
        };

        Ok(Dispatcher {
            app: self
                .app
                .unwrap_or_else(|| AppContext::new(env!("CARGO_PKG_NAME"))),
            runtime,
            call_router,
            handler,
            redact_tokens: self.config.redact_tokens,
        })
    }
}
