use thiserror::Error;

/// A collaborator fault raised while routing a delivery or token refresh.
///
/// Each variant names the step that failed; the collaborator's own error is
/// kept as the source. Nothing after the failing step ran.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("enterprise-messaging pre-handling failed")]
    Prehandle(#[source] anyhow::Error),

    #[error("calling subsystem initialization failed")]
    Initialization(#[source] anyhow::Error),

    #[error("call routing failed")]
    CallRouting(#[source] anyhow::Error),

    #[error("generic message handler failed")]
    GenericHandler(#[source] anyhow::Error),

    #[error("token propagation to enterprise messaging failed")]
    TokenPropagation(#[source] anyhow::Error),

    #[error("token refresh handler failed")]
    TokenHandler(#[source] anyhow::Error),
}

/// Returned by [`crate::handlers::DispatcherBuilder::build`] when a required
/// collaborator was never supplied.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("no messaging runtime configured")]
    MissingRuntime,

    #[error("no call router configured")]
    MissingCallRouter,

    #[error("no handler for unclassified payloads configured")]
    MissingMessageHandler,

    #[error("no handler for token refreshes configured")]
    MissingTokenHandler,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
