pub mod calls;
pub mod config;
pub mod context;
pub mod error;
pub mod handlers;
pub mod runtime;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use config::{CallPayloadKeys, DispatcherConfig};
pub use context::{AppContext, DeliveryContext};
pub use error::{BuildError, ConfigError, DispatchError};
pub use handlers::{
    CallRouter, Dispatcher, DispatcherBuilder, FnMessageHandler, GenericMessageHandler,
    MessagingRuntime,
};
pub use runtime::LazySubsystem;
pub use types::{Classification, InboundPush, PayloadData, PushMetadata, PushPriority, Route};
