//! Push routing: the [`Dispatcher`] and the collaborator traits it routes between.

mod closure;
mod router;
pub mod traits;

pub use closure::FnMessageHandler;
pub use router::{Dispatcher, DispatcherBuilder};
pub use traits::{CallRouter, GenericMessageHandler, MessagingRuntime};
