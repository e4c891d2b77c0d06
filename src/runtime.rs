//! Init-once holder for process-wide subsystems.

use crate::context::AppContext;
use log::{info, warn};
use once_cell::sync::OnceCell;
use std::fmt;

type InitFn<T> = Box<dyn Fn(&AppContext) -> anyhow::Result<T> + Send + Sync>;

/// A subsystem that is built on first use and then lives for the rest of the process.
///
/// Concurrent callers of [`LazySubsystem::get_or_init`] block until the single
/// running initializer finishes; only one initializer ever runs to success. A
/// failed initializer leaves the cell empty, so the next caller retries.
pub struct LazySubsystem<T> {
    name: &'static str,
    cell: OnceCell<T>,
    init: InitFn<T>,
}

impl<T> LazySubsystem<T> {
    pub fn new<F>(name: &'static str, init: F) -> Self
    where
        F: Fn(&AppContext) -> anyhow::Result<T> + Send + Sync + 'static,
    {
        Self {
            name,
            cell: OnceCell::new(),
            init: Box::new(init),
        }
    }

    /// A subsystem that is already initialized.
    pub fn ready(name: &'static str, value: T) -> Self {
        Self {
            name,
            cell: OnceCell::with_value(value),
            init: Box::new(move |_: &AppContext| {
                Err(anyhow::anyhow!("subsystem '{name}' has no initializer"))
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn get_or_init(&self, app: &AppContext) -> anyhow::Result<&T> {
        self.cell.get_or_try_init(|| match (self.init)(app) {
            Ok(value) => {
                info!("Initialized {} for {}", self.name, app.app_id());
                Ok(value)
            }
            Err(e) => {
                warn!("Initializing {} failed, will retry on next use: {}", self.name, e);
                Err(e)
            }
        })
    }

    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T> fmt::Debug for LazySubsystem<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazySubsystem")
            .field("name", &self.name)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}
