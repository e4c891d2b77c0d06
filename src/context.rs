//! Execution scopes handed to the messaging runtime.
//!
//! [`AppContext`] lives for the whole process and is the only scope the
//! calling subsystem may be initialized with. [`DeliveryContext`] borrows it
//! for the duration of a single delivery or token refresh and cannot outlive
//! that event.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug)]
struct AppContextInner {
    app_id: String,
    started_at: DateTime<Utc>,
    delivery_counter: AtomicU64,
}

/// Process-lifetime application scope. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AppContext {
    inner: Arc<AppContextInner>,
}

impl AppContext {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(AppContextInner {
                app_id: app_id.into(),
                started_at: Utc::now(),
                delivery_counter: AtomicU64::new(0),
            }),
        }
    }

    pub fn app_id(&self) -> &str {
        &self.inner.app_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.inner.started_at
    }

    /// Open a scope for one inbound event.
    pub fn delivery(&self) -> DeliveryContext<'_> {
        let sequence = self.inner.delivery_counter.fetch_add(1, Ordering::Relaxed) + 1;
        DeliveryContext {
            app: self,
            sequence,
            received_at: Utc::now(),
        }
    }

    /// Whether two handles refer to the same application scope.
    pub fn same_scope(&self, other: &AppContext) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Scope of a single delivery or token refresh.
#[derive(Debug, Clone, Copy)]
pub struct DeliveryContext<'a> {
    app: &'a AppContext,
    sequence: u64,
    received_at: DateTime<Utc>,
}

impl<'a> DeliveryContext<'a> {
    pub fn app(&self) -> &'a AppContext {
        self.app
    }

    /// Monotonic per-process event number, starting at 1.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }
}
