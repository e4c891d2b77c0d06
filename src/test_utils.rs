use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::calls::{CallInvitation, CallSessionSink};
use crate::context::{AppContext, DeliveryContext};
use crate::handlers::{CallRouter, GenericMessageHandler, MessagingRuntime};
use crate::types::push::{Classification, InboundPush, PayloadData};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Ordered record of collaborator calls, shared between mocks.
#[derive(Debug, Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<String>>>);

impl EventLog {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

pub struct MockRuntime {
    log: EventLog,
    consume: bool,
    pub fail_prehandle: AtomicBool,
    pub fail_token: AtomicBool,
    pub fail_init_times: AtomicUsize,
    pub init_calls: AtomicUsize,
    pub init_scopes: Mutex<Vec<AppContext>>,
    pub tokens: Mutex<Vec<String>>,
}

impl MockRuntime {
    pub fn new(log: EventLog, consume: bool) -> Self {
        Self {
            log,
            consume,
            fail_prehandle: AtomicBool::new(false),
            fail_token: AtomicBool::new(false),
            fail_init_times: AtomicUsize::new(0),
            init_calls: AtomicUsize::new(0),
            init_scopes: Mutex::new(Vec::new()),
            tokens: Mutex::new(Vec::new()),
        }
    }
}

impl MessagingRuntime for MockRuntime {
    fn prehandle(&self, _ctx: &DeliveryContext<'_>, _push: &InboundPush) -> anyhow::Result<bool> {
        self.log.push("prehandle");
        if self.fail_prehandle.load(Ordering::SeqCst) {
            anyhow::bail!("prehandle exploded");
        }
        Ok(self.consume)
    }

    fn notify_token_refresh(&self, _ctx: &DeliveryContext<'_>, token: &str) -> anyhow::Result<()> {
        self.log.push("notify_token_refresh");
        if self.fail_token.load(Ordering::SeqCst) {
            anyhow::bail!("token sync failed");
        }
        self.tokens.lock().unwrap().push(token.to_string());
        Ok(())
    }

    fn ensure_initialized(&self, app: &AppContext) -> anyhow::Result<()> {
        self.log.push("ensure_initialized");
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        self.init_scopes.lock().unwrap().push(app.clone());
        let remaining = self.fail_init_times.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_init_times.store(remaining - 1, Ordering::SeqCst);
            anyhow::bail!("calling sdk not ready");
        }
        Ok(())
    }
}

pub struct MockCallRouter {
    log: EventLog,
    is_call: bool,
    pub fail: AtomicBool,
    pub seen: Mutex<Vec<PayloadData>>,
}

impl MockCallRouter {
    pub fn new(log: EventLog, is_call: bool) -> Self {
        Self {
            log,
            is_call,
            fail: AtomicBool::new(false),
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl CallRouter for MockCallRouter {
    fn try_handle_as_call(&self, data: &PayloadData) -> anyhow::Result<Classification> {
        self.log.push("try_handle_as_call");
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("call manager crashed");
        }
        self.seen.lock().unwrap().push(data.clone());
        Ok(Classification::from(self.is_call))
    }
}

pub struct MockHandler {
    log: EventLog,
    pub fail: AtomicBool,
    pub payloads: Mutex<Vec<InboundPush>>,
    pub tokens: Mutex<Vec<String>>,
}

impl MockHandler {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            fail: AtomicBool::new(false),
            payloads: Mutex::new(Vec::new()),
            tokens: Mutex::new(Vec::new()),
        }
    }
}

impl GenericMessageHandler for MockHandler {
    fn on_unclassified_payload(&self, push: InboundPush) -> anyhow::Result<()> {
        self.log.push("generic");
        self.payloads.lock().unwrap().push(push);
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("application handler failed");
        }
        Ok(())
    }

    fn on_token_refreshed(&self, token: &str) -> anyhow::Result<()> {
        self.log.push("token");
        self.tokens.lock().unwrap().push(token.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub calls: Mutex<Vec<CallInvitation>>,
}

impl CallSessionSink for RecordingSink {
    fn incoming_call(&self, invitation: CallInvitation) -> anyhow::Result<()> {
        self.calls.lock().unwrap().push(invitation);
        Ok(())
    }
}
