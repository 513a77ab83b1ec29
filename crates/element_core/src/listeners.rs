//! Per-connection listener scope: one cancellation point for every handler a
//! component attaches.

use std::collections::HashMap;

use crate::host::{ElementHost, EventCallback, ListenTarget, ListenerHandle};

type BindingKey = (String, String, &'static str);

/// Cancellation token owning every listener attached during one
/// connect/disconnect cycle.
///
/// A scope is minted on connect, invalidated wholesale on disconnect, and
/// never reused: reconnection gets a fresh scope. Within one scope lifetime,
/// re-registering the same `(target, event, key)` triple replaces the previous
/// handler instead of stacking a duplicate, so repeated render passes are
/// safe.
pub struct ListenerScope {
    bindings: HashMap<BindingKey, ListenerHandle>,
    cancelled: bool,
}

impl ListenerScope {
    /// Mints a live scope with no bindings.
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
            cancelled: false,
        }
    }

    /// Returns whether the scope still accepts and holds bindings.
    pub fn is_live(&self) -> bool {
        !self.cancelled
    }

    /// Number of currently held bindings.
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Attaches `callback` to `target` for `event` under the binding label
    /// `key`, replacing any previous binding with the same triple.
    ///
    /// Calls against a cancelled scope are ignored; the component is between
    /// connections and its handlers must not outlive the old scope.
    pub fn listen(
        &mut self,
        host: &dyn ElementHost,
        target: &ListenTarget,
        event: &str,
        key: &'static str,
        callback: EventCallback,
    ) {
        if self.cancelled {
            log::debug!("listen on cancelled scope ignored: {}/{event}/{key}", target.key());
            return;
        }
        let binding = (target.key(), event.to_string(), key);
        if let Some(previous) = self.bindings.remove(&binding) {
            host.detach(previous);
        }
        if let Some(handle) = host.attach(target, event, callback) {
            self.bindings.insert(binding, handle);
        }
    }

    /// Invalidates the scope, detaching every binding it ever held.
    ///
    /// Idempotent; a second cancel is a no-op.
    pub fn cancel(&mut self, host: &dyn ElementHost) {
        for (_, handle) in self.bindings.drain() {
            host.detach(handle);
        }
        self.cancelled = true;
    }
}

impl Default for ListenerScope {
    fn default() -> Self {
        Self::new()
    }
}
