//! Synchronous change notification.
//!
//! A [`ChangeNotifier`] is an explicit, owned list of handlers. Publishing
//! calls every handler in subscription order on the caller's stack. No
//! payload is pushed: each handler receives a shared reference to the
//! publisher and pulls whatever state it needs from it.
//!
//! Handlers only ever see `&T`, so a handler cannot mutate the publisher and
//! trigger a nested publish.

use std::fmt;

/// Handle returned by [`ChangeNotifier::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler<T> = Box<dyn Fn(&T)>;

pub struct ChangeNotifier<T: ?Sized> {
    handlers: Vec<(SubscriptionId, Handler<T>)>,
    next_id: u64,
}

impl<T: ?Sized> ChangeNotifier<T> {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a handler. It runs on every subsequent [`publish`](Self::publish).
    pub fn subscribe(&mut self, handler: impl Fn(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Remove a handler. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    /// Invoke every handler with `source`, in subscription order.
    pub fn publish(&self, source: &T) {
        for (_, handler) in &self.handlers {
            handler(source);
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<T: ?Sized> Default for ChangeNotifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for ChangeNotifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
