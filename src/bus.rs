//! Publish/subscribe notification channels
//!
//! Delivery is synchronous, in subscription order, on the publishing thread.
//! There is no buffering and no replay: an observer that subscribes late
//! pulls current values from the session itself.
//!
//! `subscribe` returns a [`Subscription`] guard. Dropping the guard
//! unsubscribes, so an observer's registration lives exactly as long as
//! the observer holding it.

use std::cell::RefCell;
use std::rc::Rc;

use crate::sim::GamePhase;

pub type SubscriptionId = u64;

type Handler<T> = Box<dyn FnMut(&T)>;

struct ChannelInner<T> {
    handlers: Vec<(SubscriptionId, Handler<T>)>,
    next_id: SubscriptionId,
    /// Set while handlers are detached for delivery
    publishing: bool,
    /// Ids unsubscribed while their handler was detached
    removed: Vec<SubscriptionId>,
}

/// A single broadcast channel carrying values of type `T`
pub struct Channel<T> {
    inner: Rc<RefCell<ChannelInner<T>>>,
}

impl<T: 'static> Default for Channel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Channel<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(ChannelInner {
                handlers: Vec::new(),
                next_id: 1,
                publishing: false,
                removed: Vec::new(),
            })),
        }
    }

    /// Register a handler. It stays registered until the returned guard is
    /// dropped or [`Channel::unsubscribe`] is called with its id.
    ///
    /// A handler added from inside another handler first receives the
    /// next published value, not the one being delivered.
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: FnMut(&T) + 'static,
    {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.handlers.push((id, Box::new(handler)));
            id
        };

        let weak = Rc::downgrade(&self.inner);
        Subscription {
            id,
            cancel: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    remove_handler(&inner, id);
                }
            })),
        }
    }

    /// Remove a handler by id. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        remove_handler(&self.inner, id)
    }

    /// Deliver `value` to every handler in subscription order
    pub fn publish(&self, value: &T) {
        let mut handlers = {
            let mut inner = self.inner.borrow_mut();
            if inner.publishing {
                log::warn!("Re-entrant publish dropped");
                return;
            }
            inner.publishing = true;
            std::mem::take(&mut inner.handlers)
        };

        for (id, handler) in handlers.iter_mut() {
            if self.inner.borrow().removed.contains(id) {
                continue;
            }
            handler(value);
        }

        let mut inner = self.inner.borrow_mut();
        let removed = std::mem::take(&mut inner.removed);
        handlers.retain(|(id, _)| !removed.contains(id));
        // Handlers subscribed during delivery go after the existing ones
        let added = std::mem::replace(&mut inner.handlers, handlers);
        inner.handlers.extend(added);
        inner.publishing = false;
    }

    /// Number of registered handlers
    pub fn len(&self) -> usize {
        self.inner.borrow().handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn remove_handler<T>(inner: &RefCell<ChannelInner<T>>, id: SubscriptionId) -> bool {
    let mut inner = inner.borrow_mut();
    if let Some(pos) = inner.handlers.iter().position(|(h, _)| *h == id) {
        inner.handlers.remove(pos);
        return true;
    }
    if inner.publishing && id < inner.next_id && !inner.removed.contains(&id) {
        inner.removed.push(id);
        return true;
    }
    false
}

/// Registration guard returned by [`Channel::subscribe`]
pub struct Subscription {
    id: SubscriptionId,
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

/// The session's two broadcast channels
#[derive(Default)]
pub struct NotificationBus {
    /// Published after every completed transition with the new phase
    pub state_changed: Channel<GamePhase>,
    /// Published every time the highscore is recorded
    pub highscore_updated: Channel<u64>,
}
