//! Toast-style notifications with explicit subscriber lifetimes.
//!
//! A view subscribes when it mounts and keeps the returned `Subscription`;
//! dropping it unsubscribes. Expiry is data, pruned against a reference
//! clock, so there are no timers to cancel.

use std::cell::RefCell;
use std::collections::{ BTreeMap, BTreeSet };
use std::rc::{ Rc, Weak };

use chrono::{ DateTime, Duration, Utc };
use log::debug;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Notification {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

type Listener = Box<dyn FnMut(&Notification)>;

struct Inner {
    next_notification: u64,
    next_listener: u64,
    listeners: BTreeMap<u64, Listener>,
    active: Vec<Notification>,
    /// Nesting depth of `notify` calls currently delivering
    dispatching: usize,
    /// Subscriptions dropped while their listener was checked out for delivery
    released: BTreeSet<u64>,
}

/// Broadcasts notifications to live subscribers and keeps the active list
pub struct Notifier {
    inner: Rc<RefCell<Inner>>,
    ttl: Duration,
}

/// Handle returned by `Notifier::subscribe`. Unsubscribes on drop.
pub struct Subscription {
    id: u64,
    inner: Weak<RefCell<Inner>>,
}

impl Notifier {
    /// `ttl` is how long a notification stays active
    pub fn new(ttl: Duration) -> Self {
        Notifier {
            inner: Rc::new(
                RefCell::new(Inner {
                    next_notification: 1,
                    next_listener: 1,
                    listeners: BTreeMap::new(),
                    active: Vec::new(),
                    dispatching: 0,
                    released: BTreeSet::new(),
                })
            ),
            ttl,
        }
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription where F: FnMut(&Notification) + 'static {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_listener;
        inner.next_listener += 1;
        inner.listeners.insert(id, Box::new(listener));
        Subscription { id, inner: Rc::downgrade(&self.inner) }
    }

    /// Record a notification and deliver it to every subscriber.
    ///
    /// Listeners run with the notifier unlocked, so they may read it,
    /// notify again, subscribe, or drop their own `Subscription`. Listeners
    /// added during delivery first hear the next notification.
    pub fn notify(&self, kind: NotificationKind, message: impl Into<String>, now: DateTime<Utc>) -> u64 {
        let (notification, mut listeners) = {
            let mut inner = self.inner.borrow_mut();
            let notification = Notification {
                id: inner.next_notification,
                kind,
                message: message.into(),
                created_at: now,
                expires_at: now + self.ttl,
            };
            inner.next_notification += 1;
            inner.active.push(notification.clone());
            inner.dispatching += 1;
            (notification, std::mem::take(&mut inner.listeners))
        };

        for listener in listeners.values_mut() {
            listener(&notification);
        }

        let mut inner = self.inner.borrow_mut();
        inner.dispatching -= 1;
        for id in std::mem::take(&mut inner.released) {
            // an id this delivery does not hold belongs to an outer one
            if listeners.remove(&id).is_none() && inner.dispatching > 0 {
                inner.released.insert(id);
            }
        }
        listeners.append(&mut inner.listeners);
        inner.listeners = listeners;
        notification.id
    }

    pub fn dismiss(&self, id: u64) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.active.len();
        inner.active.retain(|n| n.id != id);
        inner.active.len() != before
    }

    /// Drop expired notifications, returning how many were removed
    pub fn prune_expired(&self, now: DateTime<Utc>) -> usize {
        let mut inner = self.inner.borrow_mut();
        let before = inner.active.len();
        inner.active.retain(|n| !n.is_expired(now));
        let removed = before - inner.active.len();
        if removed > 0 {
            debug!("Pruned {} expired notifications", removed);
        }
        removed
    }

    pub fn active(&self) -> Vec<Notification> {
        self.inner.borrow().active.clone()
    }

    /// Listeners checked out by an in-flight `notify` are not counted
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Notifier::new(Duration::seconds(5))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            let mut inner = inner.borrow_mut();
            if inner.listeners.remove(&self.id).is_none() && inner.dispatching > 0 {
                inner.released.insert(self.id);
            }
        }
    }
}
