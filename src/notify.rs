//! Outbound change notifications: a typed callback list.
//!
//! Listeners (a sidebar, a grid-settings panel) subscribe to a map's
//! [`MapEvent`]s and get called synchronously, in subscription order, when the
//! map changes.

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

use crate::color::Rgb;
use crate::token::TokenId;

/// Something about the map changed.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    GridStepChanged(f64),
    GridHOffsetChanged(i32),
    GridVOffsetChanged(i32),
    GridColorChanged(Rgb),
    /// The background picture was set (`true`) or cleared (`false`).
    BackgroundChanged(bool),
    /// A token was added or removed, or a token's own fields changed.
    /// Carries the full collection in z-order.
    TokensChanged(Vec<TokenId>),
}

/// Handle returned by [`Observers::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<E> = Box<dyn FnMut(&E)>;

/// Ordered list of callbacks for events of type `E`.
pub struct Observers<E> {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Callback<E>)>,
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self { next_id: 0, callbacks: Vec::new() }
    }
}

impl<E> std::fmt::Debug for Observers<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers").field("len", &self.callbacks.len()).finish()
    }
}

impl<E> Observers<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback`; it runs for every subsequent [`Observers::notify`].
    pub fn subscribe(&mut self, callback: impl FnMut(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(sid, _)| *sid != id);
        self.callbacks.len() != before
    }

    /// Call every callback with `event`.
    pub fn notify(&mut self, event: &E) {
        for (_, callback) in &mut self.callbacks {
            callback(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}
