//! Named publish/subscribe bus used to keep every open view in sync.
//!
//! The store posts one [`ChangeEvent`](crate::models::ChangeEvent) per
//! mutation; every listener registered on the same channel name receives
//! it, the listener living next to the publishing store included. Missed
//! messages are not replayed: a late listener has to `list()` to catch up.

mod channel;
mod hub;

pub use channel::{BroadcastChannel, EventListener};
pub use hub::BroadcastHub;

use crate::errors::AppResult;
use std::sync::mpsc::{Receiver, RecvTimeoutError, TryRecvError};
use std::time::Duration;

/// Default channel name shared by the store and the views.
pub const DB_BROADCAST: &str = "todo-broadcast";

/// Transport behind a [`BroadcastChannel`].
///
/// Messages are opaque strings, as they would be on a cross-context bus.
pub trait MessageBus: Send + Sync {
    /// Deliver `message` to every live subscriber of `channel`.
    fn post(&self, channel: &str, message: String) -> AppResult<()>;

    /// Register a new subscriber on `channel`.
    fn subscribe(&self, channel: &str) -> AppResult<Subscription>;
}

/// Receiving end of one subscriber. Dropping it unsubscribes.
pub struct Subscription {
    channel: String,
    rx: Receiver<String>,
}

impl Subscription {
    pub fn new(channel: impl Into<String>, rx: Receiver<String>) -> Self {
        Self {
            channel: channel.into(),
            rx,
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Next queued message, without blocking.
    pub fn try_recv(&self) -> Option<String> {
        match self.rx.try_recv() {
            Ok(msg) => Some(msg),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<String> {
        match self.rx.recv_timeout(timeout) {
            Ok(msg) => Some(msg),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}
