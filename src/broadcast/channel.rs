use super::{DB_BROADCAST, MessageBus, Subscription};
use crate::errors::AppResult;
use crate::models::ChangeEvent;
use std::sync::Arc;
use std::time::Duration;

/// A named handle on a [`MessageBus`] speaking [`ChangeEvent`]s.
#[derive(Clone)]
pub struct BroadcastChannel {
    name: String,
    bus: Arc<dyn MessageBus>,
}

impl BroadcastChannel {
    pub fn new(bus: Arc<dyn MessageBus>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bus,
        }
    }

    /// Handle on the default [`DB_BROADCAST`] channel.
    pub fn store_channel(bus: Arc<dyn MessageBus>) -> Self {
        Self::new(bus, DB_BROADCAST)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn post_event(&self, event: &ChangeEvent) -> AppResult<()> {
        self.bus.post(&self.name, event.to_message()?)
    }

    pub fn listen(&self) -> AppResult<EventListener> {
        Ok(EventListener {
            sub: self.bus.subscribe(&self.name)?,
        })
    }
}

/// Decoding side of a subscription.
///
/// Each received message yields `Ok(event)` or the decode error
/// (`UnknownEventType` / `Payload`); the caller decides to skip it.
pub struct EventListener {
    sub: Subscription,
}

impl EventListener {
    pub fn channel(&self) -> &str {
        self.sub.channel()
    }

    pub fn try_next(&self) -> Option<AppResult<ChangeEvent>> {
        self.sub
            .try_recv()
            .map(|raw| ChangeEvent::from_message(&raw))
    }

    pub fn next_timeout(&self, timeout: Duration) -> Option<AppResult<ChangeEvent>> {
        self.sub
            .recv_timeout(timeout)
            .map(|raw| ChangeEvent::from_message(&raw))
    }

    /// Everything queued right now.
    pub fn drain(&self) -> Vec<AppResult<ChangeEvent>> {
        std::iter::from_fn(|| self.try_next()).collect()
    }
}
