use super::{MessageBus, Subscription};
use crate::errors::{AppError, AppResult};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::mpsc::{self, Sender};

/// In-process [`MessageBus`]: one subscriber set per channel name.
///
/// Delivery is in order per sender. Subscribers whose receiver has been
/// dropped are pruned on the next post to their channel.
#[derive(Default)]
pub struct BroadcastHub {
    channels: Mutex<HashMap<String, Vec<Sender<String>>>>,
}

impl BroadcastHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live subscriber count for `channel` as of the last post.
    pub fn subscriber_count(&self, channel: &str) -> usize {
        self.channels
            .lock()
            .map(|c| c.get(channel).map_or(0, Vec::len))
            .unwrap_or(0)
    }
}

impl MessageBus for BroadcastHub {
    fn post(&self, channel: &str, message: String) -> AppResult<()> {
        let mut channels = self
            .channels
            .lock()
            .map_err(|e| AppError::Channel(format!("hub poisoned: {e}")))?;

        if let Some(subscribers) = channels.get_mut(channel) {
            subscribers.retain(|tx| tx.send(message.clone()).is_ok());
        }

        Ok(())
    }

    fn subscribe(&self, channel: &str) -> AppResult<Subscription> {
        let (tx, rx) = mpsc::channel();

        self.channels
            .lock()
            .map_err(|e| AppError::Channel(format!("hub poisoned: {e}")))?
            .entry(channel.to_string())
            .or_default()
            .push(tx);

        Ok(Subscription::new(channel, rx))
    }
}
