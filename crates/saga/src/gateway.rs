//! Outbound message gateway trait and in-memory implementation.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::SagaError;
use crate::messages::OutboundMessage;

/// Trait for publishing messages to the collaborator services.
#[async_trait]
pub trait OutboundGateway: Send + Sync {
    /// Publishes a message on its channel.
    async fn send(&self, message: OutboundMessage) -> Result<(), SagaError>;
}

#[derive(Debug, Default)]
struct InMemoryGatewayState {
    sent: Vec<OutboundMessage>,
    fail_on_send: bool,
}

/// In-memory gateway for testing. Records every published message.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGateway {
    state: Arc<RwLock<InMemoryGatewayState>>,
}

impl InMemoryGateway {
    /// Creates a new in-memory gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the gateway to fail on subsequent send calls.
    pub fn set_fail_on_send(&self, fail: bool) {
        self.state.write().unwrap().fail_on_send = fail;
    }

    /// Returns the number of messages published so far.
    pub fn sent_count(&self) -> usize {
        self.state.read().unwrap().sent.len()
    }

    /// Returns all published messages in publish order.
    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.state.read().unwrap().sent.clone()
    }

    /// Returns the messages published on the given channel, in order.
    pub fn messages_on(&self, channel: &str) -> Vec<OutboundMessage> {
        self.state
            .read()
            .unwrap()
            .sent
            .iter()
            .filter(|m| m.channel() == channel)
            .cloned()
            .collect()
    }

    /// Returns the most recent message on the given channel, if any.
    pub fn last_on(&self, channel: &str) -> Option<OutboundMessage> {
        self.messages_on(channel).pop()
    }
}

#[async_trait]
impl OutboundGateway for InMemoryGateway {
    async fn send(&self, message: OutboundMessage) -> Result<(), SagaError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_send {
            return Err(SagaError::ActionFailed(format!(
                "channel '{}' unavailable",
                message.channel()
            )));
        }

        state.sent.push(message);
        Ok(())
    }
}
