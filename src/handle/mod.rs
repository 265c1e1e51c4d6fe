pub mod channel;
pub mod scripted;

pub use channel::{ChannelHandle, RemoteEnd};
pub use scripted::ScriptedHandle;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::types::Action;

#[derive(Debug, Error)]
pub enum HandleError {
    #[error("agent did not act within {waited:?}")]
    Timeout { waited: Duration },
    #[error("agent handle disconnected: {0}")]
    Disconnected(String),
}

/// Bidirectional channel to one participant.
///
/// Implementations fall into two kinds: handles that can bound a wait with a
/// deadline (live participants) and handles that cannot (automated agents).
/// The distinction is a capability, not an error, and is read once at
/// admission via `supports_deadline`.
#[async_trait]
pub trait AgentHandle: Send + Sync {
    /// Whether `request_action` honors a timeout. Handles returning false
    /// are always waited on unbounded.
    fn supports_deadline(&self) -> bool {
        true
    }

    /// Block until the participant produces its next action. A `Some`
    /// timeout is a hard upper bound on the wait; expiry fails with
    /// `HandleError::Timeout`, distinct from a disconnect.
    async fn request_action(&self, timeout: Option<Duration>) -> Result<Action, HandleError>;

    /// Deliver a peer's action to this participant.
    async fn push_observation(&self, action: &Action) -> Result<(), HandleError>;

    /// Release the participant's channel. `graceful` waits for in-flight
    /// delivery with no enforced deadline. Best-effort either way.
    async fn close(&self, graceful: bool) -> Result<(), HandleError>;
}
