use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};

use super::{AgentHandle, HandleError};
use crate::types::Action;

const CHANNEL_BUFFER: usize = 32;

/// Handle backed by a pair of tokio mpsc channels, the shape a live
/// participant connection takes. The session side holds the `ChannelHandle`;
/// the participant side holds the matching `RemoteEnd`.
pub struct ChannelHandle {
    actions: Mutex<mpsc::Receiver<Action>>,
    observations: mpsc::Sender<Action>,
    closed: AtomicBool,
}

/// Participant side of a channel pair. Send actions in, receive peer
/// observations out.
pub struct RemoteEnd {
    pub actions: mpsc::Sender<Action>,
    pub observations: mpsc::Receiver<Action>,
}

impl ChannelHandle {
    pub fn pair() -> (Self, RemoteEnd) {
        let (action_tx, action_rx) = mpsc::channel(CHANNEL_BUFFER);
        let (observation_tx, observation_rx) = mpsc::channel(CHANNEL_BUFFER);

        let handle = Self {
            actions: Mutex::new(action_rx),
            observations: observation_tx,
            closed: AtomicBool::new(false),
        };
        let remote = RemoteEnd {
            actions: action_tx,
            observations: observation_rx,
        };
        (handle, remote)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AgentHandle for ChannelHandle {
    async fn request_action(&self, timeout: Option<Duration>) -> Result<Action, HandleError> {
        if self.is_closed() {
            return Err(HandleError::Disconnected("handle closed".to_string()));
        }

        let mut actions = self.actions.lock().await;
        match timeout {
            Some(bound) => match tokio::time::timeout(bound, actions.recv()).await {
                Ok(Some(action)) => Ok(action),
                Ok(None) => Err(HandleError::Disconnected(
                    "action channel closed".to_string(),
                )),
                Err(_) => Err(HandleError::Timeout { waited: bound }),
            },
            None => actions
                .recv()
                .await
                .ok_or_else(|| HandleError::Disconnected("action channel closed".to_string())),
        }
    }

    async fn push_observation(&self, action: &Action) -> Result<(), HandleError> {
        if self.is_closed() {
            return Err(HandleError::Disconnected("handle closed".to_string()));
        }

        self.observations
            .send(action.clone())
            .await
            .map_err(|_| HandleError::Disconnected("observation channel closed".to_string()))
    }

    async fn close(&self, graceful: bool) -> Result<(), HandleError> {
        if graceful {
            // Let queued observations drain before cutting the channel off.
            self.observations.closed().await;
        }
        self.closed.store(true, Ordering::SeqCst);
        self.actions.lock().await.close();
        Ok(())
    }
}
