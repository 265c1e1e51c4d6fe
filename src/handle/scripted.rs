use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use super::{AgentHandle, HandleError};
use crate::types::Action;

/// Automated participant that replays a fixed script, one line per turn.
/// Scripted agents have no live connection to bound, so they do not support
/// deadlines and are always waited on unbounded.
pub struct ScriptedHandle {
    lines: Vec<String>,
    cursor: AtomicUsize,
    end_episode_on_last: bool,
    onboarding_success: Option<bool>,
    observed: Mutex<Vec<Action>>,
    closed: AtomicBool,
}

impl ScriptedHandle {
    pub fn new(lines: Vec<String>) -> Self {
        Self {
            lines,
            cursor: AtomicUsize::new(0),
            end_episode_on_last: false,
            onboarding_success: None,
            observed: Mutex::new(Vec::new()),
            closed: AtomicBool::new(false),
        }
    }

    /// Mark the final scripted line as the episode-ending action.
    pub fn end_episode_on_last(mut self) -> Self {
        self.end_episode_on_last = true;
        self
    }

    /// Attach an onboarding outcome to every produced action.
    pub fn with_onboarding_success(mut self, success: bool) -> Self {
        self.onboarding_success = Some(success);
        self
    }

    /// Actions this participant has observed from its peers, in arrival order.
    pub fn observed(&self) -> Vec<Action> {
        self.observed.lock().unwrap().clone()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AgentHandle for ScriptedHandle {
    fn supports_deadline(&self) -> bool {
        false
    }

    async fn request_action(&self, _timeout: Option<Duration>) -> Result<Action, HandleError> {
        if self.is_closed() {
            return Err(HandleError::Disconnected("handle closed".to_string()));
        }

        let index = self.cursor.fetch_add(1, Ordering::SeqCst);
        let mut action = match self.lines.get(index) {
            Some(line) if self.end_episode_on_last && index + 1 == self.lines.len() => {
                Action::done(line.clone())
            }
            Some(line) => Action::say(line.clone()),
            // Script exhausted: end the episode rather than stall the round.
            None => Action::done(String::new()),
        };

        if let Some(success) = self.onboarding_success {
            action = action.with_onboarding_data(json!({ "success": success }));
        }
        Ok(action)
    }

    async fn push_observation(&self, action: &Action) -> Result<(), HandleError> {
        if self.is_closed() {
            return Err(HandleError::Disconnected("handle closed".to_string()));
        }
        self.observed.lock().unwrap().push(action.clone());
        Ok(())
    }

    async fn close(&self, _graceful: bool) -> Result<(), HandleError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replays_lines_in_order() {
        let handle = ScriptedHandle::new(vec!["one".to_string(), "two".to_string()]);

        assert_eq!(handle.request_action(None).await.unwrap().content, "one");
        assert_eq!(handle.request_action(None).await.unwrap().content, "two");
    }

    #[tokio::test]
    async fn test_exhausted_script_ends_episode() {
        let handle = ScriptedHandle::new(vec!["only".to_string()]);

        handle.request_action(None).await.unwrap();
        let action = handle.request_action(None).await.unwrap();
        assert!(action.episode_done);
    }

    #[tokio::test]
    async fn test_end_episode_on_last_line() {
        let handle =
            ScriptedHandle::new(vec!["first".to_string(), "bye".to_string()]).end_episode_on_last();

        assert!(!handle.request_action(None).await.unwrap().episode_done);
        let last = handle.request_action(None).await.unwrap();
        assert_eq!(last.content, "bye");
        assert!(last.episode_done);
    }

    #[tokio::test]
    async fn test_onboarding_data_attached() {
        let handle = ScriptedHandle::new(vec!["hi".to_string()]).with_onboarding_success(true);

        let action = handle.request_action(None).await.unwrap();
        let data = action.onboarding_data.unwrap();
        assert_eq!(data["success"], true);
    }

    #[tokio::test]
    async fn test_closed_handle_disconnects() {
        let handle = ScriptedHandle::new(vec!["hi".to_string()]);
        handle.close(true).await.unwrap();

        let result = handle.request_action(None).await;
        assert!(matches!(result, Err(HandleError::Disconnected(_))));
    }
}
