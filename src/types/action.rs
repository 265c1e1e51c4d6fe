use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One agent's turn output. Immutable once recorded into session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    pub content: String,
    pub episode_done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_data: Option<TaskData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onboarding_data: Option<Value>,
}

/// Side-channel metadata attached to an action when the session is
/// configured to send it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskData {
    pub last_acting_agent: String,
    pub current_dialogue_turn: u32,
    pub utterance_count: u32,
}

impl Action {
    pub fn say(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            episode_done: false,
            task_data: None,
            onboarding_data: None,
        }
    }

    pub fn done(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            episode_done: true,
            task_data: None,
            onboarding_data: None,
        }
    }

    pub fn with_onboarding_data(mut self, data: Value) -> Self {
        self.onboarding_data = Some(data);
        self
    }
}

/// One entry of a persisted transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub speaker: String,
    pub content: String,
}

impl Message {
    pub fn new(speaker: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            content: content.into(),
        }
    }
}
