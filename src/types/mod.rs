pub mod action;
pub mod agent;

pub use action::{Action, Message, TaskData};
pub use agent::Agent;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type SessionId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentStatus {
    Active,  // Taking turns
    Done,    // Signalled episode end
    Errored, // Request failed, no longer solicited
}

impl AgentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AgentStatus::Active => "Active",
            AgentStatus::Done => "Done",
            AgentStatus::Errored => "Errored",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    Running,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionStatus {
    Completed,
    Incomplete,
}
