use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AgentStatus;

/// One admitted participant. The display label is assigned from the agent's
/// position in admission order and is unique within a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: Uuid,
    pub label: String,
    pub status: AgentStatus,
}

impl Agent {
    pub fn new(index: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: format!("Chat Agent {}", index + 1),
            status: AgentStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == AgentStatus::Active
    }
}
