use chrono::Utc;

use crate::config::Config;
use crate::storage::SessionRecord;
use crate::types::{
    Action, Agent, AgentStatus, Message, SessionId, SessionStatus, SubmissionStatus,
};

/// Counters and accumulated per-round actions for one ongoing conversation.
/// Mutated only by the coordinator's single logical thread of control.
#[derive(Debug)]
pub struct SessionState {
    pub id: SessionId,
    pub agents: Vec<Agent>,
    /// Most recent action per agent slot, overwritten each round. Only the
    /// last action participates in subsequent observation.
    pub acts: Vec<Option<Action>>,
    /// Completed rounds. Never decreases.
    pub round: u32,
    /// Sticky termination flag. Once set it is never cleared.
    pub episode_done: bool,
    pub status: SessionStatus,
    pub transcript: Vec<Message>,
    pub config: Config,
}

impl SessionState {
    pub fn new(agent_count: usize, config: Config) -> Self {
        let agents = (0..agent_count).map(Agent::new).collect();
        Self {
            id: SessionId::new_v4(),
            agents,
            acts: vec![None; agent_count],
            round: 0,
            episode_done: false,
            status: SessionStatus::Running,
            transcript: Vec::new(),
            config,
        }
    }

    /// Record one agent's action for the current round and append it to the
    /// transcript. A terminating action sticks: the flag never resets.
    pub fn record_act(&mut self, index: usize, action: Action) {
        let message = Message::new(self.agents[index].label.clone(), action.content.clone());
        self.transcript.push(message);
        if action.episode_done {
            self.episode_done = true;
            self.agents[index].status = AgentStatus::Done;
        }
        self.acts[index] = Some(action);
    }

    pub fn complete_round(&mut self) {
        self.round += 1;
    }

    /// Terminal check, applied only at round boundaries.
    pub fn should_complete(&self) -> bool {
        self.episode_done || self.round >= self.config.max_rounds
    }

    pub fn mark_completed(&mut self) {
        self.status = SessionStatus::Completed;
    }

    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    /// Freeze this session into a persistable submission for the given
    /// subject agent.
    pub fn into_record(self, subject: impl Into<String>) -> SessionRecord {
        let status = match self.status {
            SessionStatus::Completed => SubmissionStatus::Completed,
            SessionStatus::Running => SubmissionStatus::Incomplete,
        };
        SessionRecord {
            id: self.id,
            subject: subject.into(),
            messages: self.transcript,
            status,
            completed_at: Utc::now(),
        }
    }
}
