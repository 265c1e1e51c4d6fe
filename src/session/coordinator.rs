use futures::future::join_all;
use std::sync::Arc;

use super::state::SessionState;
use super::{teardown, SessionError};
use crate::config::Config;
use crate::handle::AgentHandle;
use crate::types::{Action, AgentStatus, TaskData};

struct Participant {
    handle: Arc<dyn AgentHandle>,
    /// Capability flag read once at admission. Participants without deadline
    /// support are always waited on unbounded.
    bounded: bool,
}

/// Drives one round-robin dialogue session to completion. Each round, every
/// agent in admission order produces exactly one action, receiving as input
/// the actions of all other agents since it last acted.
pub struct Coordinator {
    participants: Vec<Participant>,
    state: SessionState,
}

impl Coordinator {
    pub fn admit(handles: Vec<Arc<dyn AgentHandle>>, config: Config) -> Self {
        let state = SessionState::new(handles.len(), config);
        let participants = handles
            .into_iter()
            .map(|handle| {
                let bounded = handle.supports_deadline();
                Participant { handle, bounded }
            })
            .collect();
        Self {
            participants,
            state,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Run rounds until an agent ends the episode or the configured round
    /// limit is reached. Both checks apply only at round boundaries.
    pub async fn run(&mut self) -> Result<(), SessionError> {
        while self.state.is_running() {
            self.parley().await?;
            if self.state.should_complete() {
                self.state.mark_completed();
            }
        }
        Ok(())
    }

    /// One round: for each agent, solicit an action and broadcast it to every
    /// other active agent before that peer's own next turn comes around.
    pub async fn parley(&mut self) -> Result<(), SessionError> {
        let dialogue_turn = self.state.round + 1;

        for index in 0..self.participants.len() {
            let label = self.state.agents[index].label.clone();
            let timeout = self.participants[index]
                .bounded
                .then(|| self.state.config.turn_timeout());

            let mut act = match self.participants[index].handle.request_action(timeout).await {
                Ok(act) => act,
                Err(source) => {
                    self.state.agents[index].status = AgentStatus::Errored;
                    return Err(SessionError::Agent { label, source });
                }
            };

            if self.state.config.send_task_data {
                act.task_data = Some(TaskData {
                    last_acting_agent: label.clone(),
                    current_dialogue_turn: dialogue_turn,
                    utterance_count: dialogue_turn + index as u32,
                });
            }

            self.state.record_act(index, act.clone());
            self.broadcast(index, &act).await?;
        }

        self.state.complete_round();
        Ok(())
    }

    /// Deliver one action to every other active peer. Peers need no ordering
    /// relative to each other, so pushes run concurrently.
    async fn broadcast(&mut self, origin: usize, act: &Action) -> Result<(), SessionError> {
        let peers: Vec<usize> = (0..self.participants.len())
            .filter(|&i| i != origin && self.state.agents[i].is_active())
            .collect();

        let pushes = peers
            .iter()
            .map(|&i| self.participants[i].handle.push_observation(act));
        let results = join_all(pushes).await;

        for (&peer, result) in peers.iter().zip(results) {
            if let Err(source) = result {
                self.state.agents[peer].status = AgentStatus::Errored;
                return Err(SessionError::Agent {
                    label: self.state.agents[peer].label.clone(),
                    source,
                });
            }
        }
        Ok(())
    }

    /// Tear down all agent connections and hand back the final session
    /// state. Per-agent close failures are contained by the supervisor and
    /// never surface here.
    pub async fn shutdown(self) -> SessionState {
        let Coordinator {
            participants,
            state,
        } = self;
        let handles = state
            .agents
            .iter()
            .map(|agent| agent.label.clone())
            .zip(participants.into_iter().map(|p| p.handle))
            .collect();
        teardown::shutdown_all(handles).await;
        state
    }
}
