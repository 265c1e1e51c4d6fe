use serde_json::Value;

use super::SessionError;
use crate::config::Config;
use crate::handle::AgentHandle;
use crate::types::Action;

/// Single-agent mini-session run before a candidate is admitted to the main
/// session. One action is solicited, the mini-episode ends regardless of its
/// content, and the verdict comes from the action's onboarding metadata.
pub struct OnboardingGate {
    config: Config,
}

impl OnboardingGate {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// A rejected candidate only ever sees the generic "validation failed",
    /// so the check cannot be gamed from the error message.
    pub async fn run(&self, handle: &dyn AgentHandle) -> Result<(), SessionError> {
        let timeout = handle
            .supports_deadline()
            .then(|| self.config.turn_timeout());

        let act = handle
            .request_action(timeout)
            .await
            .map_err(|source| SessionError::Agent {
                label: "Onboarding Agent".to_string(),
                source,
            })?;

        if validate_onboarding(&act) {
            Ok(())
        } else {
            Err(SessionError::ValidationFailed)
        }
    }
}

/// Pass iff `onboarding_data.success` is boolean true. Absent or falsy
/// metadata fails.
pub fn validate_onboarding(act: &Action) -> bool {
    act.onboarding_data
        .as_ref()
        .and_then(|data| data.get("success"))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}
