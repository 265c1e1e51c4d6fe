pub mod coordinator;
pub mod onboarding;
pub mod state;
pub mod teardown;

pub use coordinator::Coordinator;
pub use onboarding::OnboardingGate;
pub use state::SessionState;

use thiserror::Error;

use crate::handle::HandleError;

#[derive(Debug, Error)]
pub enum SessionError {
    /// One agent's request or observation failed mid-round. The handle error
    /// stays typed so the caller can tell a timeout from a disconnect and
    /// apply its own retry-or-terminate policy.
    #[error("{label}: {source}")]
    Agent {
        label: String,
        #[source]
        source: HandleError,
    },
    /// Onboarding verdict was negative. Deliberately carries no detail.
    #[error("validation failed")]
    ValidationFailed,
}
