use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Message, SessionId, SubmissionStatus};

/// One finished (or abandoned) session as persisted for later review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: SessionId,
    /// Label of the agent whose work is under review.
    pub subject: String,
    pub messages: Vec<Message>,
    pub status: SubmissionStatus,
    pub completed_at: DateTime<Utc>,
}

/// Repository for session submissions. Injected wherever review or browsing
/// needs past transcripts; nothing in the crate reaches for ambient storage.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn save_submission(&self, record: &SessionRecord) -> Result<()>;
    async fn get_submission(&self, id: SessionId) -> Result<Option<SessionRecord>>;
    async fn list_submissions(
        &self,
        status: Option<SubmissionStatus>,
    ) -> Result<Vec<SessionRecord>>;
}
