use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::traits::{SessionRecord, SubmissionStore};
use crate::types::{SessionId, SubmissionStatus};

#[derive(Clone, Default)]
pub struct InMemoryStore {
    submissions: Arc<RwLock<HashMap<SessionId, SessionRecord>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubmissionStore for InMemoryStore {
    async fn save_submission(&self, record: &SessionRecord) -> Result<()> {
        let mut submissions = self.submissions.write().unwrap();
        submissions.insert(record.id, record.clone());
        Ok(())
    }

    async fn get_submission(&self, id: SessionId) -> Result<Option<SessionRecord>> {
        let submissions = self.submissions.read().unwrap();
        Ok(submissions.get(&id).cloned())
    }

    async fn list_submissions(
        &self,
        status: Option<SubmissionStatus>,
    ) -> Result<Vec<SessionRecord>> {
        let submissions = self.submissions.read().unwrap();
        let mut records: Vec<SessionRecord> = submissions
            .values()
            .filter(|record| status.map(|s| record.status == s).unwrap_or(true))
            .cloned()
            .collect();
        records.sort_by_key(|record| record.completed_at);
        Ok(records)
    }
}
