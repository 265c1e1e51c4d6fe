use anyhow::{anyhow, Result};

use super::{score_transcript, Verdict};
use crate::config::Config;
use crate::storage::SubmissionStore;
use crate::types::{SessionId, SubmissionStatus};

/// Score one persisted submission against the configured thresholds.
pub async fn review_submission(
    store: &dyn SubmissionStore,
    id: SessionId,
    config: &Config,
) -> Result<Verdict> {
    let record = store
        .get_submission(id)
        .await?
        .ok_or_else(|| anyhow!("submission {} not found", id))?;

    Ok(score_transcript(
        &record.messages,
        &record.subject,
        config.max_duplicates,
        config.min_reply_length,
    ))
}

/// Review every completed submission in the store, in the order the store
/// returns them. Incomplete submissions are never scored.
pub async fn review_completed(
    store: &dyn SubmissionStore,
    config: &Config,
) -> Result<Vec<(SessionId, Verdict)>> {
    let completed = store
        .list_submissions(Some(SubmissionStatus::Completed))
        .await?;

    let mut verdicts = Vec::with_capacity(completed.len());
    for record in completed {
        let verdict = score_transcript(
            &record.messages,
            &record.subject,
            config.max_duplicates,
            config.min_reply_length,
        );
        verdicts.push((record.id, verdict));
    }
    Ok(verdicts)
}
