pub mod review;

pub use review::{review_completed, review_submission};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::types::Message;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Approve,
    RejectDuplicates,
    RejectMonotonous,
}

impl Verdict {
    pub fn is_approved(&self) -> bool {
        matches!(self, Verdict::Approve)
    }

    pub fn reason(&self) -> Option<&'static str> {
        match self {
            Verdict::Approve => None,
            Verdict::RejectDuplicates => {
                Some("There are too many duplicates replies in your conversation.")
            }
            Verdict::RejectMonotonous => {
                Some("There are too many monotonous replies in your conversation.")
            }
        }
    }
}

/// Score one subject's side of a finished transcript. Pure and
/// deterministic: no I/O, no state.
///
/// Replies are normalized (trimmed, lowercased) before comparison. The
/// duplicate count is how many replies collapse away under deduplication;
/// the monotony count is how many distinct replies are at or under the
/// minimum length. Duplicates are checked first.
pub fn score_transcript(
    messages: &[Message],
    subject: &str,
    max_duplicates: usize,
    min_reply_length: usize,
) -> Verdict {
    let normalized: Vec<String> = messages
        .iter()
        .filter(|message| message.speaker == subject)
        .map(|message| message.content.trim().to_lowercase())
        .collect();
    let distinct: HashSet<&str> = normalized.iter().map(String::as_str).collect();

    let duplicates = normalized.len() - distinct.len();
    if duplicates >= max_duplicates {
        return Verdict::RejectDuplicates;
    }

    let monotonous = distinct
        .iter()
        .filter(|reply| reply.chars().count() <= min_reply_length)
        .count();
    if monotonous >= max_duplicates {
        return Verdict::RejectMonotonous;
    }

    Verdict::Approve
}
