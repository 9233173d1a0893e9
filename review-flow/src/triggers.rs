//! Trigger-phrase classification.
//!
//! A note body requests a review action by containing one of the bracketed
//! Korean trigger phrases below. Matching is literal substring containment,
//! case-sensitive, no normalization. The table order is the tie-break when a
//! body contains more than one phrase: the first table entry wins.

use std::fmt;

/// The closed set of review-event kinds. Derived per note body, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    Request,
    Start,
    Complete,
    Response,
    Additional,
    AiReview,
}

impl TriggerKind {
    /// Stable machine-readable name, used in HTTP responses and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            TriggerKind::Request => "request",
            TriggerKind::Start => "start",
            TriggerKind::Complete => "complete",
            TriggerKind::Response => "response",
            TriggerKind::Additional => "additional",
            TriggerKind::AiReview => "ai_review",
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered trigger table. The literal phrases are a team convention on the
/// GitLab side and must not change.
pub const TRIGGERS: [(&str, TriggerKind); 6] = [
    ("[리뷰 요청]", TriggerKind::Request),
    ("[리뷰 시작]", TriggerKind::Start),
    ("[리뷰 완료]", TriggerKind::Complete),
    ("[리뷰 응답]", TriggerKind::Response),
    ("[추가 리뷰]", TriggerKind::Additional),
    ("[AI 리뷰]", TriggerKind::AiReview),
];

/// Maps a note body to a trigger kind, or `None` when the note is not a
/// review command (callers must skip dispatch, not error).
pub fn classify(note: &str) -> Option<TriggerKind> {
    TRIGGERS
        .iter()
        .find(|(phrase, _)| note.contains(phrase))
        .map(|&(_, kind)| kind)
}
