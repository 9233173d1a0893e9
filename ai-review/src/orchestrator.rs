//! AI review orchestration: fetch → serialize → generate → parse → post.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info};

use gitlab_api::{FileDiff, GitLabClient, MrId};

use crate::anthropic::AnthropicClient;
use crate::errors::{AiResult, AiReviewError};
use crate::parse::parse_review;
use crate::prompt::{SYSTEM_PROMPT, build_user_message};
use crate::tokens::{REQUEST_OVERHEAD_TOKENS, estimate_tokens};

/// Input assembled for one generation request.
#[derive(Debug, Clone)]
pub struct AiReviewContext {
    pub merge_request_iid: u64,
    pub project: String,
    pub title: String,
    pub description: String,
    /// Serialized diff block, one header per file.
    pub changes: String,
    pub author_username: String,
}

/// Structured review produced by the model.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResult {
    pub summary: String,
    pub suggestions: Vec<String>,
    pub highlights: Vec<String>,
    pub risks: Vec<String>,
    pub metadata: ReviewMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewMetadata {
    pub model: String,
    pub timestamp: DateTime<Utc>,
}

/// Runs the whole review for one MR and posts the result as a note.
#[derive(Debug, Clone)]
pub struct AiReviewOrchestrator {
    gitlab: GitLabClient,
    engine: AnthropicClient,
}

impl AiReviewOrchestrator {
    pub fn new(gitlab: GitLabClient, engine: AnthropicClient) -> Self {
        Self { gitlab, engine }
    }

    /// One attempt, no retries. Any step's failure aborts the call and no
    /// partial comment is posted.
    pub async fn process_review_request(
        &self,
        id: &MrId,
        _trigger_note: &str,
    ) -> AiResult<ReviewResult> {
        let changes = self.gitlab.get_merge_request_changes(id).await.map_err(|e| {
            error!(project = %id.project, iid = id.iid, error = %e, "failed to fetch MR changes");
            e
        })?;

        let context = AiReviewContext {
            merge_request_iid: id.iid,
            project: id.project.clone(),
            title: changes.title,
            description: changes.description.unwrap_or_default(),
            changes: format_changes(&changes.changes),
            author_username: changes.author.username,
        };

        let user_message = build_user_message(&context);

        // Admission check before any provider call.
        let estimated = estimate_tokens(SYSTEM_PROMPT)
            + estimate_tokens(&user_message)
            + REQUEST_OVERHEAD_TOKENS;
        let budget = self.engine.config().prompt_budget();
        if estimated > budget {
            return Err(AiReviewError::TokenLimit { estimated, budget });
        }

        let raw = self.engine.generate(SYSTEM_PROMPT, &user_message).await?;
        let review = parse_review(&raw, self.engine.model()).inspect_err(|e| {
            error!(project = %id.project, iid = id.iid, error = %e, "model response rejected");
        })?;

        let comment = render_review_comment(&review);
        self.gitlab.create_note(id, &comment).await?;

        info!(
            project = %id.project,
            iid = id.iid,
            suggestions = review.suggestions.len(),
            "AI review comment posted"
        );
        Ok(review)
    }
}

/// Serializes file diffs into one text block, each file preceded by a header
/// stating its path and change kind.
pub fn format_changes(changes: &[FileDiff]) -> String {
    changes
        .iter()
        .map(|change| {
            let kind = if change.new_file {
                "new file"
            } else if change.deleted_file {
                "deleted"
            } else {
                "modified"
            };
            format!("File: {} ({})\n{}", change.new_path, kind, change.diff)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Renders the parsed review as the Korean MR comment.
pub fn render_review_comment(review: &ReviewResult) -> String {
    let mut lines: Vec<String> = vec![
        "## AI 리뷰 결과 🤖".to_string(),
        String::new(),
        "### 요약".to_string(),
        review.summary.clone(),
        String::new(),
        "### 잘된 점 ✨".to_string(),
    ];
    lines.extend(review.highlights.iter().map(|h| format!("- {h}")));
    lines.push(String::new());
    lines.push("### 개선 제안 💡".to_string());
    lines.extend(review.suggestions.iter().map(|s| format!("- {s}")));
    lines.push(String::new());

    if !review.risks.is_empty() {
        lines.push("### 주의 사항 ⚠️".to_string());
        lines.extend(review.risks.iter().map(|r| format!("- {r}")));
        lines.push(String::new());
    }

    lines.push("---".to_string());
    lines.push(format!(
        "리뷰 시간: {}",
        review.metadata.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    lines.push(format!("모델: {}", review.metadata.model));

    lines.join("\n")
}
