//! Projects notification records into Slack messages.
//!
//! Pure functions: no I/O, deterministic given the notification and the
//! mention table. The Korean phrase templates are team-facing copy and must
//! match the established conventions verbatim.

use slack_notify::{Block, SlackMessage};

use crate::mention::MentionTable;
use crate::triggers::TriggerKind;
use crate::types::{MergeNotification, ReviewNotification};

/// Header phrase per trigger kind.
pub fn header_phrase(kind: TriggerKind) -> &'static str {
    match kind {
        TriggerKind::Request => "🙏 리뷰 요청",
        TriggerKind::Start => "👀 리뷰 시작",
        TriggerKind::Complete => "✅ 리뷰 완료",
        TriggerKind::Response => "💬 리뷰 응답",
        TriggerKind::Additional => "📝 추가 리뷰",
        TriggerKind::AiReview => "🤖 AI 리뷰",
    }
}

/// Renders a review notification into the chat message shape.
pub fn create_review_message(
    notification: &ReviewNotification,
    mentions: &MentionTable,
) -> SlackMessage {
    let header_text = action_text(notification, mentions);

    SlackMessage {
        text: header_text.clone(),
        blocks: vec![
            Block::header(header_text),
            merge_request_block(notification, mentions),
            footer_block(notification, mentions),
            Block::Divider,
        ],
    }
}

/// Header line: kind phrase plus who did what, with discussion context for
/// responses.
fn action_text(notification: &ReviewNotification, mentions: &MentionTable) -> String {
    let reviewer = mentions.mention(notification.actor_id);
    let author = mentions.mention(notification.merge_request.author_id);
    let is_author = notification.actor_id == notification.merge_request.author_id;
    let header = header_phrase(notification.kind);

    match notification.kind {
        TriggerKind::Request | TriggerKind::Additional => {
            format!("{header} - {author}님이 요청")
        }
        TriggerKind::Start | TriggerKind::Complete => {
            format!("{header} - {reviewer}님이 {author}님의 MR 검토")
        }
        TriggerKind::Response => {
            let mut text = if is_author {
                format!("{header} - {author}님이 응답")
            } else {
                format!("{header} - {reviewer}님이 {author}님의 MR에 응답")
            };

            if let Some(discussion) = &notification.discussion {
                let thread_owner = mentions.mention(discussion.original_author.id);
                text.push_str(&format!(" in 📝 {thread_owner}님의 쓰레드"));
                if discussion.last_reply_author.id != discussion.original_author.id {
                    let last_replier = mentions.mention(discussion.last_reply_author.id);
                    text.push_str(&format!(" (마지막 답변: {last_replier})"));
                }
            }
            text
        }
        TriggerKind::AiReview => {
            if is_author {
                format!("{author}님의 코멘트")
            } else {
                format!("{reviewer}님이 {author}님의 코드에 코멘트")
            }
        }
    }
}

fn merge_request_block(notification: &ReviewNotification, mentions: &MentionTable) -> Block {
    let mr = &notification.merge_request;
    let author = mentions.mention(mr.author_id);

    let info = [
        format!("*제목:* <{}|{}>", mr.url, mr.title),
        format!("*작성자:* {author}"),
        format!("*브랜치:* `{}` → `{}`", mr.source_branch, mr.target_branch),
        format!("*코멘트:* <{}|보기>", notification.note_url),
    ];
    Block::section(info.join("\n"))
}

fn footer_block(notification: &ReviewNotification, mentions: &MentionTable) -> Block {
    let reviewer = mentions.mention(notification.actor_id);
    let footer = match notification.kind {
        TriggerKind::Request => format!("{reviewer}님이 리뷰를 요청했습니다"),
        TriggerKind::Start => format!("{reviewer}님이 리뷰를 시작했습니다"),
        TriggerKind::Complete => format!("{reviewer}님이 리뷰를 완료했습니다"),
        TriggerKind::Response => format!("{reviewer}님이 리뷰에 응답했습니다"),
        TriggerKind::Additional => format!("{reviewer}님이 추가 리뷰를 요청했습니다"),
        TriggerKind::AiReview => format!("{reviewer}님이 코멘트를 남겼습니다"),
    };
    Block::context(format!(
        "👤 {footer} • <{}|코멘트 보기>",
        notification.note_url
    ))
}

/// Renders a merge notification into the chat message shape.
pub fn create_merge_message(
    notification: &MergeNotification,
    mentions: &MentionTable,
) -> SlackMessage {
    let actor = mentions.mention(notification.actor_id);
    let mr = &notification.merge_request;
    let header_text = format!("🎉 MR 머지 완료 - {actor}님이 머지");

    let mut info = vec![
        format!("*제목:* <{}|{}>", mr.url, mr.title),
        format!("*브랜치:* `{}` → `{}`", mr.source_branch, mr.target_branch),
    ];
    if !mr.description.is_empty() {
        info.push(format!("*설명:* {}", mr.description));
    }
    if !notification.reviewers.is_empty() {
        let reviewers = notification
            .reviewers
            .iter()
            .map(|r| mentions.mention(r.id))
            .collect::<Vec<_>>()
            .join(", ");
        info.push(format!("*리뷰어:* {reviewers}"));
    }

    SlackMessage {
        text: header_text.clone(),
        blocks: vec![
            Block::header(header_text),
            Block::section(info.join("\n")),
            Block::context(format!("🔀 `{}` 프로젝트", notification.project)),
            Block::Divider,
        ],
    }
}
