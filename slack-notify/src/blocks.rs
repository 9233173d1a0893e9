//! Minimal Block Kit model: the four block shapes the formatter emits.

use serde::Serialize;

/// One outgoing chat message: plain-text fallback plus structured blocks.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SlackMessage {
    pub text: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Header { text: Text },
    Section { text: Text },
    Context { elements: Vec<Text> },
    Divider,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Text {
    PlainText { text: String, emoji: bool },
    Mrkdwn { text: String },
}

impl Block {
    /// Header block with emoji-enabled plain text.
    pub fn header(text: impl Into<String>) -> Self {
        Block::Header {
            text: Text::PlainText {
                text: text.into(),
                emoji: true,
            },
        }
    }

    /// Section block with mrkdwn text.
    pub fn section(text: impl Into<String>) -> Self {
        Block::Section {
            text: Text::Mrkdwn { text: text.into() },
        }
    }

    /// Context block with a single mrkdwn element.
    pub fn context(text: impl Into<String>) -> Self {
        Block::Context {
            elements: vec![Text::Mrkdwn { text: text.into() }],
        }
    }
}
