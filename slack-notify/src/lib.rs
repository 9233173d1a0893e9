//! Slack Web API client and Block Kit value types.
//!
//! The pipeline needs exactly two methods: `auth.test` (startup
//! connectivity check) and `chat.postMessage` (one configured channel, no
//! threading, no message updates).

pub mod blocks;
pub mod client;
pub mod errors;

pub use blocks::{Block, SlackMessage, Text};
pub use client::{SlackClient, SlackConfig};
pub use errors::{SlackError, SlackResult};

#[cfg(test)]
mod client_tests;
