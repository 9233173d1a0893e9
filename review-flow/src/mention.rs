//! GitLab-user-id → Slack-handle lookup.
//!
//! Immutable configuration data injected at startup. The fallback handle is
//! an explicit field, not an implicit map entry, so an unmapped id is a
//! deliberate choice visible in config.

use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct MentionTable {
    entries: HashMap<u64, String>,
    default_handle: String,
}

impl MentionTable {
    pub fn new(entries: HashMap<u64, String>, default_handle: impl Into<String>) -> Self {
        Self {
            entries,
            default_handle: default_handle.into(),
        }
    }

    /// Parses a `SLACK_USER_MAP`-style spec: comma-separated `id:handle`
    /// pairs, e.g. `"17:jelee,18:manaemee,27:ds.jeon,28:dohkim"`.
    pub fn parse_spec(spec: &str, default_handle: &str) -> Result<Self, String> {
        let mut entries = HashMap::new();
        for pair in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (id, handle) = pair
                .split_once(':')
                .ok_or_else(|| format!("bad mention entry (expected id:handle): {pair}"))?;
            let id: u64 = id
                .trim()
                .parse()
                .map_err(|_| format!("bad GitLab user id in mention entry: {pair}"))?;
            entries.insert(id, handle.trim().to_string());
        }
        Ok(Self::new(entries, default_handle))
    }

    /// Slack mention markup for a GitLab user id.
    pub fn mention(&self, user_id: u64) -> String {
        let handle = self
            .entries
            .get(&user_id)
            .map(String::as_str)
            .unwrap_or(&self.default_handle);
        format!("<@{handle}>")
    }
}
