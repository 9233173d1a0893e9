//! Data model for the GitLab endpoints the pipeline consumes.
//!
//! Only the fields we actually use are deserialized; GitLab sends far more.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A unique reference to a merge request inside GitLab.
///
/// * `project` – numeric project ID or "group/project" path.
/// * `iid`     – merge request IID (project-scoped).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MrId {
    pub project: String,
    pub iid: u64,
}

/// Merge request metadata plus file-level diffs, as returned by
/// `GET /projects/:id/merge_requests/:iid/changes`.
#[derive(Debug, Clone, Deserialize)]
pub struct MrChanges {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub author: MrAuthor,
    pub changes: Vec<FileDiff>,
}

/// Author record attached to MR metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct MrAuthor {
    pub username: String,
}

/// One changed file and its unified diff text.
#[derive(Debug, Clone, Deserialize)]
pub struct FileDiff {
    pub old_path: String,
    pub new_path: String,
    pub new_file: bool,
    pub deleted_file: bool,
    #[serde(default)]
    pub renamed_file: bool,
    /// Unified diff; empty for binary or too-large files.
    #[serde(default)]
    pub diff: String,
}

/// A note (comment) on a merge request.
#[derive(Debug, Clone, Deserialize)]
pub struct MrNote {
    pub id: u64,
    pub body: String,
    pub author: NoteAuthor,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub system: bool,
}

/// Author record attached to a note.
#[derive(Debug, Clone, Deserialize)]
pub struct NoteAuthor {
    pub id: u64,
    pub username: String,
    pub name: String,
}

/// An ordered discussion thread on a merge request.
#[derive(Debug, Clone, Deserialize)]
pub struct Discussion {
    pub id: String,
    pub notes: Vec<MrNote>,
}

/// Sort direction for note listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteSort {
    Asc,
    Desc,
}

impl NoteSort {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            NoteSort::Asc => "asc",
            NoteSort::Desc => "desc",
        }
    }
}

/// Sort key for note listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteOrderBy {
    CreatedAt,
    UpdatedAt,
}

impl NoteOrderBy {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            NoteOrderBy::CreatedAt => "created_at",
            NoteOrderBy::UpdatedAt => "updated_at",
        }
    }
}

/// Optional query parameters for `list_notes`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoteListOptions {
    pub sort: Option<NoteSort>,
    pub order_by: Option<NoteOrderBy>,
}
