//! File-store and post-feed wire types shared across host contracts and implementations.

use serde::{Deserialize, Serialize};

/// localStorage key holding browser-local desktop entries.
pub const DESKTOP_ENTRIES_KEY: &str = "desktop_folders";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Kind of a record held by the remote file store.
pub enum StoreEntryKind {
    /// Leaf file with text content.
    File,
    /// Folder that may contain children.
    Folder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// File or folder record as returned by the remote file store.
pub struct StoreFileRecord {
    /// Store primary key (24 hexadecimal digits).
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// File or folder kind.
    #[serde(rename = "type")]
    pub kind: StoreEntryKind,
    /// Text content (files only; empty for folders).
    #[serde(default)]
    pub content: String,
    /// Parent folder id, `None` for root-level records.
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Store-side path of the parent, `/`-joined with a trailing separator.
    #[serde(default)]
    pub path: String,
    /// Optional icon hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Content length in bytes.
    #[serde(default)]
    pub size: u64,
    /// Last update timestamp as reported by the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Nested children when returned from a tree query (folders only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<StoreFileRecord>>,
}

impl StoreFileRecord {
    /// Returns `true` when the record is a folder.
    pub fn is_folder(&self) -> bool {
        self.kind == StoreEntryKind::Folder
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Request body for creating a file or folder in the remote store.
pub struct CreateFileRequest {
    /// Display name of the new entry.
    pub name: String,
    /// File or folder kind.
    #[serde(rename = "type")]
    pub kind: StoreEntryKind,
    /// Initial text content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Parent folder id, `None` to create at the store root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Optional icon hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
/// Partial update applied to an existing store record.
pub struct UpdateFileRequest {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replacement content; the store recomputes `size` from it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// New icon hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Blog post record as returned by the post feed.
pub struct BlogPostRecord {
    /// Store primary key.
    #[serde(rename = "_id")]
    pub id: String,
    /// Post title.
    pub title: String,
    /// Post body.
    #[serde(default)]
    pub content: String,
    /// Optional short summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Category; posts without one are grouped under `General`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// View counter.
    #[serde(default)]
    pub views: u64,
    /// Creation date, already formatted for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last update date, already formatted for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Browser-local desktop item persisted under [`DESKTOP_ENTRIES_KEY`].
///
/// `kind` is free-form because the desktop also stores app launchers and system icons; only
/// `folder` and `file` entries become explorer nodes.
pub struct DesktopEntry {
    /// Local identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Entry type string (`folder`, `file`, `app`, `system`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Optional text content for files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Optional icon hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}
