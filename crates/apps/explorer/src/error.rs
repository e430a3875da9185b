use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failures reported by explorer tree operations.
///
/// Every variant except [`ExplorerError::Remote`] is detected locally, before any store request is
/// issued, and leaves the tree unchanged.
pub enum ExplorerError {
    /// The node is local or static and cannot be changed through the store.
    #[error("\"{name}\" cannot be {operation} (local node)")]
    IneligibleNode {
        /// Display name of the rejected node.
        name: String,
        /// Past-tense operation label, e.g. `moved`.
        operation: &'static str,
    },
    /// The destination folder is local or static.
    #[error("\"{name}\" cannot receive items (local folder)")]
    IneligibleTarget {
        /// Display name of the rejected folder.
        name: String,
    },
    /// The move would place a folder inside itself.
    #[error("invalid destination: {0}")]
    InvalidDestination(String),
    /// A folder was required.
    #[error("\"{name}\" is not a folder")]
    NotAFolder {
        /// Display name of the offending node.
        name: String,
    },
    /// No name was supplied.
    #[error("a name is required")]
    MissingName,
    /// The name contains a path separator.
    #[error("invalid name \"{0}\"")]
    InvalidName(String),
    /// A sibling already uses the name.
    #[error("an item named \"{name}\" already exists")]
    NameConflict {
        /// Conflicting name.
        name: String,
    },
    /// The caller is not signed in as administrator.
    #[error("you must be logged in as administrator")]
    Unauthenticated,
    /// No node resolves at the path.
    #[error("no item at {path}")]
    NodeNotFound {
        /// Path or id that failed to resolve.
        path: String,
    },
    /// Paste was requested with nothing cut or copied.
    #[error("the clipboard is empty")]
    EmptyClipboard,
    /// The file store rejected the request; the message is the store's own.
    #[error("{0}")]
    Remote(String),
}
