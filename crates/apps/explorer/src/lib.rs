//! Virtual file tree behind the desktop's file explorer.
//!
//! The tree merges a static `My Computer` hierarchy with records from the remote file store,
//! browser-local desktop entries, and the blog post feed. [`ExplorerSession`] adds navigation,
//! selection, a cut/copy clipboard, and store-backed create, rename, delete, and move.

pub mod clipboard;
pub mod desktop_entries;
pub mod error;
pub mod merge;
pub mod navigation;
pub mod node;
pub mod session;
pub mod static_tree;

pub use clipboard::{Clipboard, ClipboardAction, ClipboardEntry, NodeSnapshot};
pub use desktop_entries::{load_desktop_entries, remove_desktop_entry, save_desktop_entry};
pub use error::ExplorerError;
pub use merge::{
    merge_tree, post_file_content, BLOG_POSTS_ID, BLOG_POSTS_NAME, DEFAULT_POST_CATEGORY,
    SERVER_FILES_ID, SERVER_FILES_NAME,
};
pub use navigation::NavigationHistory;
pub use node::{
    validate_name, FileMeta, FileNode, FileTree, FolderMeta, MovePlan, NodeKey, NodeKind,
    NodeType, TreeNode,
};
pub use session::{ExplorerSession, PasteOutcome, POST_FEED_LIMIT};
pub use static_tree::{default_static_tree, DEFAULT_START_PATH, DESKTOP_ID};
