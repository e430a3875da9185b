//! Typed host-domain contracts and shared models used by the desktop runtime and explorer.
//!
//! This crate is the API-first boundary for platform services. It exposes the virtual path
//! helpers, the remote file-store and post-feed contracts with their wire records, and the
//! key-value preference store. Concrete browser transports live outside the workspace; the
//! in-memory adapters here back tests and offline use.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod fs;
pub mod host;
pub mod storage;

pub use fs::path::{
    is_same_or_descendant, is_store_id, join_virtual_path, parent_virtual_path,
    rebase_virtual_path, VIRTUAL_ROOT, VIRTUAL_SEPARATOR,
};
pub use fs::service::{
    FileStoreFuture, FileStoreService, MemoryFileStore, MemoryPostFeed, NoopFileStoreService,
    NoopPostFeed, PostFeedService,
};
pub use host::HostServices;
pub use fs::types::{
    BlogPostRecord, CreateFileRequest, DesktopEntry, StoreEntryKind, StoreFileRecord,
    UpdateFileRequest, DESKTOP_ENTRIES_KEY,
};
pub use storage::prefs::{
    load_pref_with, save_pref_with, MemoryPrefsStore, NoopPrefsStore, PrefsStore,
};
