//! Shared host-service bundle injected into the desktop runtime and explorer.

use std::rc::Rc;

use crate::{
    FileStoreService, MemoryFileStore, MemoryPostFeed, MemoryPrefsStore, NoopFileStoreService,
    NoopPostFeed, NoopPrefsStore, PostFeedService, PrefsStore,
};

/// Runtime-selected host service bundle.
///
/// Environment-specific service selection happens before this bundle is constructed, which keeps
/// the runtime and explorer decoupled from browser or network adapter details.
#[derive(Clone)]
pub struct HostServices {
    /// Browser-local key-value preference store.
    pub prefs: Rc<dyn PrefsStore>,
    /// Server-backed file store.
    pub files: Rc<dyn FileStoreService>,
    /// Blog post feed.
    pub posts: Rc<dyn PostFeedService>,
}

impl HostServices {
    /// Bundle whose services hold nothing and reject store mutations.
    pub fn noop() -> Self {
        Self {
            prefs: Rc::new(NoopPrefsStore),
            files: Rc::new(NoopFileStoreService),
            posts: Rc::new(NoopPostFeed),
        }
    }

    /// Bundle backed by the given in-memory adapters.
    ///
    /// The adapters share state with their clones, so callers may keep handles for seeding and
    /// inspection.
    pub fn memory(prefs: MemoryPrefsStore, files: MemoryFileStore, posts: MemoryPostFeed) -> Self {
        Self {
            prefs: Rc::new(prefs),
            files: Rc::new(files),
            posts: Rc::new(posts),
        }
    }
}

impl std::fmt::Debug for HostServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostServices").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::{CreateFileRequest, StoreEntryKind};

    #[test]
    fn memory_bundle_shares_state_with_seed_handles() {
        let files = MemoryFileStore::default();
        let prefs = MemoryPrefsStore::default();
        let host = HostServices::memory(prefs.clone(), files.clone(), MemoryPostFeed::default());

        block_on(host.files.create(CreateFileRequest {
            name: "docs".to_string(),
            kind: StoreEntryKind::Folder,
            content: None,
            parent_id: None,
            icon: None,
        }))
        .expect("create");
        host.prefs.set("k", "1").expect("set");

        assert_eq!(files.records().len(), 1);
        assert_eq!(prefs.get("k").expect("get").as_deref(), Some("1"));
    }

    #[test]
    fn noop_bundle_rejects_store_mutations() {
        let host = HostServices::noop();
        assert!(block_on(host.files.delete("65a1f0c2b3d4e5f60718293a")).is_err());
        assert!(block_on(host.posts.list_posts(10)).expect("posts").is_empty());
    }
}
