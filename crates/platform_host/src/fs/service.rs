//! Remote file-store and post-feed service contracts.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

use super::types::{
    BlogPostRecord, CreateFileRequest, StoreEntryKind, StoreFileRecord, UpdateFileRequest,
};

/// Object-safe boxed future used by [`FileStoreService`] and [`PostFeedService`] async methods.
pub type FileStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for the server-backed file store.
///
/// Errors carry the store's message verbatim so callers can surface it unchanged.
pub trait FileStoreService {
    /// Returns the complete store as a nested tree of root-level records.
    fn tree<'a>(&'a self) -> FileStoreFuture<'a, Result<Vec<StoreFileRecord>, String>>;

    /// Lists the direct children of `parent_id` (root level when `None`), folders first.
    fn list<'a>(
        &'a self,
        parent_id: Option<&'a str>,
    ) -> FileStoreFuture<'a, Result<Vec<StoreFileRecord>, String>>;

    /// Creates a file or folder.
    fn create<'a>(
        &'a self,
        request: CreateFileRequest,
    ) -> FileStoreFuture<'a, Result<StoreFileRecord, String>>;

    /// Applies a partial update to a record.
    fn update<'a>(
        &'a self,
        id: &'a str,
        request: UpdateFileRequest,
    ) -> FileStoreFuture<'a, Result<StoreFileRecord, String>>;

    /// Moves a record under `target_id`, recomputing its and its descendants' paths.
    fn move_node<'a>(
        &'a self,
        id: &'a str,
        target_id: &'a str,
    ) -> FileStoreFuture<'a, Result<StoreFileRecord, String>>;

    /// Deletes a record; folders cascade to every descendant.
    fn delete<'a>(&'a self, id: &'a str) -> FileStoreFuture<'a, Result<(), String>>;
}

/// Host service for the blog post feed rendered into the explorer tree.
pub trait PostFeedService {
    /// Lists up to `limit` published posts.
    fn list_posts<'a>(
        &'a self,
        limit: usize,
    ) -> FileStoreFuture<'a, Result<Vec<BlogPostRecord>, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op file store for unsupported targets and baseline tests.
pub struct NoopFileStoreService;

impl NoopFileStoreService {
    fn unsupported_error(op: &str) -> String {
        format!("file store unavailable: {op}")
    }
}

impl FileStoreService for NoopFileStoreService {
    fn tree<'a>(&'a self) -> FileStoreFuture<'a, Result<Vec<StoreFileRecord>, String>> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn list<'a>(
        &'a self,
        _parent_id: Option<&'a str>,
    ) -> FileStoreFuture<'a, Result<Vec<StoreFileRecord>, String>> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn create<'a>(
        &'a self,
        _request: CreateFileRequest,
    ) -> FileStoreFuture<'a, Result<StoreFileRecord, String>> {
        Box::pin(async { Err(Self::unsupported_error("create")) })
    }

    fn update<'a>(
        &'a self,
        _id: &'a str,
        _request: UpdateFileRequest,
    ) -> FileStoreFuture<'a, Result<StoreFileRecord, String>> {
        Box::pin(async { Err(Self::unsupported_error("update")) })
    }

    fn move_node<'a>(
        &'a self,
        _id: &'a str,
        _target_id: &'a str,
    ) -> FileStoreFuture<'a, Result<StoreFileRecord, String>> {
        Box::pin(async { Err(Self::unsupported_error("move")) })
    }

    fn delete<'a>(&'a self, _id: &'a str) -> FileStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Err(Self::unsupported_error("delete")) })
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Post feed that never returns posts.
pub struct NoopPostFeed;

impl PostFeedService for NoopPostFeed {
    fn list_posts<'a>(
        &'a self,
        _limit: usize,
    ) -> FileStoreFuture<'a, Result<Vec<BlogPostRecord>, String>> {
        Box::pin(async { Ok(Vec::new()) })
    }
}

/// Base value for ids minted by [`MemoryFileStore`], formatted as 24 hex digits.
const MEMORY_ID_BASE: u128 = 0x65a1_f0c2_b3d4_e5f6_0000_0000;
const STORE_ROOT_PATH: &str = "/";

#[derive(Debug, Default)]
struct MemoryFileStoreInner {
    records: Vec<StoreFileRecord>,
    minted: u64,
    pending_failure: Option<String>,
}

impl MemoryFileStoreInner {
    fn mint_id(&mut self) -> String {
        self.minted += 1;
        format!("{:024x}", MEMORY_ID_BASE + u128::from(self.minted))
    }

    fn take_failure(&mut self) -> Result<(), String> {
        match self.pending_failure.take() {
            Some(message) => Err(message),
            None => Ok(()),
        }
    }

    fn get(&self, id: &str) -> Option<&StoreFileRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    fn subtree_prefix(record: &StoreFileRecord) -> String {
        format!("{}{}/", record.path, record.name)
    }

    fn rebase_descendants(&mut self, old_prefix: &str, new_prefix: &str) {
        for record in &mut self.records {
            if let Some(rest) = record.path.strip_prefix(old_prefix) {
                record.path = format!("{new_prefix}{rest}");
            }
        }
    }

    fn build_tree(&self, parent_id: Option<&str>) -> Vec<StoreFileRecord> {
        let mut level: Vec<&StoreFileRecord> = self
            .records
            .iter()
            .filter(|r| r.parent_id.as_deref() == parent_id)
            .collect();
        level.sort_by(|a, b| a.path.cmp(&b.path));
        level
            .into_iter()
            .map(|record| {
                let mut node = record.clone();
                node.children = record
                    .is_folder()
                    .then(|| self.build_tree(Some(record.id.as_str())));
                node
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory file store mirroring the remote store's path and cascade rules.
///
/// Store paths are `/`-joined parent paths with a trailing separator (`/` at the root); a record
/// named `b` inside root folder `a` has path `/a/`.
pub struct MemoryFileStore {
    inner: Rc<RefCell<MemoryFileStoreInner>>,
}

impl MemoryFileStore {
    /// Makes the next tree read or mutating call fail with `message` without touching stored records.
    pub fn fail_next(&self, message: impl Into<String>) {
        self.inner.borrow_mut().pending_failure = Some(message.into());
    }

    /// Returns a flat copy of every stored record.
    pub fn records(&self) -> Vec<StoreFileRecord> {
        self.inner.borrow().records.clone()
    }

    /// Returns a copy of a single record.
    pub fn record(&self, id: &str) -> Option<StoreFileRecord> {
        self.inner.borrow().get(id).cloned()
    }

    fn create_now(&self, request: CreateFileRequest) -> Result<StoreFileRecord, String> {
        let mut inner = self.inner.borrow_mut();
        inner.take_failure()?;
        if request.name.trim().is_empty() {
            return Err("name and type are required".to_string());
        }
        let path = match request.parent_id.as_deref() {
            Some(parent_id) => {
                let parent = inner
                    .get(parent_id)
                    .ok_or_else(|| "parent folder not found".to_string())?;
                if !parent.is_folder() {
                    return Err("parent is not a folder".to_string());
                }
                MemoryFileStoreInner::subtree_prefix(parent)
            }
            None => STORE_ROOT_PATH.to_string(),
        };
        let content = request.content.unwrap_or_default();
        let record = StoreFileRecord {
            id: inner.mint_id(),
            name: request.name,
            kind: request.kind,
            size: content.len() as u64,
            content,
            parent_id: request.parent_id,
            path,
            icon: request.icon,
            updated_at: None,
            children: None,
        };
        inner.records.push(record.clone());
        Ok(record)
    }

    fn update_now(&self, id: &str, request: UpdateFileRequest) -> Result<StoreFileRecord, String> {
        let mut inner = self.inner.borrow_mut();
        inner.take_failure()?;
        let index = inner
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| "file not found".to_string())?;
        let old_prefix = MemoryFileStoreInner::subtree_prefix(&inner.records[index]);
        {
            let record = &mut inner.records[index];
            if let Some(name) = request.name.filter(|n| !n.is_empty()) {
                record.name = name;
            }
            if let Some(content) = request.content {
                record.size = content.len() as u64;
                record.content = content;
            }
            if let Some(icon) = request.icon {
                record.icon = Some(icon);
            }
        }
        let updated = inner.records[index].clone();
        if updated.is_folder() {
            let new_prefix = MemoryFileStoreInner::subtree_prefix(&updated);
            if new_prefix != old_prefix {
                inner.rebase_descendants(&old_prefix, &new_prefix);
            }
        }
        Ok(updated)
    }

    fn move_now(&self, id: &str, target_id: &str) -> Result<StoreFileRecord, String> {
        let mut inner = self.inner.borrow_mut();
        inner.take_failure()?;
        let target = inner
            .get(target_id)
            .cloned()
            .ok_or_else(|| "target folder not found".to_string())?;
        if target.kind != StoreEntryKind::Folder {
            return Err("target is not a folder".to_string());
        }
        let index = inner
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| "file not found".to_string())?;
        let old_prefix = MemoryFileStoreInner::subtree_prefix(&inner.records[index]);
        let new_parent_path = MemoryFileStoreInner::subtree_prefix(&target);
        if target.id == id || new_parent_path.starts_with(&old_prefix) {
            return Err("cannot move a folder into itself".to_string());
        }

        let record = &mut inner.records[index];
        record.parent_id = Some(target.id.clone());
        record.path = new_parent_path;
        let moved = record.clone();
        if moved.is_folder() {
            let new_prefix = MemoryFileStoreInner::subtree_prefix(&moved);
            inner.rebase_descendants(&old_prefix, &new_prefix);
        }
        Ok(moved)
    }

    fn delete_now(&self, id: &str) -> Result<(), String> {
        let mut inner = self.inner.borrow_mut();
        inner.take_failure()?;
        let record = inner
            .get(id)
            .cloned()
            .ok_or_else(|| "file not found".to_string())?;
        if record.is_folder() {
            let prefix = MemoryFileStoreInner::subtree_prefix(&record);
            inner.records.retain(|r| !r.path.starts_with(&prefix));
        }
        inner.records.retain(|r| r.id != id);
        Ok(())
    }
}

impl FileStoreService for MemoryFileStore {
    fn tree<'a>(&'a self) -> FileStoreFuture<'a, Result<Vec<StoreFileRecord>, String>> {
        Box::pin(async move {
            let mut inner = self.inner.borrow_mut();
            inner.take_failure()?;
            Ok(inner.build_tree(None))
        })
    }

    fn list<'a>(
        &'a self,
        parent_id: Option<&'a str>,
    ) -> FileStoreFuture<'a, Result<Vec<StoreFileRecord>, String>> {
        Box::pin(async move {
            let inner = self.inner.borrow();
            let mut listed: Vec<StoreFileRecord> = inner
                .records
                .iter()
                .filter(|r| r.parent_id.as_deref() == parent_id)
                .cloned()
                .collect();
            listed.sort_by(|a, b| {
                b.is_folder()
                    .cmp(&a.is_folder())
                    .then_with(|| a.name.cmp(&b.name))
            });
            Ok(listed)
        })
    }

    fn create<'a>(
        &'a self,
        request: CreateFileRequest,
    ) -> FileStoreFuture<'a, Result<StoreFileRecord, String>> {
        Box::pin(async move { self.create_now(request) })
    }

    fn update<'a>(
        &'a self,
        id: &'a str,
        request: UpdateFileRequest,
    ) -> FileStoreFuture<'a, Result<StoreFileRecord, String>> {
        Box::pin(async move { self.update_now(id, request) })
    }

    fn move_node<'a>(
        &'a self,
        id: &'a str,
        target_id: &'a str,
    ) -> FileStoreFuture<'a, Result<StoreFileRecord, String>> {
        Box::pin(async move { self.move_now(id, target_id) })
    }

    fn delete<'a>(&'a self, id: &'a str) -> FileStoreFuture<'a, Result<(), String>> {
        Box::pin(async move { self.delete_now(id) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory post feed.
pub struct MemoryPostFeed {
    inner: Rc<RefCell<Vec<BlogPostRecord>>>,
    failure: Rc<RefCell<Option<String>>>,
}

impl MemoryPostFeed {
    /// Creates a feed serving `posts`.
    pub fn with_posts(posts: Vec<BlogPostRecord>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(posts)),
            failure: Rc::default(),
        }
    }

    /// Makes every subsequent listing fail with `message` until cleared with `None`.
    pub fn set_failure(&self, message: Option<String>) {
        *self.failure.borrow_mut() = message;
    }
}

impl PostFeedService for MemoryPostFeed {
    fn list_posts<'a>(
        &'a self,
        limit: usize,
    ) -> FileStoreFuture<'a, Result<Vec<BlogPostRecord>, String>> {
        Box::pin(async move {
            if let Some(message) = self.failure.borrow().clone() {
                return Err(message);
            }
            Ok(self.inner.borrow().iter().take(limit).cloned().collect())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::fs::path::is_store_id;

    fn create(
        store: &MemoryFileStore,
        name: &str,
        kind: StoreEntryKind,
        parent_id: Option<&str>,
    ) -> StoreFileRecord {
        block_on(store.create(CreateFileRequest {
            name: name.to_string(),
            kind,
            content: (kind == StoreEntryKind::File).then(|| format!("{name} body")),
            parent_id: parent_id.map(str::to_string),
            icon: None,
        }))
        .expect("create")
    }

    #[test]
    fn noop_file_store_lists_nothing_and_rejects_mutations() {
        let store = NoopFileStoreService;
        let store_obj: &dyn FileStoreService = &store;

        assert!(block_on(store_obj.tree()).expect("tree").is_empty());
        let err = block_on(store_obj.delete("65a1f0c2b3d4e5f60718293a")).expect_err("delete");
        assert!(err.contains("delete"));
    }

    #[test]
    fn memory_store_mints_store_ids_and_parent_paths() {
        let store = MemoryFileStore::default();
        let docs = create(&store, "docs", StoreEntryKind::Folder, None);
        let note = create(&store, "a.txt", StoreEntryKind::File, Some(&docs.id));

        assert!(is_store_id(&docs.id));
        assert_ne!(docs.id, note.id);
        assert_eq!(docs.path, "/");
        assert_eq!(note.path, "/docs/");
        assert_eq!(note.size, "a.txt body".len() as u64);
    }

    #[test]
    fn memory_store_tree_nests_children_under_folders() {
        let store = MemoryFileStore::default();
        let docs = create(&store, "docs", StoreEntryKind::Folder, None);
        create(&store, "a.txt", StoreEntryKind::File, Some(&docs.id));
        create(&store, "top.txt", StoreEntryKind::File, None);

        let tree = block_on(store.tree()).expect("tree");
        assert_eq!(tree.len(), 2);
        let folder = tree.iter().find(|r| r.name == "docs").expect("docs");
        let children = folder.children.as_ref().expect("children");
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].name, "a.txt");
        let file = tree.iter().find(|r| r.name == "top.txt").expect("file");
        assert_eq!(file.children, None);
    }

    #[test]
    fn memory_store_move_rewrites_descendant_paths_by_prefix() {
        let store = MemoryFileStore::default();
        let docs = create(&store, "Docs", StoreEntryKind::Folder, None);
        let proj = create(&store, "Proj", StoreEntryKind::Folder, Some(&docs.id));
        let notes = create(&store, "notes.txt", StoreEntryKind::File, Some(&proj.id));
        let archive = create(&store, "Archive", StoreEntryKind::Folder, None);

        let moved = block_on(store.move_node(&proj.id, &archive.id)).expect("move");
        assert_eq!(moved.path, "/Archive/");
        assert_eq!(moved.parent_id.as_deref(), Some(archive.id.as_str()));
        assert_eq!(store.record(&notes.id).expect("notes").path, "/Archive/Proj/");
    }

    #[test]
    fn memory_store_move_rejects_non_folder_targets_and_self_containment() {
        let store = MemoryFileStore::default();
        let docs = create(&store, "Docs", StoreEntryKind::Folder, None);
        let sub = create(&store, "Sub", StoreEntryKind::Folder, Some(&docs.id));
        let file = create(&store, "f.txt", StoreEntryKind::File, None);

        assert_eq!(
            block_on(store.move_node(&docs.id, &file.id)).expect_err("file target"),
            "target is not a folder"
        );
        assert_eq!(
            block_on(store.move_node(&docs.id, &sub.id)).expect_err("into own subtree"),
            "cannot move a folder into itself"
        );
        assert_eq!(store.record(&sub.id).expect("sub").path, "/Docs/");
    }

    #[test]
    fn memory_store_delete_cascades_by_path_prefix() {
        let store = MemoryFileStore::default();
        let docs = create(&store, "Docs", StoreEntryKind::Folder, None);
        let sub = create(&store, "Sub", StoreEntryKind::Folder, Some(&docs.id));
        create(&store, "deep.txt", StoreEntryKind::File, Some(&sub.id));
        let keep = create(&store, "Docs2", StoreEntryKind::Folder, None);

        block_on(store.delete(&docs.id)).expect("delete");
        let remaining: Vec<String> = store.records().into_iter().map(|r| r.id).collect();
        assert_eq!(remaining, vec![keep.id]);
    }

    #[test]
    fn memory_store_update_recomputes_size_and_renames_subtree() {
        let store = MemoryFileStore::default();
        let docs = create(&store, "Docs", StoreEntryKind::Folder, None);
        let note = create(&store, "n.txt", StoreEntryKind::File, Some(&docs.id));

        let updated = block_on(store.update(
            &note.id,
            UpdateFileRequest {
                content: Some("four".to_string()),
                ..UpdateFileRequest::default()
            },
        ))
        .expect("update");
        assert_eq!(updated.size, 4);

        block_on(store.update(
            &docs.id,
            UpdateFileRequest {
                name: Some("Papers".to_string()),
                ..UpdateFileRequest::default()
            },
        ))
        .expect("rename");
        assert_eq!(store.record(&note.id).expect("note").path, "/Papers/");
    }

    #[test]
    fn memory_store_pending_failure_is_surfaced_once_without_changes() {
        let store = MemoryFileStore::default();
        store.fail_next("Server error");
        let err = block_on(store.create(CreateFileRequest {
            name: "x".to_string(),
            kind: StoreEntryKind::Folder,
            content: None,
            parent_id: None,
            icon: None,
        }))
        .expect_err("injected failure");
        assert_eq!(err, "Server error");
        assert!(store.records().is_empty());
        create(&store, "x", StoreEntryKind::Folder, None);
    }

    #[test]
    fn memory_store_list_orders_folders_before_files() {
        let store = MemoryFileStore::default();
        create(&store, "b.txt", StoreEntryKind::File, None);
        create(&store, "z", StoreEntryKind::Folder, None);
        create(&store, "a.txt", StoreEntryKind::File, None);

        let names: Vec<String> = block_on(store.list(None))
            .expect("list")
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["z", "a.txt", "b.txt"]);
    }

    #[test]
    fn memory_post_feed_honors_limit_and_failure() {
        let post = BlogPostRecord {
            id: "p1".to_string(),
            title: "Hello".to_string(),
            content: String::new(),
            summary: None,
            category: None,
            tags: Vec::new(),
            views: 0,
            created_at: None,
            updated_at: None,
        };
        let feed = MemoryPostFeed::with_posts(vec![post.clone(), post]);
        assert_eq!(block_on(feed.list_posts(1)).expect("list").len(), 1);

        feed.set_failure(Some("offline".to_string()));
        assert_eq!(block_on(feed.list_posts(10)).expect_err("fail"), "offline");
    }
}
