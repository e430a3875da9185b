//! Explorer session state and store-backed tree operations.
//!
//! [`ExplorerSession`] owns the merged [`FileTree`] together with the current folder, history,
//! selection, and clipboard. Mutating operations validate locally, call the file store, apply the
//! same change to the arena, and then rebuild the tree from the store. [`NodeKey`] values are tied
//! to one tree, so callers must look keys up again after any mutation or refresh.

use std::rc::Rc;

use platform_host::{
    is_same_or_descendant, parent_virtual_path, rebase_virtual_path, CreateFileRequest,
    HostServices, StoreEntryKind, UpdateFileRequest, VIRTUAL_SEPARATOR,
};

use crate::{
    clipboard::{Clipboard, ClipboardAction},
    desktop_entries::load_desktop_entries,
    error::ExplorerError,
    merge::{merge_tree, store_record_to_node, SERVER_FILES_ID},
    navigation::NavigationHistory,
    node::{validate_name, FileNode, FileTree, MovePlan, NodeKey, NodeType, TreeNode},
};

/// Maximum number of posts requested from the post feed per refresh.
pub const POST_FEED_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteOutcome {
    /// A cut node was moved into the current folder.
    Moved,
    /// A copied node was recreated in the current folder.
    Created(FileNode),
}

#[derive(Debug)]
pub struct ExplorerSession {
    host: HostServices,
    static_tree: TreeNode,
    tree: FileTree,
    current_path: String,
    history: NavigationHistory,
    selected: Option<String>,
    clipboard: Clipboard,
    authenticated: bool,
}

impl ExplorerSession {
    /// Builds a session from the static tree and persisted desktop entries, without contacting
    /// the store.
    pub fn new(host: HostServices, static_tree: TreeNode, initial_path: &str) -> Self {
        let desktop = load_desktop_entries(host.prefs.as_ref());
        let tree = merge_tree(&static_tree, &[], &desktop, &[]);
        let current_path = initial_location(&tree, initial_path);
        Self {
            host,
            static_tree,
            tree,
            history: NavigationHistory::new(current_path.clone()),
            current_path,
            selected: None,
            clipboard: Clipboard::default(),
            authenticated: false,
        }
    }

    /// Builds a session, loads remote data, and opens `initial_path` when it resolves.
    pub async fn open(host: HostServices, static_tree: TreeNode, initial_path: &str) -> Self {
        let mut session = Self::new(host, static_tree, initial_path);
        if let Err(err) = session.refresh().await {
            log::warn!("explorer opened without server files: {err}");
        }
        let path = initial_location(&session.tree, initial_path);
        session.history = NavigationHistory::new(path.clone());
        session.current_path = path;
        session
    }

    pub fn host(&self) -> &HostServices {
        &self.host
    }

    pub fn tree(&self) -> &FileTree {
        &self.tree
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn set_authenticated(&mut self, authenticated: bool) {
        self.authenticated = authenticated;
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn current_node(&self) -> Option<NodeKey> {
        self.tree.find_by_path(&self.current_path)
    }

    /// Children of the current folder, in tree order.
    pub fn current_items(&self) -> Vec<&FileNode> {
        match self.current_node() {
            Some(key) => self.tree.children(key).collect(),
            None => Vec::new(),
        }
    }

    pub fn find_node_by_path(&self, path: &str) -> Option<NodeKey> {
        self.tree.find_by_path(path)
    }

    pub fn find_node_by_id(&self, id: &str) -> Option<NodeKey> {
        self.tree.find_by_id(id)
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn selected(&self) -> Option<&FileNode> {
        let id = self.selected.as_deref()?;
        self.tree.find_by_id(id).map(|key| self.tree.node(key))
    }

    pub fn select(&mut self, key: NodeKey) {
        self.selected = Some(self.tree.node(key).id.clone());
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Opens folder `key`, recording it in history. Files are ignored.
    pub fn navigate_to(&mut self, key: NodeKey) {
        let node = self.tree.node(key);
        if !node.is_folder() {
            return;
        }
        let path = node.path.clone();
        self.history.push(path.clone());
        self.current_path = path;
        self.selected = None;
    }

    /// Navigates to the folder at `path`; returns `false` when nothing resolves there.
    pub fn navigate_to_path(&mut self, path: &str) -> bool {
        match self.tree.find_by_path(path) {
            Some(key) if self.tree.node(key).is_folder() => {
                self.navigate_to(key);
                true
            }
            _ => false,
        }
    }

    /// Steps back in history. The history index moves even when the entry no longer resolves, in
    /// which case the current folder is kept.
    pub fn back(&mut self) -> bool {
        match self.history.back().map(str::to_string) {
            Some(path) => self.show_history_entry(path),
            None => false,
        }
    }

    pub fn forward(&mut self) -> bool {
        match self.history.forward().map(str::to_string) {
            Some(path) => self.show_history_entry(path),
            None => false,
        }
    }

    /// Navigates to the parent of the current folder.
    pub fn up(&mut self) -> bool {
        let parent = parent_virtual_path(&self.current_path).and_then(|p| self.tree.find_by_path(p));
        match parent {
            Some(key) => {
                self.navigate_to(key);
                true
            }
            None => false,
        }
    }

    fn show_history_entry(&mut self, path: String) -> bool {
        match self.tree.find_by_path(&path) {
            Some(key) if self.tree.node(key).is_folder() => {
                self.current_path = path;
                self.selected = None;
                true
            }
            _ => {
                log::debug!("history entry {path} no longer resolves");
                false
            }
        }
    }

    /// Fetches the store tree and post feed concurrently and rebuilds the merged tree.
    ///
    /// A failed tree fetch leaves the current tree untouched. A failed post feed only drops the
    /// blog folder.
    pub async fn refresh(&mut self) -> Result<(), ExplorerError> {
        let files = Rc::clone(&self.host.files);
        let posts = Rc::clone(&self.host.posts);
        let (server, feed) = futures::join!(files.tree(), posts.list_posts(POST_FEED_LIMIT));

        let server = server.map_err(|err| {
            log::warn!("file tree refresh failed: {err}");
            ExplorerError::Remote(err)
        })?;
        let posts = feed.unwrap_or_else(|err| {
            log::warn!("post feed unavailable: {err}");
            Vec::new()
        });
        let desktop = load_desktop_entries(self.host.prefs.as_ref());

        self.tree = merge_tree(&self.static_tree, &server, &desktop, &posts);
        self.reconcile_current();
        Ok(())
    }

    /// Creates a file or folder under `parent` and returns the node as it appears afterwards.
    ///
    /// Files without an extension get `.txt`; names already used by a sibling get a ` (n)`
    /// suffix. `parent` must be store-backed or the `Server Files` root.
    pub async fn create_node(
        &mut self,
        parent: NodeKey,
        name: &str,
        kind: NodeType,
        content: Option<String>,
    ) -> Result<FileNode, ExplorerError> {
        let name = validate_name(name)?;
        self.ensure_authenticated()?;

        let parent_node = self.tree.node(parent);
        if !parent_node.is_folder() {
            return Err(ExplorerError::NotAFolder {
                name: parent_node.name.clone(),
            });
        }
        let parent_id = if parent_node.is_store_backed() {
            Some(parent_node.id.clone())
        } else if parent_node.id == SERVER_FILES_ID {
            None
        } else {
            return Err(ExplorerError::IneligibleNode {
                name: parent_node.name.clone(),
                operation: "modified",
            });
        };
        let parent_path = parent_node.path.clone();

        let name = match kind {
            NodeType::File if !name.contains('.') => format!("{name}.txt"),
            _ => name,
        };
        let name = self.tree.unique_child_name(parent, &name, kind);
        let request = CreateFileRequest {
            name,
            kind: store_kind(kind),
            content: content.filter(|_| kind == NodeType::File),
            parent_id,
            icon: None,
        };

        let files = Rc::clone(&self.host.files);
        let record = files.create(request).await.map_err(ExplorerError::Remote)?;
        if let Err(err) = self
            .tree
            .insert_child(parent, &store_record_to_node(&record, &parent_path))
        {
            log::debug!("created {} but could not place it locally: {err}", record.name);
        }
        self.refresh_after("create").await;

        self.tree
            .find_by_id(&record.id)
            .map(|key| self.tree.node(key).clone())
            .ok_or_else(|| ExplorerError::NodeNotFound {
                path: format!("{parent_path}{VIRTUAL_SEPARATOR}{}", record.name),
            })
    }

    /// Renames a store-backed node. Renaming to the current name is a no-op.
    pub async fn rename_node(&mut self, key: NodeKey, new_name: &str) -> Result<(), ExplorerError> {
        let node = self.tree.node(key);
        ensure_store_backed(node, "renamed")?;
        self.ensure_authenticated()?;
        let name = self.tree.validate_rename(key, new_name)?;
        if name == node.name {
            return Ok(());
        }
        let id = node.id.clone();
        let old_path = node.path.clone();

        let files = Rc::clone(&self.host.files);
        files
            .update(
                &id,
                UpdateFileRequest {
                    name: Some(name.clone()),
                    ..UpdateFileRequest::default()
                },
            )
            .await
            .map_err(ExplorerError::Remote)?;

        self.tree.rename_node(key, &name)?;
        let new_path = self.tree.node(key).path.clone();
        self.follow_relocation(&old_path, &new_path);
        self.refresh_after("rename").await;
        Ok(())
    }

    /// Deletes a store-backed node and its subtree.
    pub async fn delete_node(&mut self, key: NodeKey) -> Result<(), ExplorerError> {
        let node = self.tree.node(key);
        ensure_store_backed(node, "deleted")?;
        self.ensure_authenticated()?;
        let id = node.id.clone();
        let path = node.path.clone();

        let files = Rc::clone(&self.host.files);
        files.delete(&id).await.map_err(ExplorerError::Remote)?;

        self.tree.remove_node(key)?;
        if self
            .clipboard
            .peek()
            .is_some_and(|entry| is_same_or_descendant(&entry.node.path, &path))
        {
            self.clipboard.clear();
        }
        self.reconcile_current();
        self.refresh_after("delete").await;
        Ok(())
    }

    /// Moves a store-backed node into a store-backed folder.
    ///
    /// All checks run before the store is contacted. Moving a node into its current parent
    /// succeeds without a store call.
    pub async fn move_node(&mut self, key: NodeKey, target: NodeKey) -> Result<(), ExplorerError> {
        let node = self.tree.node(key);
        let target_node = self.tree.node(target);
        ensure_store_backed(node, "moved")?;
        if !target_node.is_store_backed() {
            return Err(ExplorerError::IneligibleTarget {
                name: target_node.name.clone(),
            });
        }
        self.ensure_authenticated()?;
        if self.tree.validate_move(key, target)? == MovePlan::AlreadyThere {
            return Ok(());
        }
        let id = node.id.clone();
        let target_id = target_node.id.clone();
        let old_path = node.path.clone();

        let files = Rc::clone(&self.host.files);
        files
            .move_node(&id, &target_id)
            .await
            .map_err(ExplorerError::Remote)?;

        self.tree.move_node(key, target)?;
        let new_path = self.tree.node(key).path.clone();
        self.follow_relocation(&old_path, &new_path);
        self.refresh_after("move").await;
        Ok(())
    }

    /// Puts `key` on the clipboard for a later move. Local nodes are refused.
    pub fn cut(&mut self, key: NodeKey) -> bool {
        self.clipboard.store(ClipboardAction::Cut, self.tree.node(key))
    }

    /// Puts `key` on the clipboard for a later copy. Local nodes are refused.
    pub fn copy(&mut self, key: NodeKey) -> bool {
        self.clipboard.store(ClipboardAction::Copy, self.tree.node(key))
    }

    /// Pastes the clipboard into the current folder.
    ///
    /// A cut is a move and empties the clipboard on success. A copy creates `Copy of <name>` with
    /// the source content and keeps the clipboard, so repeated pastes produce suffixed copies.
    /// Folder copies do not include their children.
    pub async fn paste(&mut self) -> Result<PasteOutcome, ExplorerError> {
        let entry = self
            .clipboard
            .peek()
            .cloned()
            .ok_or(ExplorerError::EmptyClipboard)?;
        let destination = self
            .current_node()
            .ok_or_else(|| ExplorerError::NodeNotFound {
                path: self.current_path.clone(),
            })?;
        let destination_node = self.tree.node(destination);
        if !destination_node.is_store_backed() {
            return Err(ExplorerError::IneligibleTarget {
                name: destination_node.name.clone(),
            });
        }

        match entry.action {
            ClipboardAction::Cut => {
                let key = self.tree.find_by_id(&entry.node.id).ok_or_else(|| {
                    ExplorerError::NodeNotFound {
                        path: entry.node.path.clone(),
                    }
                })?;
                self.move_node(key, destination).await?;
                self.clipboard.clear();
                Ok(PasteOutcome::Moved)
            }
            ClipboardAction::Copy => {
                let name = format!("Copy of {}", entry.node.name);
                let created = self
                    .create_node(destination, &name, entry.node.kind, entry.node.content)
                    .await?;
                Ok(PasteOutcome::Created(created))
            }
        }
    }

    fn ensure_authenticated(&self) -> Result<(), ExplorerError> {
        if self.authenticated {
            Ok(())
        } else {
            Err(ExplorerError::Unauthenticated)
        }
    }

    async fn refresh_after(&mut self, operation: &str) {
        if let Err(err) = self.refresh().await {
            log::warn!("{operation} succeeded but the tree could not be refreshed: {err}");
        }
    }

    /// Keeps the current folder pointed at a node that was renamed or moved.
    fn follow_relocation(&mut self, old_path: &str, new_path: &str) {
        if self.current_path == old_path {
            self.current_path = new_path.to_string();
            return;
        }
        let old_prefix = format!("{old_path}{VIRTUAL_SEPARATOR}");
        let new_prefix = format!("{new_path}{VIRTUAL_SEPARATOR}");
        if let Some(path) = rebase_virtual_path(&self.current_path, &old_prefix, &new_prefix) {
            self.current_path = path;
        }
    }

    /// Falls back to the nearest surviving ancestor when the current folder no longer resolves.
    fn reconcile_current(&mut self) {
        if self.tree.find_by_path(&self.current_path).is_none() {
            let mut candidate = self.current_path.as_str();
            let fallback = loop {
                match parent_virtual_path(candidate) {
                    Some(parent) => {
                        if let Some(key) = self.tree.find_by_path(parent) {
                            break self.tree.node(key).path.clone();
                        }
                        candidate = parent;
                    }
                    None => break self.tree.node(self.tree.root()).path.clone(),
                }
            };
            log::info!("{} no longer exists; showing {fallback}", self.current_path);
            self.current_path = fallback;
        }
        if self
            .selected
            .as_deref()
            .is_some_and(|id| self.tree.find_by_id(id).is_none())
        {
            self.selected = None;
        }
    }
}

fn initial_location(tree: &FileTree, requested: &str) -> String {
    let key = tree
        .find_by_path(requested)
        .filter(|&key| tree.node(key).is_folder())
        .or_else(|| tree.node(tree.root()).children().first().copied())
        .unwrap_or_else(|| tree.root());
    tree.node(key).path.clone()
}

fn ensure_store_backed(node: &FileNode, operation: &'static str) -> Result<(), ExplorerError> {
    if node.is_store_backed() {
        Ok(())
    } else {
        Err(ExplorerError::IneligibleNode {
            name: node.name.clone(),
            operation,
        })
    }
}

fn store_kind(kind: NodeType) -> StoreEntryKind {
    match kind {
        NodeType::File => StoreEntryKind::File,
        NodeType::Folder => StoreEntryKind::Folder,
    }
}
