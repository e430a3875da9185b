//! Arena-backed explorer tree.
//!
//! Nodes live in one `Vec` and refer to each other by [`NodeKey`], so rename, move, and delete are
//! local index updates plus a path-prefix rewrite over the affected subtree. Keys are only valid
//! for the tree that issued them; every refresh builds a new tree.

use platform_host::{
    is_same_or_descendant, is_store_id, join_virtual_path, rebase_virtual_path, VIRTUAL_ROOT,
    VIRTUAL_SEPARATOR,
};
use serde::{Deserialize, Serialize};

use crate::error::ExplorerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeType {
    File,
    Folder,
}

/// Nested, serializable node shape used for static definitions and structural comparisons.
///
/// `path` may be omitted; [`FileTree::from_nested`] derives it from the parent path and name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    pub fn folder(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::bare(id.into(), name.into(), NodeType::Folder, Some(Vec::new()))
    }

    pub fn file(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::bare(id.into(), name.into(), NodeType::File, None)
    }

    fn bare(id: String, name: String, kind: NodeType, children: Option<Vec<TreeNode>>) -> Self {
        Self {
            id,
            name,
            kind,
            path: None,
            icon: None,
            size: None,
            modified: None,
            content: None,
            children,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_modified(mut self, modified: impl Into<String>) -> Self {
        self.modified = Some(modified.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = Some(children);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(usize);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileMeta {
    pub content: Option<String>,
    pub size: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FolderMeta {
    pub children: Vec<NodeKey>,
    /// Display-only size label.
    pub size: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    File(FileMeta),
    Folder(FolderMeta),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    pub id: String,
    pub name: String,
    pub path: String,
    pub icon: Option<String>,
    pub modified: Option<String>,
    pub kind: NodeKind,
    parent: Option<NodeKey>,
}

impl FileNode {
    pub fn node_type(&self) -> NodeType {
        match self.kind {
            NodeKind::File(_) => NodeType::File,
            NodeKind::Folder(_) => NodeType::Folder,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder(_))
    }

    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    pub fn children(&self) -> &[NodeKey] {
        match &self.kind {
            NodeKind::Folder(meta) => &meta.children,
            NodeKind::File(_) => &[],
        }
    }

    pub fn content(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::File(meta) => meta.content.as_deref(),
            NodeKind::Folder(_) => None,
        }
    }

    pub fn size(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::File(meta) => meta.size.as_deref(),
            NodeKind::Folder(meta) => meta.size.as_deref(),
        }
    }

    /// Returns `true` when the node is backed by the remote store and may be mutated through it.
    pub fn is_store_backed(&self) -> bool {
        is_store_id(&self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Result of [`FileTree::validate_move`].
pub enum MovePlan {
    /// The node already sits directly inside the target.
    AlreadyThere,
    /// The node can be moved.
    Move,
}

#[derive(Debug, Clone)]
pub struct FileTree {
    nodes: Vec<FileNode>,
    root: NodeKey,
}

impl PartialEq for FileTree {
    fn eq(&self, other: &Self) -> bool {
        self.to_nested() == other.to_nested()
    }
}

impl FileTree {
    /// Builds an arena from a nested definition, deriving any missing paths.
    pub fn from_nested(root: &TreeNode) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            root: NodeKey(0),
        };
        let path = root
            .path
            .clone()
            .unwrap_or_else(|| VIRTUAL_ROOT.to_string());
        tree.root = tree.push_subtree(root, path, None);
        tree
    }

    fn push_subtree(&mut self, source: &TreeNode, path: String, parent: Option<NodeKey>) -> NodeKey {
        let key = NodeKey(self.nodes.len());
        let kind = match source.kind {
            NodeType::File => NodeKind::File(FileMeta {
                content: source.content.clone(),
                size: source.size.clone(),
            }),
            NodeType::Folder => NodeKind::Folder(FolderMeta {
                children: Vec::new(),
                size: source.size.clone(),
            }),
        };
        self.nodes.push(FileNode {
            id: source.id.clone(),
            name: source.name.clone(),
            path: path.clone(),
            icon: source.icon.clone(),
            modified: source.modified.clone(),
            kind,
            parent,
        });

        if source.kind == NodeType::Folder {
            let children: Vec<NodeKey> = source
                .children
                .iter()
                .flatten()
                .map(|child| {
                    let child_path = child
                        .path
                        .clone()
                        .unwrap_or_else(|| join_virtual_path(&path, &child.name));
                    self.push_subtree(child, child_path, Some(key))
                })
                .collect();
            if let NodeKind::Folder(meta) = &mut self.nodes[key.0].kind {
                meta.children = children;
            }
        }
        key
    }

    /// Converts the reachable tree back into its nested shape with every path filled in.
    pub fn to_nested(&self) -> TreeNode {
        self.nested_at(self.root)
    }

    fn nested_at(&self, key: NodeKey) -> TreeNode {
        let node = self.node(key);
        let (size, content, children) = match &node.kind {
            NodeKind::File(meta) => (meta.size.clone(), meta.content.clone(), None),
            NodeKind::Folder(meta) => (
                meta.size.clone(),
                None,
                Some(meta.children.iter().map(|&c| self.nested_at(c)).collect()),
            ),
        };
        TreeNode {
            id: node.id.clone(),
            name: node.name.clone(),
            kind: node.node_type(),
            path: Some(node.path.clone()),
            icon: node.icon.clone(),
            size,
            modified: node.modified.clone(),
            content,
            children,
        }
    }

    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// Returns the node for `key`.
    ///
    /// # Panics
    ///
    /// Panics when `key` was issued by a different tree and is out of range.
    pub fn node(&self, key: NodeKey) -> &FileNode {
        &self.nodes[key.0]
    }

    pub fn get(&self, key: NodeKey) -> Option<&FileNode> {
        self.nodes.get(key.0)
    }

    pub fn children(&self, key: NodeKey) -> impl Iterator<Item = &FileNode> {
        self.node(key).children().iter().map(|&c| self.node(c))
    }

    /// Visits every reachable node in depth-first pre-order.
    pub fn keys(&self) -> Vec<NodeKey> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(key) = stack.pop() {
            out.push(key);
            stack.extend(self.node(key).children().iter().rev().copied());
        }
        out
    }

    /// Returns the first node, in depth-first pre-order, whose path equals `path` exactly.
    pub fn find_by_path(&self, path: &str) -> Option<NodeKey> {
        self.keys().into_iter().find(|&k| self.node(k).path == path)
    }

    pub fn find_by_id(&self, id: &str) -> Option<NodeKey> {
        self.keys().into_iter().find(|&k| self.node(k).id == id)
    }

    pub fn child_named(&self, parent: NodeKey, name: &str) -> Option<NodeKey> {
        self.node(parent)
            .children()
            .iter()
            .copied()
            .find(|&c| self.node(c).name == name)
    }

    /// Every node strictly below `key`, in pre-order.
    pub fn descendants(&self, key: NodeKey) -> Vec<NodeKey> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeKey> = self.node(key).children().iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.node(next).children().iter().rev().copied());
        }
        out
    }

    /// Returns `name`, or the first `name (n)` variant no child of `parent` uses.
    ///
    /// File counters go before the extension: `notes.txt` becomes `notes (2).txt`.
    pub fn unique_child_name(&self, parent: NodeKey, name: &str, kind: NodeType) -> String {
        if self.child_named(parent, name).is_none() {
            return name.to_string();
        }
        let (stem, ext) = match (kind, name.rfind('.')) {
            (NodeType::File, Some(idx)) if idx > 0 => (&name[..idx], &name[idx..]),
            _ => (name, ""),
        };
        (2u32..)
            .map(|n| format!("{stem} ({n}){ext}"))
            .find(|candidate| self.child_named(parent, candidate).is_none())
            .unwrap_or_else(|| name.to_string())
    }

    /// Appends a new subtree under `parent` and returns its key.
    pub fn insert_child(&mut self, parent: NodeKey, source: &TreeNode) -> Result<NodeKey, ExplorerError> {
        let parent_node = self.node(parent);
        if !parent_node.is_folder() {
            return Err(ExplorerError::NotAFolder {
                name: parent_node.name.clone(),
            });
        }
        if self.child_named(parent, &source.name).is_some() {
            return Err(ExplorerError::NameConflict {
                name: source.name.clone(),
            });
        }
        let path = join_virtual_path(&parent_node.path, &source.name);
        let key = self.push_subtree(source, path, Some(parent));
        self.attach(key, parent);
        Ok(key)
    }

    /// Checks a rename and returns the trimmed name to apply.
    pub fn validate_rename(&self, key: NodeKey, new_name: &str) -> Result<String, ExplorerError> {
        let name = validate_name(new_name)?;
        let node = self.node(key);
        let Some(parent) = node.parent else {
            return Err(ExplorerError::IneligibleNode {
                name: node.name.clone(),
                operation: "renamed",
            });
        };
        if name != node.name && self.child_named(parent, &name).is_some() {
            return Err(ExplorerError::NameConflict { name });
        }
        Ok(name)
    }

    /// Renames `key` and rewrites its own and every descendant's path prefix.
    pub fn rename_node(&mut self, key: NodeKey, new_name: &str) -> Result<(), ExplorerError> {
        let name = self.validate_rename(key, new_name)?;
        let Some(parent) = self.node(key).parent else {
            return Ok(());
        };
        let old_path = self.node(key).path.clone();
        let new_path = join_virtual_path(&self.node(parent).path, &name);
        self.nodes[key.0].name = name;
        self.rebase_subtree(key, &old_path, &new_path);
        Ok(())
    }

    /// Checks whether `key` may move into `target` without changing anything.
    pub fn validate_move(&self, key: NodeKey, target: NodeKey) -> Result<MovePlan, ExplorerError> {
        let node = self.node(key);
        let target_node = self.node(target);
        if !target_node.is_folder() {
            return Err(ExplorerError::NotAFolder {
                name: target_node.name.clone(),
            });
        }
        if node.parent.is_none()
            || key == target
            || (node.is_folder() && is_same_or_descendant(&target_node.path, &node.path))
        {
            return Err(ExplorerError::InvalidDestination(format!(
                "cannot move \"{}\" into itself",
                node.name
            )));
        }
        if node.parent == Some(target) {
            return Ok(MovePlan::AlreadyThere);
        }
        if self.child_named(target, &node.name).is_some() {
            return Err(ExplorerError::NameConflict {
                name: node.name.clone(),
            });
        }
        Ok(MovePlan::Move)
    }

    /// Moves `key` under `target`.
    ///
    /// The node's path becomes `target.path\name`; each descendant has the old `path\` prefix
    /// replaced textually, so suffixes are preserved even where they disagree with node names.
    pub fn move_node(&mut self, key: NodeKey, target: NodeKey) -> Result<(), ExplorerError> {
        if self.validate_move(key, target)? == MovePlan::AlreadyThere {
            return Ok(());
        }
        let old_path = self.node(key).path.clone();
        let new_path = join_virtual_path(&self.node(target).path, &self.node(key).name);
        self.detach(key);
        self.attach(key, target);
        self.rebase_subtree(key, &old_path, &new_path);
        Ok(())
    }

    /// Unlinks `key` from its parent; the subtree becomes unreachable.
    pub fn remove_node(&mut self, key: NodeKey) -> Result<(), ExplorerError> {
        if self.node(key).parent.is_none() {
            return Err(ExplorerError::IneligibleNode {
                name: self.node(key).name.clone(),
                operation: "deleted",
            });
        }
        self.detach(key);
        Ok(())
    }

    fn detach(&mut self, key: NodeKey) {
        let Some(parent) = self.nodes[key.0].parent.take() else {
            return;
        };
        if let NodeKind::Folder(meta) = &mut self.nodes[parent.0].kind {
            meta.children.retain(|&c| c != key);
        }
    }

    fn attach(&mut self, key: NodeKey, parent: NodeKey) {
        if let NodeKind::Folder(meta) = &mut self.nodes[parent.0].kind {
            meta.children.push(key);
        }
        self.nodes[key.0].parent = Some(parent);
    }

    fn rebase_subtree(&mut self, key: NodeKey, old_path: &str, new_path: &str) {
        let old_prefix = format!("{old_path}{VIRTUAL_SEPARATOR}");
        let new_prefix = format!("{new_path}{VIRTUAL_SEPARATOR}");
        for descendant in self.descendants(key) {
            let node = &mut self.nodes[descendant.0];
            if let Some(path) = rebase_virtual_path(&node.path, &old_prefix, &new_prefix) {
                node.path = path;
            }
        }
        self.nodes[key.0].path = new_path.to_string();
    }
}

/// Trims `name` and rejects empty names or names containing the path separator.
pub fn validate_name(name: &str) -> Result<String, ExplorerError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ExplorerError::MissingName);
    }
    if name.contains(VIRTUAL_SEPARATOR) {
        return Err(ExplorerError::InvalidName(name.to_string()));
    }
    Ok(name.to_string())
}
