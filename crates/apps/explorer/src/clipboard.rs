//! Single-slot cut/copy clipboard for store-backed nodes.

use platform_host::is_store_id;

use crate::node::{FileNode, NodeType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardAction {
    Cut,
    Copy,
}

/// Copy of the fields paste needs, taken when the node was cut or copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSnapshot {
    pub id: String,
    pub name: String,
    pub kind: NodeType,
    pub path: String,
    pub content: Option<String>,
}

impl From<&FileNode> for NodeSnapshot {
    fn from(node: &FileNode) -> Self {
        Self {
            id: node.id.clone(),
            name: node.name.clone(),
            kind: node.node_type(),
            path: node.path.clone(),
            content: node.content().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardEntry {
    pub action: ClipboardAction,
    pub node: NodeSnapshot,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clipboard {
    entry: Option<ClipboardEntry>,
}

impl Clipboard {
    /// Replaces the clipboard contents. Nodes without a store id are refused and leave it as-is.
    pub fn store(&mut self, action: ClipboardAction, node: &FileNode) -> bool {
        if !is_store_id(&node.id) {
            return false;
        }
        self.entry = Some(ClipboardEntry {
            action,
            node: NodeSnapshot::from(node),
        });
        true
    }

    pub fn peek(&self) -> Option<&ClipboardEntry> {
        self.entry.as_ref()
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{FileTree, TreeNode};

    fn tree() -> FileTree {
        FileTree::from_nested(&TreeNode::folder("root", "My Computer").with_children(vec![
            TreeNode::file("65a1f0c2b3d4e5f60718293a", "a.txt").with_content("x"),
            TreeNode::file("readme", "README.md"),
        ]))
    }

    #[test]
    fn store_refuses_local_nodes_and_keeps_previous_entry() {
        let tree = tree();
        let store_node = tree.node(tree.find_by_id("65a1f0c2b3d4e5f60718293a").expect("a"));
        let local = tree.node(tree.find_by_id("readme").expect("readme"));
        let mut clipboard = Clipboard::default();

        assert!(clipboard.store(ClipboardAction::Copy, store_node));
        assert!(!clipboard.store(ClipboardAction::Cut, local));

        let entry = clipboard.peek().expect("entry");
        assert_eq!(entry.action, ClipboardAction::Copy);
        assert_eq!(entry.node.content.as_deref(), Some("x"));
        assert_eq!(entry.node.path, "C:\\a.txt");
    }

    #[test]
    fn clear_empties_the_slot() {
        let tree = tree();
        let node = tree.node(tree.find_by_id("65a1f0c2b3d4e5f60718293a").expect("a"));
        let mut clipboard = Clipboard::default();
        clipboard.store(ClipboardAction::Cut, node);
        clipboard.clear();
        assert!(clipboard.is_empty());
    }
}
