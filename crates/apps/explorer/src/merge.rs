//! Pure composition of the static tree, remote store records, desktop entries, and blog posts.

use platform_host::{
    join_virtual_path, BlogPostRecord, DesktopEntry, StoreEntryKind, StoreFileRecord, VIRTUAL_ROOT,
    VIRTUAL_SEPARATOR,
};

use crate::{
    node::{FileTree, NodeType, TreeNode},
    static_tree::DESKTOP_ID,
};

/// Id of the synthetic folder holding remote store records.
pub const SERVER_FILES_ID: &str = "api-files";
pub const SERVER_FILES_NAME: &str = "Server Files";
/// Id of the synthetic folder holding blog posts grouped by category.
pub const BLOG_POSTS_ID: &str = "blog-posts";
pub const BLOG_POSTS_NAME: &str = "Blog Posts";
pub const DEFAULT_POST_CATEGORY: &str = "General";

const FOLDER_ICON: &str = "📁";
const FILE_ICON: &str = "📄";

/// Builds the explorer tree.
///
/// The static tree's Desktop folder gets its children from `desktop_entries`; `Server Files` and
/// `Blog Posts` are prepended to the root when their sources are non-empty. The result depends
/// only on the inputs.
pub fn merge_tree(
    static_tree: &TreeNode,
    server_nodes: &[StoreFileRecord],
    desktop_entries: &[DesktopEntry],
    posts: &[BlogPostRecord],
) -> FileTree {
    let mut root = static_tree.clone();
    let root_path = root
        .path
        .get_or_insert_with(|| VIRTUAL_ROOT.to_string())
        .clone();

    let mut children = Vec::new();
    if !server_nodes.is_empty() {
        let path = join_virtual_path(&root_path, SERVER_FILES_NAME);
        children.push(
            TreeNode::folder(SERVER_FILES_ID, SERVER_FILES_NAME)
                .with_path(path.clone())
                .with_icon("🌐")
                .with_children(
                    server_nodes
                        .iter()
                        .map(|record| store_record_to_node(record, &path))
                        .collect(),
                ),
        );
    }
    if !posts.is_empty() {
        children.push(blog_posts_folder(&root_path, posts));
    }

    for mut child in root.children.take().unwrap_or_default() {
        if child.id == DESKTOP_ID && child.kind == NodeType::Folder {
            let path = child
                .path
                .get_or_insert_with(|| join_virtual_path(&root_path, &child.name))
                .clone();
            child.children = Some(
                desktop_entries
                    .iter()
                    .filter_map(|entry| desktop_entry_to_node(entry, &path))
                    .collect(),
            );
        }
        children.push(child);
    }
    root.children = Some(children);

    FileTree::from_nested(&root)
}

/// Converts a store record (and its nested children) into an explorer node under `parent_path`.
pub(crate) fn store_record_to_node(record: &StoreFileRecord, parent_path: &str) -> TreeNode {
    let path = join_virtual_path(parent_path, &record.name);
    let mut node = match record.kind {
        StoreEntryKind::Folder => TreeNode::folder(&record.id, &record.name).with_children(
            record
                .children
                .iter()
                .flatten()
                .map(|child| store_record_to_node(child, &path))
                .collect(),
        ),
        StoreEntryKind::File => {
            TreeNode::file(&record.id, &record.name).with_content(record.content.clone())
        }
    };
    node.path = Some(path);
    let default_icon = if record.is_folder() {
        FOLDER_ICON
    } else {
        FILE_ICON
    };
    node.icon = Some(
        record
            .icon
            .clone()
            .unwrap_or_else(|| default_icon.to_string()),
    );
    if record.size > 0 {
        node.size = Some(format!("{} B", record.size));
    }
    node.modified = record.updated_at.clone();
    node
}

fn desktop_entry_to_node(entry: &DesktopEntry, desktop_path: &str) -> Option<TreeNode> {
    let mut node = match entry.kind.as_str() {
        "folder" => TreeNode::folder(&entry.id, &entry.name),
        "file" => TreeNode::file(&entry.id, &entry.name)
            .with_content(entry.content.clone().unwrap_or_default()),
        _ => return None,
    };
    node.path = Some(join_virtual_path(desktop_path, &entry.name));
    node.icon = entry.icon.clone();
    Some(node)
}

fn blog_posts_folder(root_path: &str, posts: &[BlogPostRecord]) -> TreeNode {
    let mut categories: Vec<(&str, Vec<&BlogPostRecord>)> = Vec::new();
    for post in posts {
        let category = post.category.as_deref().unwrap_or(DEFAULT_POST_CATEGORY);
        match categories.iter().position(|(name, _)| *name == category) {
            Some(index) => categories[index].1.push(post),
            None => categories.push((category, vec![post])),
        }
    }

    let path = join_virtual_path(root_path, BLOG_POSTS_NAME);
    let folders = categories
        .into_iter()
        .map(|(category, grouped)| {
            let category_name = path_safe_name(category);
            let category_path = join_virtual_path(&path, &category_name);
            let mut taken: Vec<String> = Vec::new();
            let files = grouped
                .into_iter()
                .map(|post| {
                    let name = distinct_post_name(&taken, &path_safe_name(&post.title));
                    taken.push(name.clone());
                    post_to_node(post, &name, &category_path)
                })
                .collect();
            TreeNode::folder(format!("blog-category-{category}"), category_name)
                .with_path(category_path)
                .with_icon("📂")
                .with_children(files)
        })
        .collect();

    TreeNode::folder(BLOG_POSTS_ID, BLOG_POSTS_NAME)
        .with_path(path)
        .with_icon("📰")
        .with_children(folders)
}

/// Replaces path separators so a post title or category stays a single path segment.
fn path_safe_name(name: &str) -> String {
    name.replace(VIRTUAL_SEPARATOR, "-")
}

/// File name for a post titled `title`, suffixed ` (n)` when another post in the same category
/// already uses it.
fn distinct_post_name(taken: &[String], title: &str) -> String {
    let is_free = |candidate: &String| !taken.iter().any(|used| used == candidate);
    let name = format!("{title}.txt");
    if is_free(&name) {
        return name;
    }
    (2u32..)
        .map(|n| format!("{title} ({n}).txt"))
        .find(|candidate| is_free(candidate))
        .unwrap_or(name)
}

fn post_to_node(post: &BlogPostRecord, name: &str, parent_path: &str) -> TreeNode {
    let mut node = TreeNode::file(format!("post-{}", post.id), name)
        .with_path(join_virtual_path(parent_path, name))
        .with_icon("📝")
        .with_size(format!("{} B", post.content.len()))
        .with_content(post_file_content(post));
    node.modified = post.updated_at.clone();
    node
}

/// Renders a post as the text shown when its `.txt` file is opened.
pub fn post_file_content(post: &BlogPostRecord) -> String {
    let mut out = format!(
        "Title: {}\nCategory: {}\nCreated: {}\nViews: {}\n",
        post.title,
        post.category.as_deref().unwrap_or(DEFAULT_POST_CATEGORY),
        post.created_at.as_deref().unwrap_or_default(),
        post.views,
    );
    if !post.tags.is_empty() {
        out.push_str(&format!("Tags: {}\n", post.tags.join(", ")));
    }
    out.push_str("\n---\n\n");
    out.push_str(&post.content);
    out
}
