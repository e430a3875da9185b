//! Virtual-path helpers shared across host abstractions and the explorer tree.
//!
//! Explorer paths are `\`-joined strings rooted at [`VIRTUAL_ROOT`]. Comparisons are exact and
//! case-sensitive: no trimming, case folding, or trailing-separator handling is applied.

/// Path of the virtual drive root.
pub const VIRTUAL_ROOT: &str = "C:";
/// Separator between virtual path segments.
pub const VIRTUAL_SEPARATOR: char = '\\';

/// Joins a child name onto a parent virtual path.
pub fn join_virtual_path(parent: &str, name: &str) -> String {
    format!("{parent}{VIRTUAL_SEPARATOR}{name}")
}

/// Returns the parent of `path`, or `None` when `path` has a single segment.
pub fn parent_virtual_path(path: &str) -> Option<&str> {
    path.rfind(VIRTUAL_SEPARATOR).map(|idx| &path[..idx])
}

/// Returns `true` when `candidate` is `ancestor` itself or lies somewhere beneath it.
///
/// The check is segment-aware: `C:\Docs2` is not considered inside `C:\Docs`.
pub fn is_same_or_descendant(candidate: &str, ancestor: &str) -> bool {
    candidate == ancestor
        || candidate
            .strip_prefix(ancestor)
            .is_some_and(|rest| rest.starts_with(VIRTUAL_SEPARATOR))
}

/// Replaces `old_prefix` at the start of `path` with `new_prefix`, keeping the remainder as-is.
///
/// Returns `None` when `path` does not start with `old_prefix`.
pub fn rebase_virtual_path(path: &str, old_prefix: &str, new_prefix: &str) -> Option<String> {
    path.strip_prefix(old_prefix)
        .map(|rest| format!("{new_prefix}{rest}"))
}

/// Returns `true` when `id` has the store's primary key shape (24 hexadecimal digits).
///
/// Only nodes carrying such an id are backed by the remote store and may be mutated through it.
pub fn is_store_id(id: &str) -> bool {
    id.len() == 24 && id.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_and_parent_are_inverse_for_nested_paths() {
        let path = join_virtual_path("C:\\My Documents", "Projects");
        assert_eq!(path, "C:\\My Documents\\Projects");
        assert_eq!(parent_virtual_path(&path), Some("C:\\My Documents"));
        assert_eq!(parent_virtual_path("C:"), None);
    }

    #[test]
    fn descendant_check_is_segment_aware() {
        let cases = [
            ("C:\\Docs", "C:\\Docs", true),
            ("C:\\Docs\\Sub", "C:\\Docs", true),
            ("C:\\Docs\\Sub\\Deep", "C:\\Docs", true),
            ("C:\\Docs2", "C:\\Docs", false),
            ("C:\\docs\\Sub", "C:\\Docs", false),
            ("C:", "C:\\Docs", false),
        ];
        for (candidate, ancestor, expected) in cases {
            assert_eq!(
                is_same_or_descendant(candidate, ancestor),
                expected,
                "candidate={candidate:?} ancestor={ancestor:?}"
            );
        }
    }

    #[test]
    fn rebase_substitutes_prefix_and_preserves_suffix() {
        assert_eq!(
            rebase_virtual_path("C:\\Docs\\Proj\\notes.txt", "C:\\Docs\\Proj\\", "C:\\Archive\\Proj\\")
                .as_deref(),
            Some("C:\\Archive\\Proj\\notes.txt")
        );
        assert_eq!(rebase_virtual_path("C:\\Other", "C:\\Docs\\", "C:\\X\\"), None);
    }

    #[test]
    fn store_ids_are_exactly_twenty_four_hex_digits() {
        assert!(is_store_id("65a1f0c2b3d4e5f60718293a"));
        assert!(is_store_id("65A1F0C2B3D4E5F60718293A"));
        assert!(!is_store_id("65a1f0c2b3d4e5f60718293"));
        assert!(!is_store_id("65a1f0c2b3d4e5f60718293ab"));
        assert!(!is_store_id("my-documents"));
        assert!(!is_store_id("post-65a1f0c2b3d4e5f60718293a"));
        assert!(!is_store_id("zza1f0c2b3d4e5f60718293a"));
    }
}
