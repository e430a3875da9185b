//! Built-in `My Computer` hierarchy shown before any remote data arrives.

use crate::node::TreeNode;

/// Id of the static folder whose children are replaced by browser-local desktop entries.
pub const DESKTOP_ID: &str = "desktop";

/// Path the explorer opens when no other path is requested.
pub const DEFAULT_START_PATH: &str = "C:\\My Documents\\Projects";

fn readme(id: &str, size: &str, modified: &str, body: &str) -> TreeNode {
    TreeNode::file(id, "README.md")
        .with_size(size)
        .with_modified(modified)
        .with_content(body)
}

fn listing(id: &str, name: &str, size: &str, modified: &str) -> TreeNode {
    TreeNode::file(id, name).with_size(size).with_modified(modified)
}

fn project(id: &str, name: &str, icon: &str, files: Vec<TreeNode>) -> TreeNode {
    TreeNode::folder(id, name).with_icon(icon).with_children(files)
}

/// Returns the static tree rooted at `C:`.
pub fn default_static_tree() -> TreeNode {
    let backend = project(
        "backend",
        "Backend Projects",
        "🔧",
        vec![
            project(
                "api-server",
                "REST API Server",
                "🌐",
                vec![
                    readme(
                        "api-readme",
                        "4.2 KB",
                        "2025-01-25",
                        "# REST API Server\n\nCRUD service for the desktop file store.\n\n\
                         - Folder tree queries\n- Token-protected mutations\n- Path rewrites on move",
                    ),
                    listing("api-package", "package.json", "1.8 KB", "2025-01-20"),
                ],
            ),
            project(
                "chat-server",
                "Real-time Chat Server",
                "💬",
                vec![readme(
                    "chat-readme",
                    "3.5 KB",
                    "2025-01-15",
                    "# Real-time Chat Server\n\nRoom-based messaging over websockets with presence.",
                )],
            ),
        ],
    );

    let frontend = project(
        "frontend",
        "Frontend Projects",
        "🎨",
        vec![
            project(
                "portfolio",
                "Portfolio Website",
                "🌟",
                vec![
                    readme(
                        "portfolio-readme",
                        "2.1 KB",
                        "2025-01-30",
                        "# Portfolio Website\n\nA Windows 98 desktop in the browser: windows, \
                         taskbar, start menu, and a file explorer.",
                    ),
                    listing("portfolio-demo", "DEMO.url", "156 B", "2025-01-30"),
                ],
            ),
            project(
                "dashboard",
                "Admin Dashboard",
                "📊",
                vec![readme(
                    "dashboard-readme",
                    "3.8 KB",
                    "2025-01-10",
                    "# Admin Dashboard\n\nCharts and tables for site analytics.",
                )],
            ),
        ],
    );

    let fullstack = project(
        "fullstack",
        "Full Stack Projects",
        "🚀",
        vec![project(
            "ecommerce",
            "E-Commerce Platform",
            "🛒",
            vec![readme(
                "ecommerce-readme",
                "5.6 KB",
                "2025-01-05",
                "# E-Commerce Platform\n\nCatalog, cart, checkout, and order tracking.",
            )],
        )],
    );

    let blog = project(
        "blog",
        "Blog",
        "📝",
        vec![
            listing(
                "blog-post-1",
                "2025-01-31-windows98-clone.md",
                "12.4 KB",
                "2025-01-31",
            )
            .with_content("# Building a Windows 98 clone\n\nNotes on window management."),
            listing(
                "blog-post-2",
                "2025-01-20-react-hooks.md",
                "8.2 KB",
                "2025-01-20",
            ),
        ],
    );

    let resume = project(
        "resume",
        "Resume",
        "📄",
        vec![
            listing("resume-en", "Resume_EN.pdf", "245 KB", "2025-01-28"),
            listing("resume-ko", "Resume_KO.pdf", "238 KB", "2025-01-28"),
        ],
    );

    TreeNode::folder("root", "My Computer")
        .with_path("C:")
        .with_children(vec![
            TreeNode::folder(DESKTOP_ID, "Desktop").with_icon("🖥️"),
            project(
                "my-documents",
                "My Documents",
                "📁",
                vec![
                    project("projects", "Projects", "💼", vec![backend, frontend, fullstack]),
                    blog,
                    resume,
                ],
            ),
        ])
}
