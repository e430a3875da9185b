//! Window-manager runtime for the retro desktop: model, reducer, geometry helpers, and the
//! observer-driven [`WindowManager`] container.

pub mod model;
pub mod persistence;
pub mod reducer;
pub mod runtime_context;
pub mod window_manager;

pub use model::*;
pub use persistence::{load_desktop_config, persist_desktop_config, DESKTOP_CONFIG_KEY};
pub use reducer::{reduce_windows, RuntimeEffect, WindowAction};
pub use runtime_context::{SubscriptionId, WindowManager};
pub use window_manager::{FocusCycle, TileOrientation};
