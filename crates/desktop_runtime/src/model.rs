use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DESKTOP_CONFIG_SCHEMA_VERSION: u32 = 1;
pub const MAX_WINDOWS: usize = 15;
pub const DEFAULT_WINDOW_WIDTH: i32 = 400;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 300;
pub const LARGE_WINDOW_WIDTH: i32 = 700;
pub const LARGE_WINDOW_HEIGHT: i32 = 500;
pub const TASKBAR_HEIGHT: i32 = 46;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub String);

impl WindowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WindowId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowState {
    #[default]
    Normal,
    Minimized,
    Maximized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    pub fn patched(self, patch: WindowPatch) -> Self {
        Self {
            x: patch.x.unwrap_or(self.x),
            y: patch.y.unwrap_or(self.y),
            w: patch.w.unwrap_or(self.w),
            h: patch.h.unwrap_or(self.h),
        }
    }
}

impl Default for WindowRect {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            w: DEFAULT_WINDOW_WIDTH,
            h: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

/// Geometry fields merged into a window by drag/resize interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowPatch {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub w: Option<i32>,
    pub h: Option<i32>,
}

impl WindowPatch {
    pub fn position(x: i32, y: i32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn size(w: i32, h: i32) -> Self {
        Self {
            w: Some(w),
            h: Some(h),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub title: String,
    /// Hosted UI payload; the window manager never reads it.
    pub content: Value,
    pub rect: WindowRect,
    pub state: WindowState,
}

impl WindowRecord {
    pub fn is_minimized(&self) -> bool {
        self.state == WindowState::Minimized
    }

    pub fn is_maximized(&self) -> bool {
        self.state == WindowState::Maximized
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: i32,
    pub height: i32,
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: i32,
    pub height: i32,
}

/// Screen geometry and window-placement policy injected into the window manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    pub schema_version: u32,
    pub screen: ScreenSize,
    pub taskbar_height: i32,
    pub max_windows: usize,
    pub default_window: WindowSize,
    pub large_window: WindowSize,
    /// Window ids that open with the larger explorer-style default size.
    pub large_window_ids: Vec<String>,
    pub spawn_offset_step: i32,
    pub spawn_offset_cycle: usize,
    pub cascade_origin: i32,
    pub cascade_step: i32,
    pub sounds_enabled: bool,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            schema_version: DESKTOP_CONFIG_SCHEMA_VERSION,
            screen: ScreenSize::default(),
            taskbar_height: TASKBAR_HEIGHT,
            max_windows: MAX_WINDOWS,
            default_window: WindowSize {
                width: DEFAULT_WINDOW_WIDTH,
                height: DEFAULT_WINDOW_HEIGHT,
            },
            large_window: WindowSize {
                width: LARGE_WINDOW_WIDTH,
                height: LARGE_WINDOW_HEIGHT,
            },
            large_window_ids: ["computer", "projects", "explorer"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            spawn_offset_step: 30,
            spawn_offset_cycle: 5,
            cascade_origin: 30,
            cascade_step: 30,
            sounds_enabled: true,
        }
    }
}

impl DesktopConfig {
    /// Height available to windows once the taskbar is excluded.
    pub fn usable_height(&self) -> i32 {
        (self.screen.height - self.taskbar_height).max(0)
    }

    pub fn default_size_for(&self, id: &WindowId) -> WindowSize {
        if self.large_window_ids.iter().any(|large| large == id.as_str()) {
            self.large_window
        } else {
            self.default_window
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WindowManagerState {
    /// Open windows in creation order.
    pub windows: Vec<WindowRecord>,
    pub focused_window: Option<WindowId>,
}

impl WindowManagerState {
    pub fn window(&self, id: &WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| &w.id == id)
    }

    pub fn window_mut(&mut self, id: &WindowId) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| &w.id == id)
    }

    pub fn contains(&self, id: &WindowId) -> bool {
        self.window(id).is_some()
    }

    pub fn focused_window_id(&self) -> Option<&WindowId> {
        self.focused_window.as_ref()
    }

    pub fn visible_windows(&self) -> impl Iterator<Item = &WindowRecord> {
        self.windows.iter().filter(|w| !w.is_minimized())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OpenWindowOptions {
    pub width: Option<i32>,
    pub height: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenWindowRequest {
    pub id: WindowId,
    pub title: String,
    pub content: Value,
    pub options: OpenWindowOptions,
}

impl OpenWindowRequest {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: WindowId::new(id),
            title: title.into(),
            content: Value::Null,
            options: OpenWindowOptions::default(),
        }
    }

    pub fn with_content(mut self, content: Value) -> Self {
        self.content = content;
        self
    }

    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.options = OpenWindowOptions {
            width: Some(width),
            height: Some(height),
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn config_deserializes_partial_json_with_defaults() {
        let config: DesktopConfig =
            serde_json::from_value(json!({ "screen": { "width": 1920, "height": 1080 } }))
                .expect("deserialize");
        assert_eq!(config.screen.width, 1920);
        assert_eq!(config.max_windows, MAX_WINDOWS);
        assert_eq!(config.usable_height(), 1080 - TASKBAR_HEIGHT);
    }

    #[test]
    fn explorer_class_ids_get_large_default_size() {
        let config = DesktopConfig::default();
        assert_eq!(
            config.default_size_for(&WindowId::from("computer")),
            config.large_window
        );
        assert_eq!(
            config.default_size_for(&WindowId::from("notepad")),
            config.default_window
        );
    }

    #[test]
    fn window_state_serializes_as_kebab_case() {
        assert_eq!(
            serde_json::to_string(&WindowState::Minimized).expect("serialize"),
            "\"minimized\""
        );
        assert_eq!(
            serde_json::to_string(&WindowId::from("notepad")).expect("serialize"),
            "\"notepad\""
        );
    }

    #[test]
    fn patch_merges_only_present_fields() {
        let rect = WindowRect {
            x: 1,
            y: 2,
            w: 3,
            h: 4,
        };
        assert_eq!(
            rect.patched(WindowPatch::position(10, 20)),
            WindowRect {
                x: 10,
                y: 20,
                w: 3,
                h: 4
            }
        );
        assert_eq!(rect.offset(5, 5).x, 6);
    }
}
