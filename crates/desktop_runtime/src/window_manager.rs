//! Shared window-manager geometry and focus helpers used by the reducer.

use crate::model::{DesktopConfig, OpenWindowOptions, WindowId, WindowManagerState, WindowRect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Axis along which visible windows are laid side by side.
pub enum TileOrientation {
    /// Columns: the screen width is divided among windows.
    Horizontal,
    /// Rows: the usable screen height is divided among windows.
    Vertical,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of an Alt-Tab style focus cycle.
pub enum FocusCycle {
    /// Move focus to a visible window.
    Focus(WindowId),
    /// Every window is minimized: restore this one and focus it.
    RestoreAndFocus(WindowId),
    /// No windows are open.
    Nothing,
}

/// Computes the spawn rectangle for a window opened while `open_count` windows already exist.
///
/// The window is centered in the usable screen area for its size and shifted by a cyclic
/// offset so successive windows cascade instead of stacking exactly. Missing or non-positive
/// requested dimensions use the default size for `id`.
pub fn spawn_rect(
    config: &DesktopConfig,
    id: &WindowId,
    options: &OpenWindowOptions,
    open_count: usize,
) -> WindowRect {
    let default_size = config.default_size_for(id);
    let w = options.width.filter(|w| *w > 0).unwrap_or(default_size.width);
    let h = options.height.filter(|h| *h > 0).unwrap_or(default_size.height);
    let center_x = ((config.screen.width - w) / 2).max(0);
    let center_y = ((config.usable_height() - h) / 2).max(0);
    let cycle = config.spawn_offset_cycle.max(1);
    let offset = (open_count % cycle) as i32 * config.spawn_offset_step;

    WindowRect {
        x: center_x,
        y: center_y,
        w,
        h,
    }
    .offset(offset, offset)
}

/// Returns the cascade origin of the window at `index` in creation order.
pub fn cascade_position(config: &DesktopConfig, index: usize) -> (i32, i32) {
    let step = config.cascade_origin + config.cascade_step * index as i32;
    (step, step)
}

/// Lays out `count` windows edge to edge across the usable screen area.
///
/// Each window receives the floor of the even share; any remainder stays uncovered at the far
/// edge.
pub fn tile_rects(
    config: &DesktopConfig,
    count: usize,
    orientation: TileOrientation,
) -> Vec<WindowRect> {
    if count == 0 {
        return Vec::new();
    }
    let screen_w = config.screen.width;
    let screen_h = config.usable_height();
    let n = count as i32;

    (0..n)
        .map(|i| match orientation {
            TileOrientation::Horizontal => {
                let w = screen_w / n;
                WindowRect {
                    x: i * w,
                    y: 0,
                    w,
                    h: screen_h,
                }
            }
            TileOrientation::Vertical => {
                let h = screen_h / n;
                WindowRect {
                    x: 0,
                    y: i * h,
                    w: screen_w,
                    h,
                }
            }
        })
        .collect()
}

/// Picks the next focus target over non-minimized windows in creation order.
pub fn next_focus(state: &WindowManagerState) -> FocusCycle {
    let Some(first) = state.windows.first() else {
        return FocusCycle::Nothing;
    };

    let visible: Vec<&WindowId> = state.visible_windows().map(|w| &w.id).collect();
    if visible.is_empty() {
        return FocusCycle::RestoreAndFocus(first.id.clone());
    }

    let next_index = state
        .focused_window
        .as_ref()
        .and_then(|focused| visible.iter().position(|id| *id == focused))
        .map(|index| (index + 1) % visible.len())
        .unwrap_or(0);
    FocusCycle::Focus(visible[next_index].clone())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    use super::*;
    use crate::model::{ScreenSize, WindowRecord, WindowState};

    fn config() -> DesktopConfig {
        DesktopConfig {
            screen: ScreenSize {
                width: 1000,
                height: 746,
            },
            ..DesktopConfig::default()
        }
    }

    fn record(id: &str, state: WindowState) -> WindowRecord {
        WindowRecord {
            id: WindowId::from(id),
            title: id.to_string(),
            content: Value::Null,
            rect: WindowRect::default(),
            state,
        }
    }

    #[test]
    fn spawn_rect_centers_and_cycles_offset_every_five_windows() {
        let config = config();
        let id = WindowId::from("notepad");
        let options = OpenWindowOptions::default();

        let first = spawn_rect(&config, &id, &options, 0);
        assert_eq!(
            first,
            WindowRect {
                x: 300,
                y: 200,
                w: 400,
                h: 300
            }
        );
        assert_eq!(spawn_rect(&config, &id, &options, 4).x, 300 + 120);
        assert_eq!(spawn_rect(&config, &id, &options, 5), first);
    }

    #[test]
    fn spawn_rect_never_centers_off_screen_for_oversized_windows() {
        let config = config();
        let options = OpenWindowOptions {
            width: Some(2000),
            height: Some(2000),
        };
        let rect = spawn_rect(&config, &WindowId::from("big"), &options, 1);
        assert_eq!((rect.x, rect.y), (30, 30));
        assert_eq!((rect.w, rect.h), (2000, 2000));
    }

    #[test]
    fn spawn_rect_ignores_non_positive_requested_sizes() {
        let config = config();
        let id = WindowId::from("notepad");
        let options = OpenWindowOptions {
            width: Some(0),
            height: Some(-5),
        };
        assert_eq!(
            spawn_rect(&config, &id, &options, 0),
            spawn_rect(&config, &id, &OpenWindowOptions::default(), 0)
        );
    }

    #[test]
    fn tile_rects_split_width_or_height_evenly() {
        let config = config();
        assert_eq!(
            tile_rects(&config, 3, TileOrientation::Horizontal),
            vec![
                WindowRect { x: 0, y: 0, w: 333, h: 700 },
                WindowRect { x: 333, y: 0, w: 333, h: 700 },
                WindowRect { x: 666, y: 0, w: 333, h: 700 },
            ]
        );
        assert_eq!(
            tile_rects(&config, 2, TileOrientation::Vertical),
            vec![
                WindowRect { x: 0, y: 0, w: 1000, h: 350 },
                WindowRect { x: 0, y: 350, w: 1000, h: 350 },
            ]
        );
        assert!(tile_rects(&config, 0, TileOrientation::Vertical).is_empty());
    }

    #[test]
    fn next_focus_skips_minimized_and_wraps() {
        let mut state = WindowManagerState {
            windows: vec![
                record("a", WindowState::Normal),
                record("b", WindowState::Minimized),
                record("c", WindowState::Normal),
            ],
            focused_window: Some(WindowId::from("a")),
        };
        assert_eq!(next_focus(&state), FocusCycle::Focus(WindowId::from("c")));

        state.focused_window = Some(WindowId::from("c"));
        assert_eq!(next_focus(&state), FocusCycle::Focus(WindowId::from("a")));

        state.focused_window = None;
        assert_eq!(next_focus(&state), FocusCycle::Focus(WindowId::from("a")));
    }

    #[test]
    fn next_focus_restores_first_window_when_all_minimized() {
        let state = WindowManagerState {
            windows: vec![
                record("a", WindowState::Minimized),
                record("b", WindowState::Minimized),
            ],
            focused_window: None,
        };
        assert_eq!(
            next_focus(&state),
            FocusCycle::RestoreAndFocus(WindowId::from("a"))
        );
        assert_eq!(
            next_focus(&WindowManagerState::default()),
            FocusCycle::Nothing
        );
    }
}
