//! Reducer actions, side-effect intents, and transition logic for the window manager.

use crate::{
    model::{
        DesktopConfig, OpenWindowRequest, WindowId, WindowManagerState, WindowPatch, WindowRecord,
        WindowState,
    },
    window_manager::{cascade_position, next_focus, spawn_rect, tile_rects, FocusCycle, TileOrientation},
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_windows`] to mutate [`WindowManagerState`].
pub enum WindowAction {
    /// Open a window, or focus and un-minimize it when the id is already open.
    OpenWindow(OpenWindowRequest),
    /// Close a window by id.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Give a window input focus.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Minimize a window.
    MinimizeWindow {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Toggle a window between maximized and normal.
    MaximizeWindow {
        /// Window to toggle.
        window_id: WindowId,
    },
    /// Force a window back to normal and focus it.
    RestoreWindow {
        /// Window to restore.
        window_id: WindowId,
    },
    /// Merge geometry fields into a window.
    UpdateWindow {
        /// Window to update.
        window_id: WindowId,
        /// Fields to merge.
        patch: WindowPatch,
    },
    /// Arrange every window diagonally from the top-left corner.
    CascadeWindows,
    /// Lay visible windows out as side-by-side columns.
    TileHorizontally,
    /// Lay visible windows out as stacked rows.
    TileVertically,
    /// Minimize every window.
    MinimizeAll,
    /// Restore every window to normal.
    RestoreAll,
    /// Cycle focus to the next visible window.
    FocusNextWindow,
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_windows`] for the shell to execute.
pub enum RuntimeEffect {
    /// An open request was dropped because the window limit was reached.
    WindowLimitReached {
        /// Configured maximum number of windows.
        max: usize,
    },
    /// Move keyboard focus into the focused window's primary input.
    FocusWindowInput(WindowId),
    /// Play a named UI sound effect.
    PlaySound(&'static str),
}

/// Applies a [`WindowAction`] to the window-manager state and collects resulting side effects.
///
/// Every action is total: ids that are not open turn the action into a no-op. The only reported
/// failure is [`RuntimeEffect::WindowLimitReached`].
pub fn reduce_windows(
    state: &mut WindowManagerState,
    config: &DesktopConfig,
    action: WindowAction,
) -> Vec<RuntimeEffect> {
    let mut effects = Vec::new();
    match action {
        WindowAction::OpenWindow(req) => {
            if let Some(window) = state.window_mut(&req.id) {
                if window.is_minimized() {
                    window.state = WindowState::Normal;
                }
                state.focused_window = Some(req.id.clone());
                effects.push(RuntimeEffect::FocusWindowInput(req.id));
            } else if state.windows.len() >= config.max_windows {
                log::warn!(
                    "window limit ({}) reached; not opening `{}`",
                    config.max_windows,
                    req.id
                );
                effects.push(RuntimeEffect::WindowLimitReached {
                    max: config.max_windows,
                });
                push_sound(&mut effects, config, "error");
            } else {
                let rect = spawn_rect(config, &req.id, &req.options, state.windows.len());
                log::debug!("opening window `{}` at {rect:?}", req.id);
                state.windows.push(WindowRecord {
                    id: req.id.clone(),
                    title: req.title,
                    content: req.content,
                    rect,
                    state: WindowState::Normal,
                });
                state.focused_window = Some(req.id.clone());
                effects.push(RuntimeEffect::FocusWindowInput(req.id));
                push_sound(&mut effects, config, "window-open");
            }
        }
        WindowAction::CloseWindow { window_id } => {
            let before_len = state.windows.len();
            state.windows.retain(|w| w.id != window_id);
            if state.windows.len() != before_len {
                clear_focus_if(state, &window_id);
                push_sound(&mut effects, config, "window-close");
            }
        }
        WindowAction::FocusWindow { window_id } => {
            if state.contains(&window_id) {
                state.focused_window = Some(window_id.clone());
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            }
        }
        WindowAction::MinimizeWindow { window_id } => {
            if let Some(window) = state.window_mut(&window_id) {
                window.state = WindowState::Minimized;
                clear_focus_if(state, &window_id);
                push_sound(&mut effects, config, "minimize");
            }
        }
        WindowAction::MaximizeWindow { window_id } => {
            if let Some(window) = state.window_mut(&window_id) {
                window.state = match window.state {
                    WindowState::Maximized => WindowState::Normal,
                    WindowState::Normal | WindowState::Minimized => WindowState::Maximized,
                };
                push_sound(&mut effects, config, "maximize");
            }
        }
        WindowAction::RestoreWindow { window_id } => {
            if let Some(window) = state.window_mut(&window_id) {
                window.state = WindowState::Normal;
                state.focused_window = Some(window_id.clone());
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            }
        }
        WindowAction::UpdateWindow { window_id, patch } => {
            if let Some(window) = state.window_mut(&window_id) {
                window.rect = window.rect.patched(patch);
            }
        }
        WindowAction::CascadeWindows => {
            for (index, window) in state.windows.iter_mut().enumerate() {
                let (x, y) = cascade_position(config, index);
                window.rect.x = x;
                window.rect.y = y;
                window.state = WindowState::Normal;
            }
            push_sound(&mut effects, config, "click");
        }
        WindowAction::TileHorizontally => {
            tile(state, config, TileOrientation::Horizontal, &mut effects);
        }
        WindowAction::TileVertically => {
            tile(state, config, TileOrientation::Vertical, &mut effects);
        }
        WindowAction::MinimizeAll => {
            for window in &mut state.windows {
                window.state = WindowState::Minimized;
            }
            state.focused_window = None;
            push_sound(&mut effects, config, "minimize");
        }
        WindowAction::RestoreAll => {
            for window in &mut state.windows {
                window.state = WindowState::Normal;
            }
            push_sound(&mut effects, config, "click");
        }
        WindowAction::FocusNextWindow => match next_focus(state) {
            FocusCycle::Focus(window_id) => {
                state.focused_window = Some(window_id.clone());
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
                push_sound(&mut effects, config, "click");
            }
            FocusCycle::RestoreAndFocus(window_id) => {
                if let Some(window) = state.window_mut(&window_id) {
                    window.state = WindowState::Normal;
                }
                state.focused_window = Some(window_id.clone());
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            }
            FocusCycle::Nothing => {}
        },
    }
    effects
}

fn tile(
    state: &mut WindowManagerState,
    config: &DesktopConfig,
    orientation: TileOrientation,
    effects: &mut Vec<RuntimeEffect>,
) {
    let visible = state.visible_windows().count();
    if visible == 0 {
        return;
    }
    let rects = tile_rects(config, visible, orientation);
    for (window, rect) in state
        .windows
        .iter_mut()
        .filter(|w| !w.is_minimized())
        .zip(rects)
    {
        window.rect = rect;
        window.state = WindowState::Normal;
    }
    push_sound(effects, config, "click");
}

fn clear_focus_if(state: &mut WindowManagerState, window_id: &WindowId) {
    if state.focused_window.as_ref() == Some(window_id) {
        state.focused_window = None;
    }
}

fn push_sound(effects: &mut Vec<RuntimeEffect>, config: &DesktopConfig, sound: &'static str) {
    if config.sounds_enabled {
        effects.push(RuntimeEffect::PlaySound(sound));
    }
}
