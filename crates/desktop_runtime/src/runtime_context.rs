//! Long-lived window-manager container with an explicit observer contract.
//!
//! [`WindowManager`] owns the reducer state and injected [`DesktopConfig`], exposes one method
//! per window operation, and notifies subscribers after every dispatch that changed state. UI
//! bindings subscribe here instead of relying on framework reactivity.

use serde_json::Value;

use crate::{
    model::{
        DesktopConfig, OpenWindowOptions, OpenWindowRequest, WindowId, WindowManagerState,
        WindowPatch, WindowRecord,
    },
    reducer::{reduce_windows, RuntimeEffect, WindowAction},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Handle returned by [`WindowManager::subscribe`].
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&WindowManagerState)>;

/// Window-manager state container driven by [`reduce_windows`].
pub struct WindowManager {
    state: WindowManagerState,
    config: DesktopConfig,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new(DesktopConfig::default())
    }
}

impl std::fmt::Debug for WindowManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowManager")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl WindowManager {
    pub fn new(config: DesktopConfig) -> Self {
        Self {
            state: WindowManagerState::default(),
            config,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn state(&self) -> &WindowManagerState {
        &self.state
    }

    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    /// Replaces the configuration; existing window geometry is left as-is.
    pub fn set_config(&mut self, config: DesktopConfig) {
        self.config = config;
    }

    pub fn windows(&self) -> &[WindowRecord] {
        &self.state.windows
    }

    pub fn window(&self, id: &WindowId) -> Option<&WindowRecord> {
        self.state.window(id)
    }

    pub fn focused_window(&self) -> Option<&WindowId> {
        self.state.focused_window_id()
    }

    /// Windows that are not minimized, in creation order.
    pub fn visible_windows(&self) -> impl Iterator<Item = &WindowRecord> {
        self.state.visible_windows()
    }

    pub fn len(&self) -> usize {
        self.state.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.windows.is_empty()
    }

    /// Registers a callback invoked with the new state after every state-changing dispatch.
    pub fn subscribe(&mut self, listener: impl FnMut(&WindowManagerState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a subscription; returns `false` when it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Applies `action` and notifies subscribers when the state changed.
    pub fn dispatch(&mut self, action: WindowAction) -> Vec<RuntimeEffect> {
        let previous = self.state.clone();
        let effects = reduce_windows(&mut self.state, &self.config, action);
        if self.state != previous {
            for (_, listener) in &mut self.listeners {
                listener(&self.state);
            }
        }
        effects
    }

    /// Opens `id`, or focuses and restores it when already open.
    pub fn open_window(
        &mut self,
        id: impl Into<String>,
        title: impl Into<String>,
        content: Value,
        options: OpenWindowOptions,
    ) -> Vec<RuntimeEffect> {
        let mut request = OpenWindowRequest::new(id, title).with_content(content);
        request.options = options;
        self.dispatch(WindowAction::OpenWindow(request))
    }

    pub fn close_window(&mut self, id: &WindowId) -> Vec<RuntimeEffect> {
        self.dispatch(WindowAction::CloseWindow {
            window_id: id.clone(),
        })
    }

    pub fn focus_window(&mut self, id: &WindowId) -> Vec<RuntimeEffect> {
        self.dispatch(WindowAction::FocusWindow {
            window_id: id.clone(),
        })
    }

    pub fn minimize_window(&mut self, id: &WindowId) -> Vec<RuntimeEffect> {
        self.dispatch(WindowAction::MinimizeWindow {
            window_id: id.clone(),
        })
    }

    pub fn maximize_window(&mut self, id: &WindowId) -> Vec<RuntimeEffect> {
        self.dispatch(WindowAction::MaximizeWindow {
            window_id: id.clone(),
        })
    }

    pub fn restore_window(&mut self, id: &WindowId) -> Vec<RuntimeEffect> {
        self.dispatch(WindowAction::RestoreWindow {
            window_id: id.clone(),
        })
    }

    pub fn update_window(&mut self, id: &WindowId, patch: WindowPatch) -> Vec<RuntimeEffect> {
        self.dispatch(WindowAction::UpdateWindow {
            window_id: id.clone(),
            patch,
        })
    }

    pub fn resize_window(&mut self, id: &WindowId, width: i32, height: i32) -> Vec<RuntimeEffect> {
        self.update_window(id, WindowPatch::size(width, height))
    }

    pub fn cascade_windows(&mut self) -> Vec<RuntimeEffect> {
        self.dispatch(WindowAction::CascadeWindows)
    }

    pub fn tile_windows_horizontally(&mut self) -> Vec<RuntimeEffect> {
        self.dispatch(WindowAction::TileHorizontally)
    }

    pub fn tile_windows_vertically(&mut self) -> Vec<RuntimeEffect> {
        self.dispatch(WindowAction::TileVertically)
    }

    pub fn minimize_all(&mut self) -> Vec<RuntimeEffect> {
        self.dispatch(WindowAction::MinimizeAll)
    }

    pub fn restore_all(&mut self) -> Vec<RuntimeEffect> {
        self.dispatch(WindowAction::RestoreAll)
    }

    pub fn focus_next_window(&mut self) -> Vec<RuntimeEffect> {
        self.dispatch(WindowAction::FocusNextWindow)
    }
}
