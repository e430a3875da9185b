use desktop_runtime::{
    load_desktop_config, persist_desktop_config, DesktopConfig, OpenWindowOptions, RuntimeEffect,
    WindowId, WindowManager, WindowState, MAX_WINDOWS,
};
use platform_host::MemoryPrefsStore;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn open(manager: &mut WindowManager, id: &str) -> Vec<RuntimeEffect> {
    manager.open_window(id, id.to_uppercase(), Value::Null, OpenWindowOptions::default())
}

fn abc_with_b_minimized() -> WindowManager {
    let mut manager = WindowManager::default();
    for id in ["a", "b", "c"] {
        open(&mut manager, id);
    }
    manager.minimize_window(&WindowId::from("b"));
    manager
}

#[test]
fn reopening_an_id_keeps_the_original_title_and_content() {
    let mut manager = WindowManager::default();
    manager.open_window("x", "First", json!({"doc": 1}), OpenWindowOptions::default());
    manager.open_window("x", "Second", json!({"doc": 2}), OpenWindowOptions::default());

    assert_eq!(manager.len(), 1);
    let record = manager.window(&WindowId::from("x")).expect("x");
    assert_eq!(record.title, "First");
    assert_eq!(record.content, json!({"doc": 1}));
}

#[test]
fn sixteenth_window_is_refused_at_capacity() {
    let mut manager = WindowManager::default();
    for n in 0..MAX_WINDOWS {
        open(&mut manager, &format!("w{n}"));
    }
    assert_eq!(manager.len(), MAX_WINDOWS);

    let effects = open(&mut manager, "one-too-many");

    assert_eq!(manager.len(), MAX_WINDOWS);
    assert!(effects.contains(&RuntimeEffect::WindowLimitReached { max: MAX_WINDOWS }));
    assert!(manager.window(&WindowId::from("one-too-many")).is_none());
}

#[test]
fn minimize_then_restore_returns_to_normal_with_focus() {
    let mut manager = WindowManager::default();
    open(&mut manager, "a");
    open(&mut manager, "b");
    let a = WindowId::from("a");

    manager.minimize_window(&a);
    manager.restore_window(&a);

    assert_eq!(manager.window(&a).expect("a").state, WindowState::Normal);
    assert_eq!(manager.focused_window(), Some(&a));
}

#[test]
fn tiling_skips_minimized_windows() {
    let mut manager = abc_with_b_minimized();
    let b = WindowId::from("b");
    let before_b = manager.window(&b).expect("b").clone();
    let before_a = manager.window(&WindowId::from("a")).expect("a").rect;

    manager.tile_windows_horizontally();

    let after_b = manager.window(&b).expect("b");
    assert_eq!(after_b.rect, before_b.rect);
    assert_eq!(after_b.state, WindowState::Minimized);
    let a = manager.window(&WindowId::from("a")).expect("a").rect;
    let c = manager.window(&WindowId::from("c")).expect("c").rect;
    assert_ne!(a, before_a);
    assert_eq!((a.x, a.y), (0, 0));
    assert_eq!((c.x, c.y), (a.w, 0));
    assert_eq!(a.w, DesktopConfig::default().screen.width / 2);
    assert_eq!(a.h, DesktopConfig::default().usable_height());
}

#[test]
fn focus_cycle_skips_minimized_windows() {
    let mut manager = abc_with_b_minimized();
    let a = WindowId::from("a");
    manager.focus_window(&a);

    manager.focus_next_window();
    assert_eq!(manager.focused_window(), Some(&WindowId::from("c")));
    manager.focus_next_window();
    assert_eq!(manager.focused_window(), Some(&a));
}

#[test]
fn persisted_config_drives_a_new_manager() {
    let prefs = MemoryPrefsStore::default();
    let config = DesktopConfig {
        max_windows: 2,
        ..DesktopConfig::default()
    };
    persist_desktop_config(&prefs, &config).expect("persist");

    let mut manager = WindowManager::new(load_desktop_config(&prefs));
    open(&mut manager, "a");
    open(&mut manager, "b");
    let effects = open(&mut manager, "c");

    assert_eq!(manager.len(), 2);
    assert_eq!(effects[0], RuntimeEffect::WindowLimitReached { max: 2 });
}
