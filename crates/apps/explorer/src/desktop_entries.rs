//! Browser-local desktop items persisted through the preference store.

use platform_host::{load_pref_with, save_pref_with, DesktopEntry, PrefsStore, DESKTOP_ENTRIES_KEY};

/// Loads the persisted desktop entries. Unreadable values are logged and treated as empty.
pub fn load_desktop_entries<S: PrefsStore + ?Sized>(store: &S) -> Vec<DesktopEntry> {
    match load_pref_with::<_, Vec<DesktopEntry>>(store, DESKTOP_ENTRIES_KEY) {
        Ok(entries) => entries.unwrap_or_default(),
        Err(err) => {
            log::warn!("desktop entries could not be loaded: {err}");
            Vec::new()
        }
    }
}

/// Appends `entry` to the persisted list.
pub fn save_desktop_entry<S: PrefsStore + ?Sized>(
    store: &S,
    entry: DesktopEntry,
) -> Result<(), String> {
    let mut entries = load_desktop_entries(store);
    entries.push(entry);
    save_pref_with(store, DESKTOP_ENTRIES_KEY, &entries)
}

/// Removes every entry with `id` from the persisted list.
pub fn remove_desktop_entry<S: PrefsStore + ?Sized>(store: &S, id: &str) -> Result<(), String> {
    let mut entries = load_desktop_entries(store);
    entries.retain(|entry| entry.id != id);
    save_pref_with(store, DESKTOP_ENTRIES_KEY, &entries)
}
