use super::*;

#[test]
fn memory_storage_starts_empty() {
    let storage = MemoryStorage::new();
    assert!(storage.is_empty());
    assert_eq!(storage.get("token"), None);
}

#[test]
fn memory_storage_set_replaces_previous_value() {
    let storage = MemoryStorage::new();
    storage.set("token", "a");
    storage.set("token", "b");
    assert_eq!(storage.get("token").as_deref(), Some("b"));
    assert_eq!(storage.len(), 1);
}

#[test]
fn memory_storage_remove_missing_key_is_noop() {
    let storage = MemoryStorage::new();
    storage.set("keep", "1");
    storage.remove("missing");
    assert_eq!(storage.len(), 1);
}

#[test]
fn memory_storage_clones_share_entries() {
    let storage = MemoryStorage::new();
    let reloaded = storage.clone();
    storage.set("onboarding_completed", "true");
    assert_eq!(reloaded.get("onboarding_completed").as_deref(), Some("true"));
    reloaded.remove("onboarding_completed");
    assert!(storage.is_empty());
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn browser_storage_is_inert_outside_the_browser() {
    let storage = BrowserStorage;
    storage.set("token", "t1");
    assert_eq!(storage.get("token"), None);
    storage.remove("token");
}

#[test]
fn storage_is_usable_through_a_reference() {
    let storage = MemoryStorage::new();
    let by_ref: &MemoryStorage = &storage;
    Storage::set(&by_ref, "k", "v");
    assert_eq!(storage.get("k").as_deref(), Some("v"));
}
