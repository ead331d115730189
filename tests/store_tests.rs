//! Integration tests for persistence

use holocard::config::{CardConfig, PropName, SavedCard, Template};
use holocard::store::{CardStore, FsCardStore, FsConfigStore};

fn card(id: &str, name: &str, updated_at: u64) -> SavedCard {
    SavedCard {
        id: id.to_string(),
        name: name.to_string(),
        updated_at,
        ..SavedCard::default()
    }
}

#[test]
fn test_cards_survive_store_reopen() {
    let dir = tempfile::tempdir().expect("Should create tempdir");
    let cards_path = dir.path().join("cards.json");
    let uploads = dir.path().join("uploads");

    {
        let mut store = FsCardStore::new(&cards_path, &uploads);
        store.save_card(card("c1", "First", 10)).expect("Should save");
        store.save_card(card("c2", "Second", 20)).expect("Should save");
    }

    // A fresh handle over the same file sees the same cards, newest first
    let store = FsCardStore::new(&cards_path, &uploads);
    let cards = store.get_cards().expect("Should list");
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].id, "c2");
    assert_eq!(cards[1].id, "c1");
}

#[test]
fn test_whole_tree_save_and_load() {
    let dir = tempfile::tempdir().expect("Should create tempdir");
    let store = FsConfigStore::new(dir.path().join("cardConfig.json"));

    let mut config = CardConfig::new();
    let mut tmpl = Template::new("holo-base", "Holo Base");
    tmpl.styles
        .insert(PropName::from("--accent-color"), "#336699".to_string());
    config.templates.push(tmpl);

    store.save(&config).expect("Should save");

    // Edit in memory, save the whole tree again, reload
    config.duplicate_template(0).expect("Should duplicate");
    store.save(&config).expect("Should save");

    let loaded = store.load().expect("Should load");
    assert_eq!(loaded.templates.len(), 2);
    assert_eq!(loaded, config);
}

#[test]
fn test_asset_upload_roundtrip_with_dedup() {
    let dir = tempfile::tempdir().expect("Should create tempdir");
    let mut store = FsCardStore::new(dir.path().join("cards.json"), dir.path().join("uploads"));

    let first = store
        .save_asset("holo mask.png", "data:image/png;base64,aGVsbG8gbWFzaw==")
        .expect("Should store");
    let second = store
        .save_asset("holo mask.png", "data:image/png;base64,aGVsbG8gbWFzaw==")
        .expect("Should store");

    assert!(!first.deduplicated);
    assert!(second.deduplicated);
    assert_eq!(first.url, second.url);
    let stored = std::fs::read(&first.url).expect("Should read stored asset");
    assert_eq!(stored.as_slice(), b"hello mask");

    // Same name, different content: a distinct file
    let third = store
        .save_asset("holo mask.png", "data:image/png;base64,b3RoZXI=")
        .expect("Should store");
    assert!(!third.deduplicated);
    assert_ne!(third.url, first.url);
}

#[test]
fn test_failed_load_leaves_caller_state_alone() {
    let dir = tempfile::tempdir().expect("Should create tempdir");
    let store = FsConfigStore::new(dir.path().join("missing.json"));
    assert!(store.load().is_err());
}
