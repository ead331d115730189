//! File-backed persistence

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::{CardConfig, SavedCard};

use super::asset::{decode_data_uri, hashed_asset_name};
use super::{ensure_card_id, CardStore, SaveReceipt, StoreError, StoredAsset};

/// Saves and loads the configuration tree as one JSON document on disk.
/// The whole tree goes out on every save; success or error comes back.
#[derive(Debug, Clone)]
pub struct FsConfigStore {
    path: PathBuf,
}

impl FsConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, config: &CardConfig) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, json)?;
        info!(path = %self.path.display(), "configuration tree saved");
        Ok(())
    }

    pub fn load(&self) -> Result<CardConfig, StoreError> {
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Decode a data-URI upload into `dir`, deduplicating by content hash.
/// An already present file is left alone and reported as deduplicated.
pub fn ingest_asset(
    dir: &Path,
    filename: &str,
    data_uri: &str,
) -> Result<StoredAsset, StoreError> {
    let decoded = decode_data_uri(data_uri)?;
    let name = hashed_asset_name(filename, &decoded.bytes);
    let path = dir.join(&name);

    if path.exists() {
        return Ok(StoredAsset {
            url: path.to_string_lossy().into_owned(),
            deduplicated: true,
        });
    }

    fs::create_dir_all(dir)?;
    fs::write(&path, &decoded.bytes)?;
    info!(path = %path.display(), mime = %decoded.mime, "asset stored");
    Ok(StoredAsset {
        url: path.to_string_lossy().into_owned(),
        deduplicated: false,
    })
}

/// File-backed card store: one JSON document holding every card, plus an
/// asset directory with content-hashed filenames.
#[derive(Debug, Clone)]
pub struct FsCardStore {
    cards_path: PathBuf,
    asset_dir: PathBuf,
}

impl FsCardStore {
    pub fn new(cards_path: impl Into<PathBuf>, asset_dir: impl Into<PathBuf>) -> Self {
        Self {
            cards_path: cards_path.into(),
            asset_dir: asset_dir.into(),
        }
    }

    fn load_all(&self) -> Result<Vec<SavedCard>, StoreError> {
        if !self.cards_path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.cards_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save_all(&self, cards: &[SavedCard]) -> Result<(), StoreError> {
        if let Some(parent) = self.cards_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(cards)?;
        fs::write(&self.cards_path, json)?;
        Ok(())
    }
}

impl CardStore for FsCardStore {
    fn save_card(&mut self, mut card: SavedCard) -> Result<SaveReceipt, StoreError> {
        ensure_card_id(&mut card);
        let id = card.id.clone();

        let mut cards = self.load_all()?;
        match cards.iter_mut().find(|c| c.id == card.id) {
            Some(existing) => *existing = card,
            None => cards.push(card),
        }
        self.save_all(&cards)?;
        Ok(SaveReceipt { id })
    }

    fn get_cards(&self) -> Result<Vec<SavedCard>, StoreError> {
        let mut cards = self.load_all()?;
        cards.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(cards)
    }

    fn delete_card(&mut self, id: &str) -> Result<(), StoreError> {
        let mut cards = self.load_all()?;
        cards.retain(|c| c.id != id);
        self.save_all(&cards)
    }

    fn save_asset(&mut self, filename: &str, data_uri: &str) -> Result<StoredAsset, StoreError> {
        ingest_asset(&self.asset_dir, filename, data_uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Template;

    #[test]
    fn test_config_round_trip_on_disk() {
        let dir = tempfile::tempdir().expect("Should create tempdir");
        let store = FsConfigStore::new(dir.path().join("cardConfig.json"));

        let mut config = CardConfig::new();
        config.templates.push(Template::new("t1", "Base"));
        store.save(&config).expect("Should save");

        let loaded = store.load().expect("Should load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_card_store_upsert_and_delete() {
        let dir = tempfile::tempdir().expect("Should create tempdir");
        let mut store = FsCardStore::new(dir.path().join("cards.json"), dir.path().join("uploads"));

        let receipt = store
            .save_card(SavedCard {
                id: "c1".to_string(),
                updated_at: 1,
                ..SavedCard::default()
            })
            .expect("Should save");
        assert_eq!(receipt.id, "c1");

        store
            .save_card(SavedCard {
                id: "c1".to_string(),
                name: "Renamed".to_string(),
                updated_at: 2,
                ..SavedCard::default()
            })
            .expect("Should save");

        let cards = store.get_cards().expect("Should list");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].name, "Renamed");

        store.delete_card("c1").expect("Should delete");
        assert!(store.get_cards().expect("Should list").is_empty());
    }

    #[test]
    fn test_ingest_asset_writes_once() {
        let dir = tempfile::tempdir().expect("Should create tempdir");
        let uploads = dir.path().join("uploads");

        let first = ingest_asset(&uploads, "frame.png", "data:image/png;base64,aGVsbG8=")
            .expect("Should store");
        assert!(!first.deduplicated);
        assert!(Path::new(&first.url).exists());

        let second = ingest_asset(&uploads, "frame.png", "data:image/png;base64,aGVsbG8=")
            .expect("Should store");
        assert!(second.deduplicated);
        assert_eq!(first.url, second.url);
    }
}
