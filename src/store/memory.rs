//! In-memory store for tests and offline sessions

use std::collections::BTreeMap;

use crate::config::SavedCard;

use super::asset::{decode_data_uri, hashed_asset_name};
use super::{ensure_card_id, CardStore, SaveReceipt, StoreError, StoredAsset};

/// Keeps cards and assets in process memory. The trait contract is the
/// same as the cloud-backed stores, which is what makes it usable as a
/// drop-in test double.
#[derive(Debug, Default)]
pub struct MemoryStore {
    cards: Vec<SavedCard>,
    assets: BTreeMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn asset_bytes(&self, name: &str) -> Option<&[u8]> {
        self.assets.get(name).map(Vec::as_slice)
    }
}

impl CardStore for MemoryStore {
    fn save_card(&mut self, mut card: SavedCard) -> Result<SaveReceipt, StoreError> {
        ensure_card_id(&mut card);
        let id = card.id.clone();
        match self.cards.iter_mut().find(|c| c.id == card.id) {
            Some(existing) => *existing = card,
            None => self.cards.push(card),
        }
        Ok(SaveReceipt { id })
    }

    fn get_cards(&self) -> Result<Vec<SavedCard>, StoreError> {
        let mut cards = self.cards.clone();
        cards.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(cards)
    }

    fn delete_card(&mut self, id: &str) -> Result<(), StoreError> {
        self.cards.retain(|c| c.id != id);
        Ok(())
    }

    fn save_asset(&mut self, filename: &str, data_uri: &str) -> Result<StoredAsset, StoreError> {
        let decoded = decode_data_uri(data_uri)?;
        let name = hashed_asset_name(filename, &decoded.bytes);
        let deduplicated = self.assets.contains_key(&name);
        if !deduplicated {
            self.assets.insert(name.clone(), decoded.bytes);
        }
        Ok(StoredAsset {
            url: format!("assets/uploads/{name}"),
            deduplicated,
        })
    }
}
