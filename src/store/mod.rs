//! Persistence
//!
//! Cards flow through the `CardStore` trait: upsert by id on save, newest
//! first on read, fire-and-forget delete. The configuration tree is saved
//! whole; there is no partial-update protocol. Nothing in here is called
//! by the resolution engine itself; it only supplies and consumes the
//! shapes that pass through.

mod asset;
mod fs;
mod memory;

pub use asset::{decode_data_uri, hashed_asset_name, DecodedAsset};
pub use fs::{ingest_asset, FsCardStore, FsConfigStore};
pub use memory::MemoryStore;

use thiserror::Error;

use crate::config::SavedCard;

/// Errors from persistence operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("not a base64 data uri")]
    InvalidDataUri,
    #[error("base64 decode failed: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// Outcome of a card save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReceipt {
    pub id: String,
}

/// A stored asset reference usable in `url(...)` values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAsset {
    pub url: String,
    pub deduplicated: bool,
}

/// Card and asset persistence.
///
/// Failures leave in-memory state untouched; callers surface them as
/// notifications and abort the operation.
pub trait CardStore {
    /// Upsert by id; an empty id gets a fresh one assigned
    fn save_card(&mut self, card: SavedCard) -> Result<SaveReceipt, StoreError>;

    /// Every stored card, most recently updated first
    fn get_cards(&self) -> Result<Vec<SavedCard>, StoreError>;

    /// Remove a card; deleting an unknown id is not an error
    fn delete_card(&mut self, id: &str) -> Result<(), StoreError>;

    /// Decode and store a base64 data-URI asset, deduplicating by content
    fn save_asset(&mut self, filename: &str, data_uri: &str) -> Result<StoredAsset, StoreError>;
}

pub(crate) fn ensure_card_id(card: &mut SavedCard) {
    if card.id.is_empty() {
        card.id = ulid::Ulid::new().to_string();
    }
}
