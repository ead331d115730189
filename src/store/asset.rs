//! Asset decoding and content-hash naming

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use sha2::{Digest, Sha256};

use super::StoreError;

/// A decoded upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAsset {
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Split and decode a `data:<mime>;base64,<payload>` URI. The payload may
/// contain whitespace or line breaks.
pub fn decode_data_uri(data_uri: &str) -> Result<DecodedAsset, StoreError> {
    let rest = data_uri
        .strip_prefix("data:")
        .ok_or(StoreError::InvalidDataUri)?;
    let (mime, payload) = rest
        .split_once(";base64,")
        .ok_or(StoreError::InvalidDataUri)?;
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD.decode(compact.as_bytes())?;
    Ok(DecodedAsset {
        mime: mime.to_string(),
        bytes,
    })
}

/// Stable filename derived from content.
///
/// The base name is sanitized, any previous 12-hex hash suffix is stripped
/// so re-uploads do not stack suffixes, and 12 hex characters of the
/// content hash are appended. Identical content always maps to the same
/// name, which is what makes deduplication a filename check.
pub fn hashed_asset_name(filename: &str, bytes: &[u8]) -> String {
    let (stem, ext) = match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, format!(".{ext}")),
        _ => (filename, ".png".to_string()),
    };

    let mut base: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if let Some(idx) = base.rfind('_') {
        let tail = &base[idx + 1..];
        if tail.len() == 12 && tail.chars().all(|c| c.is_ascii_hexdigit()) {
            base.truncate(idx);
        }
    }

    let digest = Sha256::digest(bytes);
    let mut hash = String::with_capacity(12);
    for byte in digest.iter().take(6) {
        hash.push_str(&format!("{byte:02x}"));
    }

    format!("{base}_{hash}{ext}")
}
