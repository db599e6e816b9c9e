//! Redb table definitions and region key encoding.
//!
//! Redb table names are static, so logical regions are encoded into the keys
//! of a single physical table as `<region><NUL><key>`.

use redb::TableDefinition;

use crate::engine::{StorageError, StorageResult};

/// The physical table holding every region's entries.
pub const DATA_TABLE: TableDefinition<'static, &[u8], &[u8]> =
    TableDefinition::new("tagsearch_data");

/// Registered region names, mapped to their registration sequence number.
pub const REGION_TABLE: TableDefinition<'static, &str, u64> =
    TableDefinition::new("tagsearch_regions");

/// Separator byte between the region name and the key.
pub const KEY_SEPARATOR: u8 = 0x00;

/// Check that `region` can be used as a key prefix.
pub fn validate_region_name(region: &str) -> StorageResult<()> {
    if region.is_empty() || region.as_bytes().contains(&KEY_SEPARATOR) {
        return Err(StorageError::InvalidRegionName(region.to_owned()));
    }
    Ok(())
}

/// Encode a region name and key into a physical key.
pub fn encode_key(region: &str, key: &[u8]) -> Vec<u8> {
    let mut encoded = Vec::with_capacity(region.len() + 1 + key.len());
    encoded.extend_from_slice(region.as_bytes());
    encoded.push(KEY_SEPARATOR);
    encoded.extend_from_slice(key);
    encoded
}

/// Strip the region prefix from a physical key.
///
/// Returns `None` if the key does not belong to `region`.
pub fn decode_key<'k>(region: &str, encoded: &'k [u8]) -> Option<&'k [u8]> {
    let rest = encoded.strip_prefix(region.as_bytes())?;
    rest.strip_prefix(&[KEY_SEPARATOR])
}

/// The first physical key that could belong to `region`.
pub fn region_start_key(region: &str) -> Vec<u8> {
    encode_key(region, &[])
}

/// The first physical key past the end of `region`.
pub fn region_end_key(region: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(region.len() + 1);
    key.extend_from_slice(region.as_bytes());
    key.push(KEY_SEPARATOR + 1);
    key
}

/// The smallest physical key strictly greater than `encoded`.
pub fn successor_key(encoded: &[u8]) -> Vec<u8> {
    let mut key = Vec::with_capacity(encoded.len() + 1);
    key.extend_from_slice(encoded);
    key.push(0x00);
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_key() {
        let encoded = encode_key("images", b"cat.jpg");
        assert_eq!(decode_key("images", &encoded), Some(&b"cat.jpg"[..]));
        assert_eq!(decode_key("other", &encoded), None);
    }

    #[test]
    fn test_empty_key_and_nul_bytes_in_key() {
        let encoded = encode_key("images", b"");
        assert_eq!(decode_key("images", &encoded), Some(&b""[..]));

        let encoded = encode_key("images", b"a\0b");
        assert_eq!(decode_key("images", &encoded), Some(&b"a\0b"[..]));
    }

    #[test]
    fn test_prefix_region_does_not_match() {
        // "image" is a prefix of "images" but must not claim its keys.
        let encoded = encode_key("images", b"k");
        assert_eq!(decode_key("image", &encoded), None);
    }

    #[test]
    fn test_region_range_keys() {
        let start = region_start_key("images");
        let end = region_end_key("images");

        let inside = encode_key("images", &[0xFF, 0xFF]);
        assert!(inside >= start && inside < end);

        let other = encode_key("images2", b"a");
        assert!(other >= end);
        let shorter = encode_key("image", &[0xFF]);
        assert!(shorter < start);
    }

    #[test]
    fn test_successor_key() {
        let key = encode_key("r", b"a");
        let next = successor_key(&key);
        assert!(next > key);
        assert!(next < encode_key("r", b"a\x01"));
    }

    #[test]
    fn test_validate_region_name() {
        assert!(validate_region_name("images").is_ok());
        assert!(matches!(validate_region_name(""), Err(StorageError::InvalidRegionName(_))));
        assert!(matches!(validate_region_name("a\0b"), Err(StorageError::InvalidRegionName(_))));
    }
}
