//! String-id -> Hash32 mapping and convenience helpers.

use crate::crypto::blake256::Blake256;
use crate::crypto::hash::hash_labeled;
use crate::crypto::keccak::Keccak256;

/// Ids accepted by [`hash32_by_id`].
pub const SUPPORTED_HASH_IDS: [&str; 2] = ["keccak256", "blake256"];

fn normalize(id: &str) -> String {
    id.trim().to_ascii_lowercase().replace('-', "")
}

/// Return H(label || data) for the given hash id; an empty label hashes `data` alone.
///
/// Supported ids: "keccak256", "blake256".
pub fn hash32_by_id(id: &str, label: &str, data: &[u8]) -> Option<[u8; 32]> {
    match normalize(id).as_str() {
        "keccak256" => Some(hash_labeled::<Keccak256>(label, data)),
        "blake256" => Some(hash_labeled::<Blake256>(label, data)),
        _ => None,
    }
}
