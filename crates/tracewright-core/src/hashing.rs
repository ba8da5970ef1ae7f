//! Shared BLAKE3 helpers for content addressing (spec.md §4.C10).

use crate::types::Fingerprint;

/// Hash arbitrary bytes into a 128-bit `Fingerprint` by truncating a BLAKE3
/// digest, matching spec.md §4.C10's "any 128-bit collision-resistant
/// digest (e.g. BLAKE3/SHA-2 truncated)".
pub fn fingerprint_bytes(bytes: &[u8]) -> Fingerprint {
    let digest = blake3::hash(bytes);
    let mut out = [0u8; 16];
    out.copy_from_slice(&digest.as_bytes()[..16]);
    Fingerprint(out)
}

/// A fast, non-cryptographic 64-bit content hash for the in-memory parse
/// cache key (mirrors `drift-analysis::scanner::hasher::hash_content`,
/// which keys its parse cache on the same kind of quick content digest).
pub fn hash_content_u64(bytes: &[u8]) -> u64 {
    let digest = blake3::hash(bytes);
    u64::from_le_bytes(digest.as_bytes()[..8].try_into().unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_deterministic() {
        let a = fingerprint_bytes(b"hello world");
        let b = fingerprint_bytes(b"hello world");
        assert_eq!(a, b);
    }

    #[test]
    fn fingerprint_differs_on_different_input() {
        let a = fingerprint_bytes(b"hello world");
        let b = fingerprint_bytes(b"hello there");
        assert_ne!(a, b);
    }
}
