//! BLAKE3-based text keys for the embedding cache.
//!
//! Static corpus texts are keyed by their full 256-bit hash so the cache never
//! confuses two distinct strings; the truncated 64-bit form exists for logging
//! and quick fingerprints only.

/// 32-byte key for a corpus text. Deterministic; whitespace-sensitive.
#[inline]
pub fn hash_text_key(text: &str) -> [u8; 32] {
    *blake3::hash(text.as_bytes()).as_bytes()
}

/// Computes a 64-bit fingerprint of the input, truncated from BLAKE3's 256
/// bits. Collisions are tolerable here: the fingerprint is only used for log
/// correlation, never for cache addressing.
#[inline]
pub fn hash_to_u64(data: &[u8]) -> u64 {
    let hash = blake3::hash(data);
    let bytes: [u8; 8] = hash.as_bytes()[0..8]
        .try_into()
        .expect("BLAKE3 always produces at least 8 bytes");
    u64::from_le_bytes(bytes)
}
