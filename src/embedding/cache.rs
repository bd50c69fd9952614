//! Precomputed embedding cache for static corpus texts.
//!
//! Built once at load time over every static text (intent patterns, crime
//! match texts, recommendation strings) and read-only afterwards: no eviction,
//! no staleness, because the corpus is fixed for the process lifetime. Query
//! text is embedded on demand and never cached — it is unbounded and not
//! reused.

use std::collections::HashMap;

use half::f16;

use crate::hashing::hash_text_key;
use crate::similarity::to_f16_vec;

use super::encoder::TextEncoder;
use super::error::EmbeddingError;

/// Read-only text → `f16` vector map keyed by BLAKE3 text hash.
#[derive(Debug, Default)]
pub struct EmbeddingCache {
    entries: HashMap<[u8; 32], Vec<f16>>,
}

impl EmbeddingCache {
    /// Embeds every distinct text once and stores the result. Duplicate texts
    /// collapse onto the same key, so each static item has exactly one cached
    /// vector.
    pub fn build(encoder: &TextEncoder, texts: &[&str]) -> Result<Self, EmbeddingError> {
        let mut entries = HashMap::with_capacity(texts.len());

        for &text in texts {
            let key = hash_text_key(text);
            if entries.contains_key(&key) {
                continue;
            }
            let vector = encoder.embed(text)?;
            entries.insert(key, to_f16_vec(&vector));
        }

        Ok(Self { entries })
    }

    /// Looks up the cached vector for a text, if it was part of the static
    /// corpus.
    pub fn get(&self, text: &str) -> Option<&[f16]> {
        self.entries.get(&hash_text_key(text)).map(|v| v.as_slice())
    }

    pub fn contains(&self, text: &str) -> bool {
        self.entries.contains_key(&hash_text_key(text))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::to_f32_vec;

    #[test]
    fn test_build_caches_every_distinct_text() {
        let encoder = TextEncoder::stub();
        let cache = EmbeddingCache::build(
            &encoder,
            &["Install a deadbolt.", "Join a neighborhood watch."],
        )
        .expect("build");

        assert_eq!(cache.len(), 2);
        assert!(cache.contains("Install a deadbolt."));
        assert!(cache.contains("Join a neighborhood watch."));
        assert!(!cache.contains("Call the police."));
    }

    #[test]
    fn test_build_collapses_duplicates() {
        let encoder = TextEncoder::stub();
        let cache = EmbeddingCache::build(
            &encoder,
            &["Lock your doors.", "Lock your doors.", "Lock your doors."],
        )
        .expect("build");

        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cached_vector_matches_fresh_encoding() {
        let encoder = TextEncoder::stub();
        let cache = EmbeddingCache::build(&encoder, &["report the theft"]).expect("build");

        let cached = to_f32_vec(cache.get("report the theft").expect("cached"));
        let fresh = encoder.embed("report the theft").expect("embed");

        // f16 quantization is the only difference between the two.
        for (c, f) in cached.iter().zip(fresh.iter()) {
            assert!((c - f).abs() < 1e-2);
        }
    }

    #[test]
    fn test_empty_build() {
        let encoder = TextEncoder::stub();
        let cache = EmbeddingCache::build(&encoder, &[]).expect("build");
        assert!(cache.is_empty());
    }
}
