//! Cosine similarity and top-k selection over embedding vectors.
//!
//! Corpus vectors are held as `f16` (half the memory of `f32` at no practical
//! loss for similarity ranking); query vectors arrive as `f32` straight from
//! the encoder, so the mixed-precision variant avoids a conversion pass.

#[cfg(test)]
mod tests;

use half::f16;
use std::cmp::Ordering;

/// A candidate scored by the similarity stage.
///
/// The field is named `similarity` deliberately: the rerank stage produces
/// [`RankedCandidate`](crate::recommend::RankedCandidate) with a
/// `sentiment_gap` instead, and the two scores must never be conflated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate {
    /// Index into the caller's candidate list.
    pub index: usize,
    /// Cosine similarity in `[-1, 1]`.
    pub similarity: f32,
}

/// Cosine similarity between two `f32` vectors.
///
/// Returns `0.0` for mismatched lengths, empty inputs, or zero-norm vectors.
#[inline]
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a_sq, norm_b_sq) =
        a.iter()
            .zip(b.iter())
            .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (&av, &bv)| {
                (dot + av * bv, na + av * av, nb + bv * bv)
            });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Cosine similarity between an `f16` corpus vector and an `f32` query vector.
#[inline]
pub fn cosine_f16(a: &[f16], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a_sq = 0.0f32;
    let mut norm_b_sq = 0.0f32;

    for (av_f16, &bv) in a.iter().zip(b.iter()) {
        let av = av_f16.to_f32();
        dot += av * bv;
        norm_a_sq += av * av;
        norm_b_sq += bv * bv;
    }

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Scores every candidate against the query and returns the best `k`, sorted
/// by similarity descending.
///
/// Tie-break is stable: candidates with equal scores keep their input order
/// (first-seen wins). Empty candidate lists yield an empty result; `k` larger
/// than the candidate count yields all candidates.
pub fn top_k(query: &[f32], candidates: &[Vec<f16>], k: usize) -> Vec<ScoredCandidate> {
    let mut scored: Vec<ScoredCandidate> = candidates
        .iter()
        .enumerate()
        .map(|(index, vec)| ScoredCandidate {
            index,
            similarity: cosine_f16(vec, query),
        })
        .collect();

    // Stable sort: equal scores preserve original candidate order.
    scored.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(Ordering::Equal)
    });

    scored.truncate(k);
    scored
}

/// Converts an `f32` vector to the `f16` corpus representation.
pub fn to_f16_vec(values: &[f32]) -> Vec<f16> {
    values.iter().map(|&v| f16::from_f32(v)).collect()
}

/// Converts an `f16` corpus vector back to `f32`.
pub fn to_f32_vec(values: &[f16]) -> Vec<f32> {
    values.iter().map(|v| v.to_f32()).collect()
}
