use super::*;

fn f16s(values: &[f32]) -> Vec<f16> {
    to_f16_vec(values)
}

#[test]
fn test_cosine_identical_vectors() {
    let v = vec![0.5, -0.25, 1.0];
    let score = cosine(&v, &v);
    assert!((score - 1.0).abs() < 1e-6);
}

#[test]
fn test_cosine_orthogonal_vectors() {
    let a = vec![1.0, 0.0];
    let b = vec![0.0, 1.0];
    assert_eq!(cosine(&a, &b), 0.0);
}

#[test]
fn test_cosine_opposite_vectors() {
    let a = vec![1.0, 2.0];
    let b = vec![-1.0, -2.0];
    let score = cosine(&a, &b);
    assert!((score + 1.0).abs() < 1e-6);
}

#[test]
fn test_cosine_range_bounds() {
    let a = vec![0.3, -0.7, 0.1, 0.9];
    let b = vec![-0.2, 0.4, 0.8, -0.5];
    let score = cosine(&a, &b);
    assert!((-1.0..=1.0).contains(&score));
}

#[test]
fn test_cosine_mismatched_lengths() {
    let a = vec![1.0, 2.0];
    let b = vec![1.0, 2.0, 3.0];
    assert_eq!(cosine(&a, &b), 0.0);
}

#[test]
fn test_cosine_empty_vectors() {
    assert_eq!(cosine(&[], &[]), 0.0);
}

#[test]
fn test_cosine_zero_norm() {
    let a = vec![0.0, 0.0];
    let b = vec![1.0, 1.0];
    assert_eq!(cosine(&a, &b), 0.0);
}

#[test]
fn test_cosine_f16_matches_f32() {
    let a = vec![0.25, -0.5, 0.75, 0.125];
    let b = vec![0.1, 0.9, -0.3, 0.6];

    let f32_score = cosine(&a, &b);
    let f16_score = cosine_f16(&f16s(&a), &b);

    // f16 quantization of exactly-representable values is lossless here.
    assert!((f32_score - f16_score).abs() < 1e-3);
}

#[test]
fn test_top_k_orders_descending() {
    let query = vec![1.0, 0.0];
    let candidates = vec![
        f16s(&[0.0, 1.0]),  // 0.0
        f16s(&[1.0, 0.0]),  // 1.0
        f16s(&[1.0, 1.0]),  // ~0.707
    ];

    let result = top_k(&query, &candidates, 3);

    assert_eq!(result.len(), 3);
    assert_eq!(result[0].index, 1);
    assert_eq!(result[1].index, 2);
    assert_eq!(result[2].index, 0);
}

#[test]
fn test_top_k_truncates_to_k() {
    let query = vec![1.0, 0.0];
    let candidates = vec![
        f16s(&[1.0, 0.0]),
        f16s(&[0.5, 0.5]),
        f16s(&[0.0, 1.0]),
        f16s(&[1.0, 0.1]),
    ];

    let result = top_k(&query, &candidates, 2);
    assert_eq!(result.len(), 2);
}

#[test]
fn test_top_k_k_exceeds_candidates() {
    let query = vec![1.0, 0.0];
    let candidates = vec![f16s(&[1.0, 0.0])];

    let result = top_k(&query, &candidates, 5);
    assert_eq!(result.len(), 1);
}

#[test]
fn test_top_k_empty_candidates() {
    let query = vec![1.0, 0.0];
    let result = top_k(&query, &[], 3);
    assert!(result.is_empty());
}

#[test]
fn test_top_k_stable_tie_break() {
    let query = vec![1.0, 0.0];
    // Three identical candidates: equal scores must preserve input order.
    let candidates = vec![
        f16s(&[2.0, 0.0]),
        f16s(&[2.0, 0.0]),
        f16s(&[2.0, 0.0]),
    ];

    let result = top_k(&query, &candidates, 3);

    assert_eq!(result[0].index, 0);
    assert_eq!(result[1].index, 1);
    assert_eq!(result[2].index, 2);
}

#[test]
fn test_f16_round_trip() {
    let original = vec![0.5, -0.25, 0.0, 1.0];
    let round_tripped = to_f32_vec(&to_f16_vec(&original));
    assert_eq!(original, round_tripped);
}
