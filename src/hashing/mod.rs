use blake3::Hasher;

/// Computes the 32-byte cache key for one embedding request.
///
/// The tier and the usage prefix both participate in the key, so the same text
/// embedded as a query, as a passage, or by a different tier occupies separate
/// cache slots. A `|` separator prevents ambiguity between adjacent fields.
#[inline]
pub fn hash_embedding_key(tier: &str, prefix: Option<&str>, text: &str) -> [u8; 32] {
    let mut hasher = Hasher::new();
    hasher.update(tier.as_bytes());
    hasher.update(b"|");
    if let Some(prefix) = prefix {
        hasher.update(prefix.as_bytes());
    }
    hasher.update(b"|");
    hasher.update(text.as_bytes());
    *hasher.finalize().as_bytes()
}

/// Derives `count` floats in `[0, 1)` from a 32-byte seed.
///
/// The BLAKE3 extendable output drives the stream, so the same seed always
/// yields the same values. Used for deterministic mock embeddings and for the
/// noise fallback policy, where reproducibility matters more than randomness.
#[inline]
pub fn keyed_unit_floats(seed: &[u8; 32], count: usize) -> Vec<f32> {
    let mut hasher = Hasher::new();
    hasher.update(seed);
    let mut reader = hasher.finalize_xof();

    let mut buf = [0u8; 4];
    (0..count)
        .map(|_| {
            reader.fill(&mut buf);
            (u32::from_le_bytes(buf) as f64 / (u32::MAX as f64 + 1.0)) as f32
        })
        .collect()
}
