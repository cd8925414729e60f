use xxhash_rust::xxh3::{Xxh3, xxh3_64_with_seed};

pub(crate) const EPS: f64 = 1e-9;

pub(crate) fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Deterministic pseudo-random ordering key for `index` under `seed`.
pub(crate) fn seeded_key(seed: u64, index: usize) -> u64 {
    xxh3_64_with_seed(&(index as u64).to_le_bytes(), seed)
}

/// Rank order of `n` items shuffled deterministically by `seed`.
///
/// `ranks[i]` is the position of item `i` in the shuffled order.
pub(crate) fn seeded_ranks(seed: u64, n: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&i| (seeded_key(seed, i), i));
    let mut ranks = vec![0; n];
    for (rank, &i) in order.iter().enumerate() {
        ranks[i] = rank;
    }
    ranks
}

/// Streaming content hash for frame snapshots.
pub(crate) struct Fingerprint(Xxh3);

impl Fingerprint {
    pub(crate) fn new() -> Self {
        Self(Xxh3::new())
    }

    pub(crate) fn write_u64(&mut self, v: u64) {
        self.0.update(&v.to_le_bytes());
    }

    /// Quantized to 1/1000 px so float noise does not defeat static-frame detection.
    pub(crate) fn write_f64(&mut self, v: f64) {
        self.write_u64((v * 1000.0).round() as i64 as u64);
    }

    pub(crate) fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.0.update(s.as_bytes());
    }

    pub(crate) fn finish(&self) -> u64 {
        self.0.digest()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
