use xxhash_rust::xxh3::xxh3_64_with_seed;

/// Seed used when the caller does not pick one.
pub(crate) const DEFAULT_SEED: u64 = 0;

// The second base hash runs over the same bytes under a shifted seed, so a
// single pass over the input feeds all k probes.
const SECOND_HASH_OFFSET: u64 = 64;

/// Kirsch-Mitzenmacher double hashing: index_i = (h1 + i*h2) mod m for
/// i in 0..k, with h1 and h2 seeded XXH3-64 values.
///
/// Equal bytes under an equal seed always yield the same index set; that is
/// the filter's reproducibility contract.
pub(crate) fn bit_positions(
    value: &[u8],
    seed: u64,
    hashes: u32,
    bits: u64,
) -> impl Iterator<Item = u64> {
    let h1 = xxh3_64_with_seed(value, seed);
    let h2 = xxh3_64_with_seed(value, seed.wrapping_add(SECOND_HASH_OFFSET));
    (0..u64::from(hashes)).map(move |i| h1.wrapping_add(i.wrapping_mul(h2)) % bits)
}
