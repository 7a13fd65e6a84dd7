use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::bloom::base::Membership;
use crate::bloom::hash::{bit_positions, DEFAULT_SEED};
use crate::error::FilterError;
use crate::params::{compute_parameters, FilterParams};

/// Bloom filter safe for concurrent insert and query.
///
/// Same membership semantics as [`BloomFilter`](crate::BloomFilter), but the
/// bit array is a flat run of words updated with atomic OR, so `add` takes
/// `&self` and any mix of threads may insert and query at once without a
/// lock.
///
/// Inserts publish each bit with `Release` and queries load with `Acquire`.
/// A query racing an in-flight insert can still miss bits that insert has
/// not published yet; that transient false negative is confined to the
/// value currently being inserted. Values whose `add` returned before the
/// query began are always found.
#[derive(Debug)]
pub struct ConcurrentBloomFilter {
    // number of bits in the array
    m: u64,
    // number of hash probes per element
    k: u32,
    // base hash seed
    seed: u64,
    // capacity and rate budget the sizing came from, when derived
    capacity: Option<u64>,
    target_rate: Option<f64>,
    // add calls so far, diagnostics only
    inserted: AtomicU64,
    // ceil(m / 64) words, little end of each word first
    words: Box<[AtomicU64]>,
}

impl ConcurrentBloomFilter {
    /// Creates a filter with an explicit bit count and probe count under
    /// the default seed.
    pub fn new(bits: u64, hashes: u32) -> Result<Self, FilterError> {
        Self::with_seed(bits, hashes, DEFAULT_SEED)
    }

    /// Creates a filter with an explicit hash seed.
    pub fn with_seed(bits: u64, hashes: u32, seed: u64) -> Result<Self, FilterError> {
        if bits == 0 {
            return Err(FilterError::InvalidBitCount(bits));
        }
        if hashes == 0 {
            return Err(FilterError::InvalidHashCount(hashes));
        }
        let words = (0..bits.div_ceil(64)).map(|_| AtomicU64::new(0)).collect();
        Ok(Self {
            m: bits,
            k: hashes,
            seed,
            capacity: None,
            target_rate: None,
            inserted: AtomicU64::new(0),
            words,
        })
    }

    /// Sizes a filter for `expected_items` elements at `fp_rate` and builds
    /// it.
    pub fn from_capacity(expected_items: u64, fp_rate: f64) -> Result<Self, FilterError> {
        let FilterParams { bits, hashes } = compute_parameters(expected_items, fp_rate)?;
        debug!(bits, hashes, expected_items, fp_rate, "sized filter from capacity budget");
        let mut filter = Self::new(bits, hashes)?;
        filter.capacity = Some(expected_items);
        filter.target_rate = Some(fp_rate);
        Ok(filter)
    }

    /// Inserts `value`. Afterwards `contains(value)` returns true, forever.
    /// Safe to call from any number of threads at once.
    pub fn add(&self, value: &[u8]) {
        for idx in bit_positions(value, self.seed, self.k, self.m) {
            let word = (idx / 64) as usize;
            let mask = 1u64 << (idx % 64);
            self.words[word].fetch_or(mask, Ordering::Release);
        }
        self.inserted.fetch_add(1, Ordering::Relaxed);
    }

    /// Tests whether `value` was possibly inserted. False means definitely
    /// not; true may be a false positive.
    pub fn contains(&self, value: &[u8]) -> bool {
        for idx in bit_positions(value, self.seed, self.k, self.m) {
            let word = (idx / 64) as usize;
            let mask = 1u64 << (idx % 64);
            if self.words[word].load(Ordering::Acquire) & mask == 0 {
                return false;
            }
        }
        true
    }

    /// Number of bits backing the filter (m).
    pub fn bit_count(&self) -> u64 {
        self.m
    }

    /// Number of hash probes per element (k).
    pub fn hash_count(&self) -> u32 {
        self.k
    }

    /// The base hash seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of `add` calls so far.
    pub fn approx_inserted(&self) -> u64 {
        self.inserted.load(Ordering::Relaxed)
    }

    /// The capacity budget the sizing came from, when the filter was built
    /// via [`from_capacity`](Self::from_capacity).
    pub fn capacity(&self) -> Option<u64> {
        self.capacity
    }

    /// The false positive budget the sizing came from, when the filter was
    /// built via [`from_capacity`](Self::from_capacity).
    pub fn target_fp_rate(&self) -> Option<f64> {
        self.target_rate
    }
}

impl Membership for ConcurrentBloomFilter {
    fn contains(&self, value: &[u8]) -> bool {
        ConcurrentBloomFilter::contains(self, value)
    }

    fn bit_count(&self) -> u64 {
        self.m
    }

    fn hash_count(&self) -> u32 {
        self.k
    }

    fn approx_inserted(&self) -> u64 {
        self.inserted.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::bloom::standard::BloomFilter;

    #[test]
    fn simple_check() {
        let bf = ConcurrentBloomFilter::new(100, 3).unwrap();
        bf.add(b"apple");
        bf.add(b"banana");

        assert!(bf.contains(b"apple"), "stored value is not found!");
        assert!(bf.contains(b"banana"), "stored value is not found!");
        assert!(!bf.contains(b"cherry"), "not stored value is found!");
    }

    #[test]
    fn rejects_invalid_dimensions() {
        assert_eq!(
            ConcurrentBloomFilter::new(0, 3).unwrap_err(),
            FilterError::InvalidBitCount(0)
        );
        assert_eq!(
            ConcurrentBloomFilter::new(100, 0).unwrap_err(),
            FilterError::InvalidHashCount(0)
        );
    }

    #[test]
    fn word_rounding_keeps_odd_sizes_valid() {
        // 100 bits lands mid-word; probes near the top must stay in range
        let bf = ConcurrentBloomFilter::new(100, 5).unwrap();
        assert_eq!(bf.words.len(), 2);
        for i in 0u32..200 {
            bf.add(&i.to_be_bytes());
        }
        for i in 0u32..200 {
            assert!(bf.contains(&i.to_be_bytes()));
        }
    }

    #[test]
    fn agrees_with_the_single_writer_filter() {
        let shared = ConcurrentBloomFilter::with_seed(4096, 4, 9).unwrap();
        let mut local = BloomFilter::with_seed(4096, 4, 9).unwrap();

        for value in [&b"apple"[..], b"banana", b"", b"cherry"] {
            shared.add(value);
            local.add(value);
        }
        for probe in [&b"apple"[..], b"banana", b"", b"cherry", b"durian", b"elderberry"] {
            assert_eq!(shared.contains(probe), local.contains(probe));
        }
    }

    #[test]
    fn concurrent_inserts_are_all_visible() {
        let bf = ConcurrentBloomFilter::from_capacity(4000, 0.01).unwrap();

        thread::scope(|s| {
            for t in 0..4 {
                let bf = &bf;
                s.spawn(move || {
                    for i in 0..1000 {
                        bf.add(format!("item-{t}-{i}").as_bytes());
                    }
                });
            }
        });

        for t in 0..4 {
            for i in 0..1000 {
                assert!(
                    bf.contains(format!("item-{t}-{i}").as_bytes()),
                    "stored value is not found!"
                );
            }
        }
        assert_eq!(bf.approx_inserted(), 4000);
    }

    #[test]
    fn queries_run_alongside_inserts() {
        let bf = ConcurrentBloomFilter::from_capacity(10_000, 0.01).unwrap();
        bf.add(b"committed before the race");

        thread::scope(|s| {
            let writer = &bf;
            s.spawn(move || {
                for i in 0..5000u32 {
                    writer.add(&i.to_be_bytes());
                }
            });
            let reader = &bf;
            s.spawn(move || {
                for _ in 0..5000 {
                    // a fully committed insert must never flicker
                    assert!(reader.contains(b"committed before the race"));
                }
            });
        });
    }
}
