use bit_vec::BitVec;
use tracing::debug;

use crate::bloom::base::Membership;
use crate::bloom::hash::{bit_positions, DEFAULT_SEED};
use crate::error::FilterError;
use crate::params::{compute_parameters, FilterParams};

/// Classic single-writer Bloom filter.
///
/// Membership tests are one-sided: `contains` never reports false for a
/// value that was added, and may report true for one that was not, with
/// probability bounded by the sizing from
/// [`compute_parameters`](crate::compute_parameters). Bits are only ever
/// set, never cleared, so a positive answer for an inserted value holds
/// forever. There is no deletion and no resizing; a filter that outgrows
/// its capacity budget must be rebuilt from the original element set.
///
/// Probe positions come from seeded XXH3-64 double hashing; two filters
/// agree on a value's positions only when they share the bit count, probe
/// count and seed.
///
/// # Thread safety
///
/// `add` takes `&mut self`, so the borrow checker enforces a single writer.
/// Shared references only allow `contains`, which any number of threads may
/// call at once. For concurrent writers use
/// [`ConcurrentBloomFilter`](crate::ConcurrentBloomFilter).
#[derive(Debug, Clone)]
pub struct BloomFilter {
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
    inserted: u64,
    storage: BitVec,
}

impl BloomFilter {
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
        Ok(Self {
            m: bits,
            k: hashes,
            seed,
            capacity: None,
            target_rate: None,
            inserted: 0,
            storage: BitVec::from_elem(bits as usize, false),
        })
    }

    /// Sizes a filter for `expected_items` elements at `fp_rate` and builds
    /// it. The budget stays readable through [`capacity`](Self::capacity)
    /// and [`target_fp_rate`](Self::target_fp_rate).
    pub fn from_capacity(expected_items: u64, fp_rate: f64) -> Result<Self, FilterError> {
        let FilterParams { bits, hashes } = compute_parameters(expected_items, fp_rate)?;
        debug!(bits, hashes, expected_items, fp_rate, "sized filter from capacity budget");
        let mut filter = Self::new(bits, hashes)?;
        filter.capacity = Some(expected_items);
        filter.target_rate = Some(fp_rate);
        Ok(filter)
    }

    /// Inserts `value`. Afterwards `contains(value)` returns true, forever.
    /// Re-inserting an already present value leaves the bit array unchanged.
    pub fn add(&mut self, value: &[u8]) {
        for idx in bit_positions(value, self.seed, self.k, self.m) {
            self.storage.set(idx as usize, true);
        }
        self.inserted += 1;
    }

    /// Tests whether `value` was possibly inserted. False means definitely
    /// not; true may be a false positive.
    pub fn contains(&self, value: &[u8]) -> bool {
        for idx in bit_positions(value, self.seed, self.k, self.m) {
            if self.storage.get(idx as usize) == Some(false) {
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
        self.inserted
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

impl Membership for BloomFilter {
    fn contains(&self, value: &[u8]) -> bool {
        BloomFilter::contains(self, value)
    }

    fn bit_count(&self) -> u64 {
        self.m
    }

    fn hash_count(&self) -> u32 {
        self.k
    }

    fn approx_inserted(&self) -> u64 {
        self.inserted
    }
}
