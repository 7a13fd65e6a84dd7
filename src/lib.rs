//! Space-efficient probabilistic set membership (Bloom filters).
//!
//! A Bloom filter answers "was this value inserted?" with one-sided error:
//! a negative answer is always right, a positive answer is wrong with a
//! probability fixed by the filter's sizing. [`compute_parameters`] turns a
//! capacity and error budget into that sizing, [`BloomFilter`] is the
//! single-writer filter and [`ConcurrentBloomFilter`] the lock-free variant
//! for shared writers. Hashing is seeded XXH3-64 with probe positions
//! derived by double hashing, so equal bytes under an equal seed always map
//! to the same bits.
//!
//! ```
//! use bloomsieve::BloomFilter;
//!
//! // sized for an English dictionary at a 1% false positive rate
//! let mut words = BloomFilter::from_capacity(236_736, 0.01)?;
//! words.add(b"california");
//!
//! assert!(words.contains(b"california"));
//! # Ok::<(), bloomsieve::FilterError>(())
//! ```

mod bloom;
mod error;
mod params;

pub use crate::bloom::{BloomFilter, ConcurrentBloomFilter, Membership};
pub use crate::error::FilterError;
pub use crate::params::{compute_parameters, FilterParams};
