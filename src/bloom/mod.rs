mod base;
mod concurrent;
mod hash;
mod standard;

pub use self::base::Membership;
pub use self::concurrent::ConcurrentBloomFilter;
pub use self::standard::BloomFilter;
