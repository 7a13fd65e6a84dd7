/// Read-side surface shared by the filter variants.
pub trait Membership {
    /// True when `value` was possibly inserted; false means definitely not.
    fn contains(&self, value: &[u8]) -> bool;

    /// Number of bits backing the filter (m).
    fn bit_count(&self) -> u64;

    /// Number of hash probes per element (k).
    fn hash_count(&self) -> u32;

    /// Number of `add` calls so far. Diagnostic only; repeated inserts of
    /// the same value are counted every time.
    fn approx_inserted(&self) -> u64;

    /// Expected false positive probability at the current load,
    /// (1 - e^(-kn/m))^k with n taken from [`approx_inserted`].
    ///
    /// [`approx_inserted`]: Membership::approx_inserted
    fn estimated_fp_rate(&self) -> f64 {
        let k = f64::from(self.hash_count());
        let n = self.approx_inserted() as f64;
        let m = self.bit_count() as f64;
        (1.0 - (-k * n / m).exp()).powf(k)
    }
}
