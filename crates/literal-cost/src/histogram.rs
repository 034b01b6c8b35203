use core::fmt;

/// Number of distinct literal values.
pub const ALPHABET_SIZE: usize = 256;

/// `log2(v)`, with `log2(0)` defined as 0.
#[inline]
#[allow(clippy::cast_precision_loss)]
pub(crate) fn log2_count(v: usize) -> f64 {
    if v == 0 { 0.0 } else { libm::log2(v as f64) }
}

/// Byte occurrence counts over the current sliding window.
///
/// `total()` always equals the sum of the buckets.
#[derive(Clone, PartialEq, Eq)]
pub struct Histogram {
    buckets: [usize; ALPHABET_SIZE],
    total: usize,
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            buckets: [0; ALPHABET_SIZE],
            total: 0,
        }
    }
}

impl Histogram {
    /// Empty histogram.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Admits one occurrence of `byte`.
    #[inline]
    pub fn add(&mut self, byte: u8) {
        self.buckets[usize::from(byte)] += 1;
        self.total += 1;
    }

    /// Expires one occurrence of `byte`.
    ///
    /// Expiring a byte that was never admitted is a logic error; it panics in
    /// debug builds and is ignored in release builds.
    #[inline]
    pub fn remove(&mut self, byte: u8) {
        let slot = &mut self.buckets[usize::from(byte)];
        debug_assert!(*slot > 0, "expired byte {byte:#04x} absent from histogram");
        if *slot > 0 {
            *slot -= 1;
            self.total -= 1;
        }
    }

    /// Occurrences of `byte`.
    #[inline]
    #[must_use]
    pub fn count(&self, byte: u8) -> usize {
        self.buckets[usize::from(byte)]
    }

    /// Window population.
    #[inline]
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Resets every bucket to zero.
    pub fn clear(&mut self) {
        self.buckets = [0; ALPHABET_SIZE];
        self.total = 0;
    }

    /// Negative log-probability of `byte` in bits.
    ///
    /// The count is clamped to at least 1, so a byte absent from the window
    /// costs `log2(total)` instead of infinity.
    #[inline]
    #[must_use]
    pub fn bit_cost(&self, byte: u8) -> f64 {
        log2_count(self.total) - log2_count(self.count(byte).max(1))
    }

    /// Debug check that the population matches the bucket sum.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        self.buckets.iter().sum::<usize>() == self.total
    }
}

impl fmt::Debug for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let distinct = self.buckets.iter().filter(|&&c| c > 0).count();
        f.debug_struct("Histogram")
            .field("total", &self.total)
            .field("distinct", &distinct)
            .finish()
    }
}
