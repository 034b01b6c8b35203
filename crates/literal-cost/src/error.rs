use thiserror::Error;

/// Contract violations caught by the checked constructors.
///
/// The raw entry point [`estimate_literal_costs`](crate::estimate_literal_costs)
/// never returns these; it trusts the caller's ring-buffer bookkeeping.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowError {
    /// `mask + 1` is zero or not a power of two.
    #[error("ring capacity {capacity} is not a power of two")]
    CapacityNotPowerOfTwo {
        /// The rejected capacity (`mask + 1`, saturating).
        capacity: usize,
    },
    /// The backing slice is shorter than `mask + 1`.
    #[error("ring buffer holds {actual} bytes but capacity is {capacity}")]
    BufferTooShort {
        /// Required capacity.
        capacity: usize,
        /// Length of the backing slice.
        actual: usize,
    },
    /// The window is longer than the ring itself.
    #[error("window length {len} exceeds ring capacity {capacity}")]
    LengthExceedsCapacity {
        /// Requested window length.
        len: usize,
        /// Ring capacity.
        capacity: usize,
    },
    /// The cost output cannot hold one value per window byte.
    #[error("cost output holds {actual} slots but the window has {needed} bytes")]
    OutputTooShort {
        /// Window length.
        needed: usize,
        /// Length of the output slice.
        actual: usize,
    },
}
