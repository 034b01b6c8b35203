//! Read-only view over the caller's circular input buffer.
//!
//! The compressor keeps its input in a ring of `mask + 1` bytes (a power of
//! two) and hands us `(data, position, mask)`. Every read goes through
//! [`RingWindow::get`], which masks the absolute index, so a window may wrap
//! around the end of the ring without any copying.
//!
//! Invariants
//! - `offset < len` for every read made by this crate.
//! - `data.len() > mask` for windows built by [`RingWindow::new`]; windows built
//!   by [`RingWindow::from_slice`] only ever address `data[..len]`.

use core::fmt;

use crate::error::WindowError;

/// A logical run of `len` bytes starting at `position` in a circular buffer.
#[derive(Clone, Copy)]
pub struct RingWindow<'a> {
    data: &'a [u8],
    mask: usize,
    position: usize,
    len: usize,
}

impl<'a> RingWindow<'a> {
    /// Validates the ring contract and builds a window.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError`] when `mask + 1` is not a power of two, when
    /// `data` is shorter than `mask + 1`, or when `len` exceeds `mask + 1`.
    pub fn new(data: &'a [u8], mask: usize, position: usize, len: usize) -> Result<Self, WindowError> {
        let capacity = mask.checked_add(1).unwrap_or(usize::MAX);
        if !capacity.is_power_of_two() {
            return Err(WindowError::CapacityNotPowerOfTwo { capacity });
        }
        if data.len() < capacity {
            return Err(WindowError::BufferTooShort {
                capacity,
                actual: data.len(),
            });
        }
        if len > capacity {
            return Err(WindowError::LengthExceedsCapacity { len, capacity });
        }
        Ok(Self {
            data,
            mask,
            position,
            len,
        })
    }

    /// Builds a window without validation.
    ///
    /// The contract is checked with `debug_assert!` only; in release builds a
    /// breach surfaces as an indexing panic, never as an out-of-bounds read.
    #[must_use]
    pub fn new_unchecked(data: &'a [u8], mask: usize, position: usize, len: usize) -> Self {
        debug_assert!(
            mask.wrapping_add(1).is_power_of_two(),
            "mask + 1 must be a power of two"
        );
        debug_assert!(data.len() > mask, "ring buffer shorter than mask + 1");
        debug_assert!(len <= mask.wrapping_add(1), "window longer than ring");
        Self {
            data,
            mask,
            position,
            len,
        }
    }

    /// Treats a contiguous slice as a window starting at offset 0.
    #[must_use]
    pub fn from_slice(bytes: &'a [u8]) -> Self {
        Self {
            data: bytes,
            mask: bytes.len().next_power_of_two() - 1,
            position: 0,
            len: bytes.len(),
        }
    }

    /// Number of bytes in the window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the window is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Ring mask (`capacity - 1`).
    #[must_use]
    pub fn mask(&self) -> usize {
        self.mask
    }

    /// Absolute (unmasked) start position in the ring.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Byte at `offset` from the window start.
    #[inline]
    #[must_use]
    pub fn get(&self, offset: usize) -> u8 {
        debug_assert!(offset < self.len, "offset {offset} outside window of {}", self.len);
        self.data[self.position.wrapping_add(offset) & self.mask]
    }

    /// Byte `back` positions before `offset`, or 0 if that precedes the window
    /// start.
    #[inline]
    #[must_use]
    pub fn lookback(&self, offset: usize, back: usize) -> u8 {
        if offset < back {
            0
        } else {
            self.get(offset - back)
        }
    }

    /// Iterates the window bytes in position order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.len).map(move |i| self.get(i))
    }
}

impl fmt::Debug for RingWindow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingWindow")
            .field("position", &self.position)
            .field("len", &self.len)
            .field("capacity", &self.mask.wrapping_add(1))
            .finish_non_exhaustive()
    }
}
