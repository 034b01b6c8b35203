//! Text classifier: decides whether a window is mostly UTF-8 and how finely
//! the cost model should split its statistics by position inside multi-byte
//! sequences.
//!
//! Context classes
//! - 0: the byte starts a sequence (ASCII, lead byte) or follows a completed
//!   one.
//! - 1: the byte follows a lead byte (second byte of a sequence).
//! - 2: the byte follows the second byte of a three- or four-byte sequence.
//!
//! The class of a byte is a function of the two bytes before it only, so it is
//! recomputed on demand instead of being carried through the scan.

use crate::{options::EstimatorOptions, ring::RingWindow};

/// First code point above the Unicode range; invalid units are tagged
/// `INVALID_UNIT | byte`.
pub const INVALID_UNIT: u32 = 0x11_0000;

/// Number of context classes the UTF-8-aware model can distinguish.
pub const CONTEXT_CLASSES: usize = 3;

/// Context class of the byte that follows `current`, given the byte before it.
///
/// `cap` bounds the result, so `cap = 0` collapses every byte into class 0.
#[inline]
#[must_use]
pub fn next_context_class(previous: u8, current: u8, cap: usize) -> usize {
    if current < 0x80 {
        0
    } else if current >= 0xC0 {
        cap.min(1)
    } else if previous < 0xE0 {
        // continuation closing a two-byte sequence, or the last byte of a
        // longer one
        0
    } else {
        cap.min(2)
    }
}

/// Context class of the byte at `offset`, derived from its two predecessors
/// (read as 0 before the window start).
#[inline]
#[must_use]
pub fn context_class_at(window: &RingWindow<'_>, offset: usize, cap: usize) -> usize {
    next_context_class(window.lookback(offset, 2), window.lookback(offset, 1), cap)
}

/// One unit produced by the heuristic decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedUnit {
    /// Decoded scalar, or `INVALID_UNIT | byte` for a byte that starts no
    /// valid sequence.
    pub code_point: u32,
    /// Bytes consumed, 1 to 4.
    pub len: usize,
}

impl DecodedUnit {
    /// Whether the unit is a well-formed UTF-8 sequence.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.code_point < INVALID_UNIT
    }
}

/// Decodes the unit starting at `offset`, or `None` when `offset` is not
/// inside the window.
///
/// Sequences never extend past the end of the window. Overlong forms are
/// rejected; surrogate code points are not, since the result only feeds a
/// statistic.
#[must_use]
pub fn decode_unit(window: &RingWindow<'_>, offset: usize) -> Option<DecodedUnit> {
    let remaining = window.len().checked_sub(offset).filter(|&r| r > 0)?;
    let lead = u32::from(window.get(offset));
    let tail = |k: usize| {
        let b = window.get(offset + k);
        (b & 0xC0 == 0x80).then_some(u32::from(b & 0x3F))
    };

    if lead & 0x80 == 0 {
        return Some(DecodedUnit {
            code_point: lead,
            len: 1,
        });
    }
    if remaining > 1 && lead & 0xE0 == 0xC0 {
        if let Some(b1) = tail(1) {
            let code_point = ((lead & 0x1F) << 6) | b1;
            if code_point > 0x7F {
                return Some(DecodedUnit { code_point, len: 2 });
            }
        }
    }
    if remaining > 2 && lead & 0xF0 == 0xE0 {
        if let (Some(b1), Some(b2)) = (tail(1), tail(2)) {
            let code_point = ((lead & 0x0F) << 12) | (b1 << 6) | b2;
            if code_point > 0x7FF {
                return Some(DecodedUnit { code_point, len: 3 });
            }
        }
    }
    if remaining > 3 && lead & 0xF8 == 0xF0 {
        if let (Some(b1), Some(b2), Some(b3)) = (tail(1), tail(2), tail(3)) {
            let code_point = ((lead & 0x07) << 18) | (b1 << 12) | (b2 << 6) | b3;
            if code_point > 0xFFFF && code_point <= 0x10_FFFF {
                return Some(DecodedUnit { code_point, len: 4 });
            }
        }
    }
    Some(DecodedUnit {
        code_point: INVALID_UNIT | lead,
        len: 1,
    })
}

/// Iterates the decoded units of a window.
pub fn units<'w>(window: &'w RingWindow<'_>) -> impl Iterator<Item = DecodedUnit> + 'w {
    let mut offset = 0;
    core::iter::from_fn(move || {
        let unit = decode_unit(window, offset)?;
        offset += unit.len;
        Some(unit)
    })
}

/// Total byte length of the valid units in the window.
#[must_use]
pub fn valid_utf8_len(window: &RingWindow<'_>) -> usize {
    units(window).filter(|u| u.is_valid()).map(|u| u.len).sum()
}

/// Whether more than `min_fraction` of the window's bytes belong to valid
/// UTF-8 units. An empty window is never mostly UTF-8.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn is_mostly_utf8(window: &RingWindow<'_>, min_fraction: f64) -> bool {
    valid_utf8_len(window) as f64 > min_fraction * window.len() as f64
}

/// How many bytes of a window fall into each context class (cap 2).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContextCensus {
    /// Byte count per context class.
    pub counts: [usize; CONTEXT_CLASSES],
}

impl ContextCensus {
    /// Tallies the context class of every byte in the window.
    #[must_use]
    pub fn of(window: &RingWindow<'_>) -> Self {
        let mut counts = [0; CONTEXT_CLASSES];
        let mut previous = 0;
        for current in window.iter() {
            counts[next_context_class(previous, current, 2)] += 1;
            previous = current;
        }
        Self { counts }
    }

    /// Bytes in the third position of a multi-byte sequence.
    #[must_use]
    pub fn deep(&self) -> usize {
        self.counts[2]
    }

    /// Bytes anywhere past the lead of a multi-byte sequence.
    #[must_use]
    pub fn multibyte(&self) -> usize {
        self.counts[1] + self.counts[2]
    }

    /// Picks the UTF-8 context level under the thresholds in `options`.
    #[must_use]
    pub fn level(&self, options: &EstimatorOptions) -> ContextLevel {
        if options.allow_three_byte_contexts && self.deep() >= options.deep_continuation_threshold {
            ContextLevel::ThreeByte
        } else if self.multibyte() >= options.multibyte_threshold {
            ContextLevel::TwoByte
        } else {
            ContextLevel::Ascii
        }
    }
}

/// The classifier's decision for a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextLevel {
    /// Not mostly UTF-8: one histogram, wide window.
    Flat,
    /// Mostly UTF-8 but few multi-byte sequences: UTF-8 window, one class.
    Ascii,
    /// Two classes: sequence starts and second bytes.
    TwoByte,
    /// Three classes: sequence starts, second bytes and third bytes.
    ThreeByte,
}

impl ContextLevel {
    /// Highest context class used, or `None` for the flat model.
    #[must_use]
    pub fn class_cap(self) -> Option<usize> {
        match self {
            Self::Flat => None,
            Self::Ascii => Some(0),
            Self::TwoByte => Some(1),
            Self::ThreeByte => Some(2),
        }
    }

    /// Whether the UTF-8-aware model runs.
    #[must_use]
    pub fn is_utf8(self) -> bool {
        self != Self::Flat
    }
}

/// Context level for a window already known to be mostly UTF-8, under the
/// default thresholds.
#[must_use]
pub fn decide_context_level(window: &RingWindow<'_>) -> ContextLevel {
    ContextCensus::of(window).level(&EstimatorOptions::default())
}
