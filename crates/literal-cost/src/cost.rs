//! Sliding-window literal cost estimation.
//!
//! Both models walk the window once. At position `i` the statistics cover the
//! bytes in `[i - half + 1, i + half]` clipped to the window, so the window shrinks
//! near either edge instead of wrapping. The leading edge is admitted before
//! the cost of `i` is read and the trailing edge is expired before that.
//!
//! Costs are `log2(population) - log2(max(1, count)) + bias`; anything under
//! one bit is pulled halfway toward 0.5 so that bytes dominating a small window
//! never look free.

use alloc::{vec, vec::Vec};

use tracing::{debug, trace};

use crate::{
    error::WindowError,
    histogram::Histogram,
    options::{EstimatorOptions, ModelChoice},
    ring::RingWindow,
    utf8::{CONTEXT_CLASSES, ContextCensus, ContextLevel, context_class_at, valid_utf8_len},
};

const FLAT_BIAS: f64 = 0.029;
const UTF8_BIAS: f64 = 0.02905;

const START_PENALTY_MAX: f64 = 0.7;
const START_PENALTY_SLOPE: f64 = 0.35;

#[inline]
fn soften(cost: f64) -> f64 {
    if cost < 1.0 { cost * 0.5 + 0.5 } else { cost }
}

/// Extra cost paid by the first `span` bytes of the UTF-8 model: 0.35 bits at
/// byte 0 rising linearly toward 0.7, and nothing from `span` on.
#[inline]
#[allow(clippy::cast_precision_loss)]
fn start_penalty(i: usize, span: usize) -> f64 {
    if i < span {
        START_PENALTY_MAX - ((span - i) as f64 / span as f64 * START_PENALTY_SLOPE)
    } else {
        0.0
    }
}

/// Half-width actually used for a window of `len` bytes.
///
/// Anything at or past `len` already covers the whole window, so larger values
/// are cut down to `len` and the edge arithmetic cannot overflow. Zero becomes
/// 1 so that no position is expired before it is admitted.
#[inline]
fn effective_half(half: usize, len: usize) -> usize {
    half.clamp(1, len.max(1))
}

/// Flat model: one histogram over the whole alphabet.
#[allow(clippy::cast_possible_truncation)]
fn estimate_flat(window: &RingWindow<'_>, half: usize, histogram: &mut Histogram, cost: &mut [f32]) {
    let len = window.len();
    let half = effective_half(half, len);
    trace!(len, window_half = half, "flat literal cost pass");

    histogram.clear();
    for i in 0..half.min(len) {
        histogram.add(window.get(i));
    }

    for (i, slot) in cost.iter_mut().enumerate() {
        if i >= half {
            histogram.remove(window.get(i - half));
        }
        if i + half < len {
            histogram.add(window.get(i + half));
        }
        let lit_cost = histogram.bit_cost(window.get(i)) + FLAT_BIAS;
        *slot = soften(lit_cost) as f32;
    }
}

/// Per-class histograms for the UTF-8 model.
///
/// A byte is filed under the class derived from the two bytes before it, both
/// when it enters and when it leaves the window, so each expiry hits the
/// histogram the byte was admitted to.
struct ContextWindow<'w, 'a> {
    window: &'w RingWindow<'a>,
    histograms: &'w mut [Histogram; CONTEXT_CLASSES],
    cap: usize,
}

impl<'w, 'a> ContextWindow<'w, 'a> {
    fn new(
        window: &'w RingWindow<'a>,
        histograms: &'w mut [Histogram; CONTEXT_CLASSES],
        cap: usize,
    ) -> Self {
        for h in histograms.iter_mut() {
            h.clear();
        }
        Self {
            window,
            histograms,
            cap,
        }
    }

    #[inline]
    fn class_of(&self, offset: usize) -> usize {
        context_class_at(self.window, offset, self.cap)
    }

    #[inline]
    fn admit(&mut self, offset: usize) {
        let class = self.class_of(offset);
        self.histograms[class].add(self.window.get(offset));
    }

    #[inline]
    fn expire(&mut self, offset: usize) {
        let class = self.class_of(offset);
        self.histograms[class].remove(self.window.get(offset));
    }

    #[inline]
    fn bit_cost(&self, offset: usize) -> f64 {
        self.histograms[self.class_of(offset)].bit_cost(self.window.get(offset))
    }

    fn population(&self) -> usize {
        self.histograms.iter().map(Histogram::total).sum()
    }
}

/// UTF-8-aware model: statistics split by position inside multi-byte
/// sequences.
#[allow(clippy::cast_possible_truncation)]
fn estimate_utf8(
    window: &RingWindow<'_>,
    cap: usize,
    options: &EstimatorOptions,
    histograms: &mut [Histogram; CONTEXT_CLASSES],
    cost: &mut [f32],
) {
    let len = window.len();
    let half = effective_half(options.utf8_window_half, len);
    trace!(len, window_half = half, class_cap = cap, "utf8 literal cost pass");

    let mut ctx = ContextWindow::new(window, histograms, cap);
    for i in 0..half.min(len) {
        ctx.admit(i);
    }

    for (i, slot) in cost.iter_mut().enumerate() {
        if i >= half {
            ctx.expire(i - half);
        }
        if i + half < len {
            ctx.admit(i + half);
        }
        debug_assert_eq!(ctx.population(), (i + half + 1).min(len) - (i + 1).saturating_sub(half));
        let lit_cost = soften(ctx.bit_cost(i) + UTF8_BIAS) + start_penalty(i, options.start_penalty_span);
        *slot = lit_cost as f32;
    }
}

/// Reusable literal cost estimator.
///
/// Holds the options and the scratch histograms so that a pipeline estimating
/// many blocks does not rebuild them. Statistics are reset at the start of
/// every call; nothing learned from one window leaks into the next.
///
/// # Examples
///
/// ```rust
/// use literal_cost::{ContextLevel, LiteralCostEstimator, RingWindow};
///
/// let text = "naïve café, déjà vu".repeat(8);
/// let window = RingWindow::from_slice(text.as_bytes());
/// let mut costs = vec![0.0f32; window.len()];
///
/// let mut estimator = LiteralCostEstimator::new();
/// let level = estimator.estimate(&window, &mut costs);
/// assert_eq!(level, ContextLevel::TwoByte);
/// assert!(costs.iter().all(|&c| c >= 0.5));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LiteralCostEstimator {
    options: EstimatorOptions,
    flat: Histogram,
    contexts: [Histogram; CONTEXT_CLASSES],
}

impl LiteralCostEstimator {
    /// Estimator with the reference tuning.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Estimator with custom options.
    #[must_use]
    pub fn with_options(options: EstimatorOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// The options in effect.
    #[must_use]
    pub fn options(&self) -> &EstimatorOptions {
        &self.options
    }

    /// Decides which model [`estimate`](Self::estimate) would run.
    #[must_use]
    pub fn classify(&self, window: &RingWindow<'_>) -> ContextLevel {
        let opts = &self.options;
        let mostly_utf8 = match opts.force_model {
            ModelChoice::Flat => return ContextLevel::Flat,
            ModelChoice::Utf8 => true,
            ModelChoice::Auto => {
                let valid = valid_utf8_len(window);
                #[allow(clippy::cast_precision_loss)]
                let mostly = valid as f64 > opts.min_utf8_fraction * window.len() as f64;
                debug!(len = window.len(), valid_utf8 = valid, mostly_utf8 = mostly, "utf8 share");
                mostly
            }
        };
        if !mostly_utf8 {
            return ContextLevel::Flat;
        }
        let census = ContextCensus::of(window);
        let level = census.level(opts);
        debug!(counts = ?census.counts, ?level, "context level");
        level
    }

    /// Writes one cost per window byte into `cost[..window.len()]` and returns
    /// the model that produced them.
    ///
    /// # Panics
    ///
    /// Panics if `cost` is shorter than the window. Use
    /// [`try_estimate`](Self::try_estimate) for a checked variant.
    pub fn estimate(&mut self, window: &RingWindow<'_>, cost: &mut [f32]) -> ContextLevel {
        let cost = &mut cost[..window.len()];
        let level = self.classify(window);
        match level.class_cap() {
            None => estimate_flat(window, self.options.flat_window_half, &mut self.flat, cost),
            Some(cap) => estimate_utf8(window, cap, &self.options, &mut self.contexts, cost),
        }
        level
    }

    /// Like [`estimate`](Self::estimate), but reports a short output instead of
    /// panicking.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::OutputTooShort`] when `cost` holds fewer slots
    /// than the window has bytes.
    pub fn try_estimate(&mut self, window: &RingWindow<'_>, cost: &mut [f32]) -> Result<ContextLevel, WindowError> {
        if cost.len() < window.len() {
            return Err(WindowError::OutputTooShort {
                needed: window.len(),
                actual: cost.len(),
            });
        }
        Ok(self.estimate(window, cost))
    }

    /// Costs for a contiguous byte slice.
    #[must_use]
    pub fn costs(&mut self, bytes: &[u8]) -> Vec<f32> {
        let window = RingWindow::from_slice(bytes);
        let mut cost = vec![0.0; bytes.len()];
        self.estimate(&window, &mut cost);
        cost
    }
}

/// Estimates the bit cost of every byte in `data[(position + i) & mask]` for
/// `i < length`, writing `cost[i]`.
///
/// Preconditions (not checked in release builds): `mask + 1` is a power of
/// two, `data.len() > mask`, `length <= mask + 1` and `cost.len() >= length`.
///
/// ```rust
/// let ring = *b"world!   hello, ";
/// let mut cost = [0.0f32; 13];
/// // "hello, world!" starts at offset 9 and wraps around the ring end
/// literal_cost::estimate_literal_costs(9, 13, 15, &ring, &mut cost);
/// assert!(cost.iter().all(|c| c.is_finite() && *c >= 0.5));
/// ```
pub fn estimate_literal_costs(position: usize, length: usize, mask: usize, data: &[u8], cost: &mut [f32]) {
    let window = RingWindow::new_unchecked(data, mask, position, length);
    estimate_literal_costs_for(&window, cost);
}

/// Estimates costs for a prepared window and returns the model used.
pub fn estimate_literal_costs_for(window: &RingWindow<'_>, cost: &mut [f32]) -> ContextLevel {
    LiteralCostEstimator::new().estimate(window, cost)
}

/// Costs for a contiguous byte slice under the reference tuning.
#[must_use]
pub fn literal_costs(bytes: &[u8]) -> Vec<f32> {
    LiteralCostEstimator::new().costs(bytes)
}
