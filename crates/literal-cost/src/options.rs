/// Which cost model the estimator runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ModelChoice {
    /// Run the UTF-8-aware model when the window is mostly UTF-8, the flat
    /// model otherwise.
    #[default]
    Auto,
    /// Always run the flat, context-free model.
    Flat,
    /// Always run the UTF-8-aware model, skipping the mostly-UTF-8 check.
    Utf8,
}

/// Configuration for [`LiteralCostEstimator`](crate::LiteralCostEstimator).
///
/// The defaults are the reference tuning, except that the three-class model is
/// allowed (see [`allow_three_byte_contexts`](Self::allow_three_byte_contexts)).
/// Every field changes the produced costs, so pipelines that compare
/// compression ratios against a baseline should keep them.
///
/// Window half-widths accept any value: 0 is read as 1, and anything at or
/// past the window length covers the whole window.
///
/// # Examples
///
/// ```rust
/// use literal_cost::{EstimatorOptions, LiteralCostEstimator, ModelChoice};
///
/// let mut estimator = LiteralCostEstimator::with_options(EstimatorOptions {
///     force_model: ModelChoice::Flat,
///     ..Default::default()
/// });
/// let costs = estimator.costs(b"hello hello hello");
/// assert_eq!(costs.len(), 17);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EstimatorOptions {
    /// Fraction of the window that must decode as valid UTF-8 before the
    /// UTF-8-aware model is considered.
    ///
    /// The comparison is strict: a window qualifies when its valid-UTF-8 byte
    /// count is greater than `min_utf8_fraction * len`.
    ///
    /// # Default
    ///
    /// `0.75`
    pub min_utf8_fraction: f64,

    /// Half-width of the flat model's sliding window.
    ///
    /// # Default
    ///
    /// `2000`
    pub flat_window_half: usize,

    /// Half-width of the UTF-8-aware model's sliding window.
    ///
    /// Smaller than the flat window because splitting statistics by context
    /// class sharpens each histogram.
    ///
    /// # Default
    ///
    /// `495`
    pub utf8_window_half: usize,

    /// Minimum number of third-byte positions (context class 2) needed to run
    /// the three-class model.
    ///
    /// # Default
    ///
    /// `500`
    pub deep_continuation_threshold: usize,

    /// Minimum number of class 1 and class 2 positions combined needed to
    /// split contexts at all; below it the UTF-8 model keeps a single class.
    ///
    /// # Default
    ///
    /// `25`
    pub multibyte_threshold: usize,

    /// Number of leading bytes that pay the start-of-stream penalty in the
    /// UTF-8-aware model.
    ///
    /// # Default
    ///
    /// `2000`
    pub start_penalty_span: usize,

    /// Whether the three-class model may be selected.
    ///
    /// When `false` the level is capped at two classes, which is the shipped
    /// tuning of the reference encoder.
    ///
    /// # Default
    ///
    /// `true`
    pub allow_three_byte_contexts: bool,

    /// Overrides the mostly-UTF-8 dispatch.
    ///
    /// # Default
    ///
    /// [`ModelChoice::Auto`]
    pub force_model: ModelChoice,
}

impl Default for EstimatorOptions {
    fn default() -> Self {
        Self {
            min_utf8_fraction: 0.75,
            flat_window_half: 2000,
            utf8_window_half: 495,
            deep_continuation_threshold: 500,
            multibyte_threshold: 25,
            start_penalty_span: 2000,
            allow_three_byte_contexts: true,
            force_model: ModelChoice::Auto,
        }
    }
}
