use alloc::string::String;

use rstest::rstest;

use crate::{
    ContextCensus, ContextLevel, EstimatorOptions, LiteralCostEstimator, RingWindow,
    decide_context_level, is_mostly_utf8,
};

/// `n` three-byte characters ("€", E2 82 AC) padded with ASCII: each one adds
/// exactly one class 1 and one class 2 byte to the census.
fn euros(n: usize) -> String {
    let mut s = String::new();
    for _ in 0..n {
        s.push_str("€ ");
    }
    s
}

/// `n` two-byte characters ("é", C3 A9): one class 1 byte each, no class 2.
fn acutes(n: usize) -> String {
    let mut s = String::new();
    for _ in 0..n {
        s.push_str("é.");
    }
    s
}

#[rstest]
#[case::below_deep_threshold(499, ContextLevel::TwoByte)]
#[case::at_deep_threshold(500, ContextLevel::ThreeByte)]
#[case::above_deep_threshold(501, ContextLevel::ThreeByte)]
fn deep_continuation_threshold_flips_at_500(#[case] n: usize, #[case] expected: ContextLevel) {
    let text = euros(n);
    let window = RingWindow::from_slice(text.as_bytes());
    assert_eq!(ContextCensus::of(&window).deep(), n);
    assert_eq!(decide_context_level(&window), expected);
}

#[rstest]
#[case::below_multibyte_threshold(24, ContextLevel::Ascii)]
#[case::at_multibyte_threshold(25, ContextLevel::TwoByte)]
fn multibyte_threshold_flips_at_25(#[case] n: usize, #[case] expected: ContextLevel) {
    let text = acutes(n);
    let window = RingWindow::from_slice(text.as_bytes());
    let census = ContextCensus::of(&window);
    assert_eq!(census.multibyte(), n);
    assert_eq!(census.deep(), 0);
    assert_eq!(decide_context_level(&window), expected);
}

#[test]
fn mixed_sequences_count_toward_the_combined_threshold() {
    // 12 three-byte characters give 24 combined; one two-byte character tips it
    let mut text = euros(12);
    let window = RingWindow::from_slice(text.as_bytes());
    assert_eq!(decide_context_level(&window), ContextLevel::Ascii);

    text.push('é');
    let window = RingWindow::from_slice(text.as_bytes());
    assert_eq!(ContextCensus::of(&window).multibyte(), 25);
    assert_eq!(decide_context_level(&window), ContextLevel::TwoByte);
}

#[test]
fn three_byte_contexts_can_be_disabled() {
    let text = euros(600);
    let window = RingWindow::from_slice(text.as_bytes());
    let estimator = LiteralCostEstimator::with_options(EstimatorOptions {
        allow_three_byte_contexts: false,
        ..Default::default()
    });
    assert_eq!(estimator.classify(&window), ContextLevel::TwoByte);
    assert_eq!(LiteralCostEstimator::new().classify(&window), ContextLevel::ThreeByte);
}

#[test]
fn dispatch_requires_mostly_utf8() {
    // 600 valid euro characters drowned in invalid bytes
    let mut bytes = euros(600).into_bytes();
    bytes.extend(core::iter::repeat_n(0xFFu8, bytes.len() * 3));
    let window = RingWindow::from_slice(&bytes);
    assert!(!is_mostly_utf8(&window, 0.75));
    assert_eq!(ContextCensus::of(&window).deep(), 600);
    assert_eq!(LiteralCostEstimator::new().classify(&window), ContextLevel::Flat);
}
