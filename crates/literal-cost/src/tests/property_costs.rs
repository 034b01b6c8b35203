use alloc::{boxed::Box, string::String, vec::Vec};

use quickcheck::{Arbitrary, Gen, QuickCheck};
use quickcheck_macros::quickcheck;

use crate::{
    EstimatorOptions, LiteralCostEstimator, ModelChoice, RingWindow, decode_unit, literal_costs,
};

/// Bytes biased toward text: mostly UTF-8 with some binary noise, long enough
/// to cross the sliding windows now and then.
#[derive(Debug, Clone)]
struct Corpus(Vec<u8>);

impl Arbitrary for Corpus {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut bytes = Vec::new();
        let pieces = usize::arbitrary(g) % 64;
        for _ in 0..pieces {
            match usize::arbitrary(g) % 4 {
                0 => bytes.extend(Vec::<u8>::arbitrary(g)),
                1 => {
                    let run = usize::arbitrary(g) % 3000;
                    bytes.extend(core::iter::repeat_n(u8::arbitrary(g), run));
                }
                _ => bytes.extend(String::arbitrary(g).into_bytes()),
            }
        }
        Self(bytes)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Corpus))
    }
}

fn test_count() -> u64 {
    #[cfg(not(miri))]
    let tests = if cfg!(feature = "test-fast") {
        20
    } else if is_ci::cached() {
        2_000
    } else {
        200
    };
    #[cfg(miri)]
    let tests = 5;
    tests
}

/// Property: every cost is finite and at least half a bit, under every model.
#[test]
fn costs_are_finite_and_at_least_half_a_bit() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(corpus: Corpus, model: u8) -> bool {
        let force_model = match model % 3 {
            0 => ModelChoice::Auto,
            1 => ModelChoice::Flat,
            _ => ModelChoice::Utf8,
        };
        let mut estimator = LiteralCostEstimator::with_options(EstimatorOptions {
            force_model,
            ..Default::default()
        });
        let costs = estimator.costs(&corpus.0);
        costs.len() == corpus.0.len() && costs.iter().all(|c| c.is_finite() && *c >= 0.5)
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Corpus, u8) -> bool);
}

/// Property: a reused estimator gives the same costs as a fresh one, so no
/// statistics survive between calls.
#[test]
fn reused_estimator_matches_fresh_one() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(first: Corpus, second: Corpus) -> bool {
        let mut estimator = LiteralCostEstimator::new();
        let _ = estimator.costs(&first.0);
        let again = estimator.costs(&second.0);
        again == literal_costs(&second.0) && again == estimator.costs(&second.0)
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Corpus, Corpus) -> bool);
}

/// Property: whatever a strict UTF-8 decoder accepts, the heuristic decoder
/// accepts with the same scalar and length.
#[quickcheck]
#[allow(clippy::needless_pass_by_value)]
fn decoder_accepts_everything_strict_utf8_accepts(bytes: Vec<u8>, text: String) -> bool {
    let mut mixed = bytes;
    mixed.extend(text.into_bytes());
    let window = RingWindow::from_slice(&mixed);
    (0..mixed.len()).all(|offset| match bstr::decode_utf8(&mixed[offset..]) {
        (Some(ch), len) => {
            decode_unit(&window, offset)
                .is_some_and(|unit| unit.is_valid() && unit.len == len && unit.code_point == u32::from(ch))
        }
        (None, _) => true,
    })
}

#[test]
fn empty_input_yields_no_costs() {
    assert!(literal_costs(&[]).is_empty());
}
