#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use literal_cost::{
    EstimatorOptions, LiteralCostEstimator, ModelChoice, RingWindow, literal_costs,
};

/// A window placed somewhere in a ring, plus the knobs the estimator exposes.
#[derive(Debug, Arbitrary)]
struct Input<'a> {
    ring_bits: u8,
    position: u16,
    len: u16,
    model: u8,
    three_byte: bool,
    utf8_window_half: u16,
    flat_window_half: u16,
    data: &'a [u8],
}

/// Mostly small half-widths, with the top of the range reaching toward
/// `usize::MAX`.
fn half_width(raw: u16, modulus: u16) -> usize {
    if raw >= 0xFF00 {
        usize::MAX >> (u32::from(raw) % usize::BITS)
    } else {
        usize::from(raw % modulus)
    }
}

fuzz_target!(|input: Input<'_>| {
    let bits = u32::from(input.ring_bits % 13);
    let capacity = 1usize << bits;
    if input.data.len() < capacity {
        return;
    }
    let ring = &input.data[..capacity];
    let len = usize::from(input.len) % (capacity + 1);
    let window = RingWindow::new(ring, capacity - 1, usize::from(input.position), len)
        .expect("ring contract holds by construction");

    let options = EstimatorOptions {
        force_model: match input.model % 3 {
            0 => ModelChoice::Auto,
            1 => ModelChoice::Flat,
            _ => ModelChoice::Utf8,
        },
        allow_three_byte_contexts: input.three_byte,
        utf8_window_half: half_width(input.utf8_window_half, 2048),
        flat_window_half: half_width(input.flat_window_half, 4096),
        ..Default::default()
    };

    let mut cost = vec![0.0f32; len];
    let mut estimator = LiteralCostEstimator::with_options(options);
    let level = estimator.estimate(&window, &mut cost);
    assert!(
        cost.iter().all(|c| c.is_finite() && *c >= 0.5),
        "cost below floor for {level:?}: {cost:?}"
    );

    // the same bytes copied out of the ring must cost the same
    let contiguous: Vec<u8> = window.iter().collect();
    assert_eq!(cost, estimator.costs(&contiguous));
    if options == EstimatorOptions::default() {
        assert_eq!(cost, literal_costs(&contiguous));
    }
});
