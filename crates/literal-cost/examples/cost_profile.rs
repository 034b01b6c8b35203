//! Prints the mean literal cost of each 1 KiB chunk of a file, the signal a
//! block splitter looks at.
//!
//! ```text
//! cargo run --example cost_profile -- path/to/file
//! ```
#![allow(missing_docs)]

use std::{env, fs, process::ExitCode};

use literal_cost::{LiteralCostEstimator, RingWindow};

const CHUNK: usize = 1024;

fn main() -> ExitCode {
    let data = match env::args_os().nth(1) {
        Some(path) => match fs::read(&path) {
            Ok(data) => data,
            Err(err) => {
                eprintln!("cannot read {}: {err}", path.to_string_lossy());
                return ExitCode::FAILURE;
            }
        },
        None => {
            // text followed by noise: the profile should jump at the seam
            let mut demo = "Příliš žluťoučký kůň úpěl ďábelské ódy. ".repeat(200).into_bytes();
            demo.extend((0u32..8192).map(|i| (i.wrapping_mul(2_654_435_761) >> 13) as u8));
            demo
        }
    };

    let window = RingWindow::from_slice(&data);
    let mut cost = vec![0.0f32; data.len()];
    let level = LiteralCostEstimator::new().estimate(&window, &mut cost);
    println!("model: {level:?}, {} bytes", data.len());

    for (n, chunk) in cost.chunks(CHUNK).enumerate() {
        let mean = chunk.iter().map(|&c| f64::from(c)).sum::<f64>() / chunk.len() as f64;
        let bar = "#".repeat((mean * 4.0).round() as usize);
        println!("{:>8} {mean:6.3} {bar}", n * CHUNK);
    }
    ExitCode::SUCCESS
}
