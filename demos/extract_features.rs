//! Build a feature row from synthetic breath traces and print it
//!
//! Run with: cargo run --example extract_features

use breath_dsp::{ChannelTable, FeatureMatrixBuilder, Vitals, REFERENCE_CHANNELS};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Synthetic 40-second capture at 100 Hz: each channel responds with a
    // bump of slightly different height and timing
    let len = 4000;
    let mut table = ChannelTable::new();
    for (i, channel) in REFERENCE_CHANNELS.iter().enumerate() {
        let center = 1800 + i * 40;
        let height = 0.6 + 0.08 * i as f64;
        let trace: Vec<f64> = (0..len)
            .map(|j| {
                let d = (j as f64 - center as f64).abs();
                (height * (1.0 - d / 250.0)).max(0.0) + 0.005 * (j as f64 * 1.3).sin()
            })
            .collect();
        table.insert(*channel, trace);
    }

    let vitals = Vitals {
        age: 52,
        gender: 0,
        heart_beat: 76,
        spo2: 96,
        max_bp: 135,
        min_bp: 85,
    };

    let builder = FeatureMatrixBuilder::with_reference_config();
    let row = builder.build(&vitals, &table)?;

    println!("Feature row ({} columns):", row.len());
    for (column, value) in row.columns().iter().zip(row.values()) {
        println!("  {:<16} {:>14.6}", column, value);
    }

    Ok(())
}
