//! Spectral table inspection command

use crate::InfoArgs;
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct TableInfo {
    path: String,
    range: (f64, f64),
    step: f64,
    samples: usize,
    channels: usize,
    normalized: bool,
}

pub fn run(args: InfoArgs, verbose: bool) -> Result<()> {
    for path in &args.input {
        let table = super::load_table(path)?;

        if args.json {
            let info = TableInfo {
                path: path.display().to_string(),
                range: table.range(),
                step: table.step(),
                samples: table.count(),
                channels: table.num_channels(),
                normalized: table.is_normalized(),
            };
            println!("{}", serde_json::to_string_pretty(&info)?);
        } else {
            print_info(path, &table, verbose);
        }
    }
    Ok(())
}

fn print_info(path: &Path, table: &ccm_spectral::SpectralTable, verbose: bool) {
    let (start, end) = table.range();
    println!("{}:", path.display());
    println!("  range:    {start} - {end} nm");
    println!("  step:     {}", table.step());
    println!("  samples:  {}", table.count());
    println!("  channels: {}", table.num_channels());
    println!("  normalized: {}", table.is_normalized());
    if verbose {
        for (i, channel) in table.channels().iter().enumerate() {
            let min = channel.iter().copied().fold(f64::INFINITY, f64::min);
            let max = channel.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            println!("  channel {i}: min {min:.6}, max {max:.6}");
        }
    }
}
