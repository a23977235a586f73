//! CCM derivation command

use crate::SolveArgs;
#[allow(unused_imports)]
use tracing::{debug, info, trace};
use anyhow::{Context, Result};
use ccm_math::Mat3;
use ccm_spectral::{ReflectanceSet, ResponseBound, SensorBasis, SpectralTable};
use ccm_solve::{
    search, search_parallel, spectral_sensitivity, validate, SearchOutcome, ValidationReport,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct SolveReport<'a> {
    ccm: &'a [[f64; 3]; 3],
    score: f64,
    validation: &'a ValidationReport,
}

pub fn run(args: SolveArgs, verbose: bool) -> Result<()> {
    let basis = load_resampled(&args.basis, &args)
        .and_then(|table| SensorBasis::from_table(table).map_err(Into::into))
        .with_context(|| format!("Invalid sensor basis: {}", args.basis.display()))?;

    let refl_table = load_resampled(&args.reflectance, &args)
        .with_context(|| format!("Invalid reflectance table: {}", args.reflectance.display()))?;
    let mut set = ReflectanceSet::new(refl_table);
    if !args.no_band {
        set.push_band(args.band_center, args.band_width)?;
    }

    let samples = set.project_onto(&basis)?;
    let bound = ResponseBound::linear_over(&basis.grid())?;

    if verbose {
        println!(
            "Searching {} candidates over {} samples on a {}-point grid",
            args.iterations,
            samples.len(),
            basis.len()
        );
    }
    debug!(
        iterations = args.iterations,
        seed = args.seed,
        parallel = args.parallel,
        "starting search"
    );

    let outcome = if args.parallel {
        search_parallel(&basis, &samples, &bound, args.iterations, args.seed)?
    } else {
        let mut rng = StdRng::seed_from_u64(args.seed);
        search(&basis, &samples, &bound, args.iterations, &mut rng)?
    };

    let solution = match outcome {
        SearchOutcome::Found(solution) => solution,
        SearchOutcome::Exhausted => {
            eprintln!(
                "No feasible matrix found within {} iterations",
                args.iterations
            );
            std::process::exit(2);
        }
    };

    let report = validate(&basis, &bound, &solution.ccm, args.tolerance)?;

    if let Some(path) = &args.dump_ssf {
        write_ssf(path, &basis, &bound, &solution.ccm)?;
        if verbose {
            println!("Wrote SSF table to {}", path.display());
        }
    }

    if args.json {
        let out = SolveReport {
            ccm: &solution.ccm.m,
            score: solution.score,
            validation: &report,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_report(&solution.ccm, solution.score, &report);
    }

    Ok(())
}

/// Load a table and bring it onto the target grid.
fn load_resampled(path: &Path, args: &SolveArgs) -> Result<SpectralTable> {
    let mut table = super::load_table(path)?;
    table.resample(args.grid_start, args.grid_end, args.grid_count)?;
    table.normalize()?;
    Ok(table)
}

fn print_report(ccm: &Mat3, score: f64, report: &ValidationReport) {
    println!("CCM:");
    for row in &ccm.m {
        println!("  [ {:>12.6} {:>12.6} {:>12.6} ]", row[0], row[1], row[2]);
    }
    println!("determinant: {:.6e}", report.determinant);
    println!("score:       {:.6}", score);
    println!(
        "checks:      invertible={} within_bound={} neutral={}",
        report.invertible, report.within_bound, report.neutral
    );
    println!(
        "white RGB:   [{:.6}, {:.6}, {:.6}]",
        report.white_rgb[0], report.white_rgb[1], report.white_rgb[2]
    );
}

/// Write the derived sensitivity and the ceiling for external plotting.
fn write_ssf(
    path: &PathBuf,
    basis: &SensorBasis,
    bound: &ResponseBound,
    ccm: &Mat3,
) -> Result<()> {
    let ssf = spectral_sensitivity(basis, ccm);
    let grid = basis.grid();

    let file = File::create(path)
        .with_context(|| format!("Failed to create: {}", path.display()))?;
    let mut out = BufWriter::new(file);
    for (i, &w) in grid.iter().enumerate() {
        writeln!(
            out,
            "{},{},{},{},{}",
            w,
            ssf[i].x,
            ssf[i].y,
            ssf[i].z,
            bound.values()[i]
        )?;
    }
    Ok(())
}
