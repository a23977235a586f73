//! Monte Carlo search for the best feasible transform.

use crate::{SolveError, SolveResult};
use ccm_math::Mat3;
use ccm_spectral::{ResponseBound, SampleMatrix, SensorBasis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Determinant magnitude below which a draw counts as rank-deficient.
pub const RANK_EPSILON: f64 = 1e-12;

/// Iterations per shard of [`search_parallel`].
pub const CHUNK_ITERATIONS: usize = 1024;

/// A retained search result: the feasibility-rescaled matrix and its score.
///
/// The score is the brightness sum the rescaled matrix achieves over the
/// sample set, which is exactly the quantity candidates were ranked by.
#[derive(Debug, Clone)]
pub struct CcmSolution {
    /// The derived color-correction matrix
    pub ccm: Mat3,
    /// Brightness objective of the rescaled matrix
    pub score: f64,
}

/// Outcome of a search run.
///
/// Exhaustion is a normal result, not a fault: every draw was
/// rank-deficient, or no candidate ever scored above zero. Callers must
/// branch; there is no default matrix.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// A feasible, improving candidate was retained.
    Found(CcmSolution),
    /// The iteration budget produced nothing usable.
    Exhausted,
}

impl SearchOutcome {
    /// The solution, if one was found.
    pub fn found(&self) -> Option<&CcmSolution> {
        match self {
            Self::Found(solution) => Some(solution),
            Self::Exhausted => None,
        }
    }

    /// True if the search came up empty.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }
}

fn check_bound(basis: &SensorBasis, bound: &ResponseBound) -> SolveResult<()> {
    if bound.len() != basis.len() {
        return Err(SolveError::BoundLength {
            expected: basis.len(),
            got: bound.len(),
        });
    }
    Ok(())
}

/// One sweep of random trials. Inputs are already length-checked.
fn run_trials<R: Rng + ?Sized>(
    basis: &SensorBasis,
    samples: &SampleMatrix,
    bound: &[f64],
    iterations: usize,
    rng: &mut R,
) -> Option<CcmSolution> {
    let mut best: Option<CcmSolution> = None;
    let mut best_score = 0.0_f64;

    for _ in 0..iterations {
        let candidate = Mat3::from_fn(|_, _| rng.gen_range(0.0..1.0));

        // Rank-deficient draws cannot define a color transform; skip them
        // without counting a failure.
        if candidate.determinant().abs() <= RANK_EPSILON {
            continue;
        }

        let brightness: f64 = samples
            .rows()
            .iter()
            .map(|&sample| (sample * candidate).sum())
            .sum();

        let mut max_ratio = 0.0_f64;
        for (i, row) in basis.rows().enumerate() {
            let response = (row * candidate).max_element();
            let ratio = response / bound[i];
            if ratio > max_ratio {
                max_ratio = ratio;
            }
        }
        // A non-positive worst ratio leaves nothing to rescale against.
        if !(max_ratio > 0.0) {
            continue;
        }

        let score = brightness / max_ratio;
        if score > best_score {
            best_score = score;
            best = Some(CcmSolution {
                ccm: candidate / max_ratio,
                score,
            });
        }
    }

    best
}

/// Runs the sequential Monte Carlo search.
///
/// Each iteration draws a 3x3 matrix with entries uniform in `[0, 1)`,
/// skips it if rank-deficient, and otherwise scores the feasibility-rescaled
/// candidate by its brightness over the sample set. The best-scoring
/// candidate wins; ties keep the earlier one.
///
/// The generator is supplied by the caller, so a fixed seed reproduces the
/// returned matrix bit for bit. `max_iterations = 0` returns
/// [`SearchOutcome::Exhausted`].
///
/// # Errors
///
/// [`SolveError::BoundLength`] if the bound does not cover the basis grid.
pub fn search<R: Rng + ?Sized>(
    basis: &SensorBasis,
    samples: &SampleMatrix,
    bound: &ResponseBound,
    max_iterations: usize,
    rng: &mut R,
) -> SolveResult<SearchOutcome> {
    check_bound(basis, bound)?;
    Ok(match run_trials(basis, samples, bound.values(), max_iterations, rng) {
        Some(solution) => SearchOutcome::Found(solution),
        None => SearchOutcome::Exhausted,
    })
}

/// Runs the search sharded across the rayon thread pool.
///
/// The iteration budget is split into fixed-size chunks of
/// [`CHUNK_ITERATIONS`]; chunk `i` runs the sequential sweep with its own
/// generator seeded from `seed + i`, and results merge by score with the
/// lowest chunk winning ties. The outcome therefore depends only on `seed`
/// and `max_iterations`, never on thread count.
///
/// Trials are independent, so this is a plain throughput optimization with
/// the same contract as [`search`].
pub fn search_parallel(
    basis: &SensorBasis,
    samples: &SampleMatrix,
    bound: &ResponseBound,
    max_iterations: usize,
    seed: u64,
) -> SolveResult<SearchOutcome> {
    check_bound(basis, bound)?;

    let num_chunks = max_iterations.div_ceil(CHUNK_ITERATIONS);
    let results: Vec<Option<CcmSolution>> = (0..num_chunks)
        .into_par_iter()
        .map(|chunk| {
            let remaining = max_iterations - chunk * CHUNK_ITERATIONS;
            let iterations = CHUNK_ITERATIONS.min(remaining);
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(chunk as u64));
            run_trials(basis, samples, bound.values(), iterations, &mut rng)
        })
        .collect();

    let mut best: Option<CcmSolution> = None;
    for solution in results.into_iter().flatten() {
        let improves = best.as_ref().is_none_or(|b| solution.score > b.score);
        if improves {
            best = Some(solution);
        }
    }

    Ok(match best {
        Some(solution) => SearchOutcome::Found(solution),
        None => SearchOutcome::Exhausted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccm_math::Vec3;
    use ccm_spectral::{gaussian_band, ReflectanceSet, SpectralTable};

    fn test_basis() -> SensorBasis {
        let grid = ccm_math::linspace(400.0, 700.0, 31);
        let table = SpectralTable::from_channels(
            400.0,
            700.0,
            vec![
                gaussian_band(&grid, 600.0, 40.0),
                gaussian_band(&grid, 550.0, 40.0),
                gaussian_band(&grid, 450.0, 40.0),
            ],
        )
        .unwrap();
        SensorBasis::from_table(table).unwrap()
    }

    fn test_inputs() -> (SensorBasis, SampleMatrix, ResponseBound) {
        let basis = test_basis();
        let set = ReflectanceSet::new(
            SpectralTable::from_channels(
                400.0,
                700.0,
                vec![vec![1.0; 31], vec![0.5; 31], vec![0.2; 31]],
            )
            .unwrap(),
        );
        let samples = set.project_onto(&basis).unwrap();
        let bound = ResponseBound::linear_over(&basis.grid()).unwrap();
        (basis, samples, bound)
    }

    #[test]
    fn test_zero_iterations_exhausted() {
        let (basis, samples, bound) = test_inputs();
        let mut rng = StdRng::seed_from_u64(1);
        let outcome = search(&basis, &samples, &bound, 0, &mut rng).unwrap();
        assert!(outcome.is_exhausted());
    }

    #[test]
    fn test_search_finds_candidate() {
        let (basis, samples, bound) = test_inputs();
        let mut rng = StdRng::seed_from_u64(42);
        let outcome = search(&basis, &samples, &bound, 500, &mut rng).unwrap();
        let solution = outcome.found().expect("500 draws should retain one");
        assert!(solution.score > 0.0);
        assert!(solution.ccm.determinant().abs() > RANK_EPSILON);
    }

    #[test]
    fn test_seed_reproducible() {
        let (basis, samples, bound) = test_inputs();
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        let first = search(&basis, &samples, &bound, 1000, &mut a).unwrap();
        let second = search(&basis, &samples, &bound, 1000, &mut b).unwrap();
        let (first, second) = (first.found().unwrap(), second.found().unwrap());
        assert_eq!(first.ccm.m, second.ccm.m);
        assert_eq!(first.score, second.score);
    }

    #[test]
    fn test_retained_is_on_feasible_boundary() {
        let (basis, samples, bound) = test_inputs();
        let mut rng = StdRng::seed_from_u64(7);
        let outcome = search(&basis, &samples, &bound, 1000, &mut rng).unwrap();
        let solution = outcome.found().unwrap();

        // The tightest wavelength sits exactly on the ceiling after
        // rescaling; everything else stays under it.
        let mut max_ratio = 0.0_f64;
        for (i, row) in basis.rows().enumerate() {
            let response = (row * solution.ccm).max_element();
            max_ratio = max_ratio.max(response / bound.values()[i]);
        }
        assert!((max_ratio - 1.0).abs() < 1e-9, "max ratio {max_ratio}");
    }

    #[test]
    fn test_negative_brightness_exhausted() {
        let basis = test_basis();
        let bound = ResponseBound::linear_over(&basis.grid()).unwrap();
        // Candidate entries are non-negative, so negative sample rows force
        // every brightness sum below zero.
        let samples = SampleMatrix::from_rows(vec![Vec3::splat(-1.0)]);
        let mut rng = StdRng::seed_from_u64(3);
        let outcome = search(&basis, &samples, &bound, 300, &mut rng).unwrap();
        assert!(outcome.is_exhausted());
    }

    #[test]
    fn test_bound_length_mismatch() {
        let (basis, samples, _) = test_inputs();
        let bound = ResponseBound::from_values(vec![1.0; 7]);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            search(&basis, &samples, &bound, 10, &mut rng),
            Err(SolveError::BoundLength {
                expected: 31,
                got: 7
            })
        ));
    }

    #[test]
    fn test_parallel_deterministic() {
        let (basis, samples, bound) = test_inputs();
        let first = search_parallel(&basis, &samples, &bound, 3000, 11).unwrap();
        let second = search_parallel(&basis, &samples, &bound, 3000, 11).unwrap();
        let (first, second) = (first.found().unwrap(), second.found().unwrap());
        assert_eq!(first.ccm.m, second.ccm.m);
    }

    #[test]
    fn test_parallel_zero_iterations() {
        let (basis, samples, bound) = test_inputs();
        let outcome = search_parallel(&basis, &samples, &bound, 0, 5).unwrap();
        assert!(outcome.is_exhausted());
    }
}
