//! Synthetic convergence trajectories useful for testing, benchmarking and
//! smoke testing.
//!
//! All generators produce trajectories of a minimization problem that start at
//! `initial` and approach `optimum`. For a maximization problem, pass `initial`
//! below `optimum`; the generators only interpolate between the two values.

#![allow(unused)]

use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Geometric (linear-rate) convergence.
///
/// The distance to the optimum is multiplied by `rate` in every iteration, so
/// `rate` close to 0 means fast convergence and `rate` close to 1 slow
/// convergence.
pub fn geometric(initial: f64, optimum: f64, rate: f64, len: usize) -> Vec<f64> {
    assert!(len > 0, "empty trajectory");
    assert!((0.0..=1.0).contains(&rate), "rate must be in [0, 1]");

    let mut distance = initial - optimum;
    (0..len)
        .map(|_| {
            let value = optimum + distance;
            distance *= rate;
            value
        })
        .collect()
}

/// Linear progress from `initial` in the first iteration to `optimum` in the
/// last iteration.
pub fn linear(initial: f64, optimum: f64, len: usize) -> Vec<f64> {
    assert!(len > 0, "empty trajectory");

    if len == 1 {
        return vec![initial];
    }

    let step = (optimum - initial) / (len - 1) as f64;
    (0..len).map(|i| initial + step * i as f64).collect()
}

/// No progress at all for `stall` iterations, then geometric convergence with
/// rate 0.5.
pub fn plateau(initial: f64, optimum: f64, stall: usize, len: usize) -> Vec<f64> {
    assert!(len > 0, "empty trajectory");

    let stall = stall.min(len);
    let mut values = vec![initial; stall];

    if len > stall {
        values.extend(geometric(initial, optimum, 0.5, len - stall));
    }

    values
}

/// Adds a Gaussian noise with standard deviation `sigma` to every value.
///
/// The result is generally not monotonic anymore, which is useful for testing
/// the tolerance to noise.
pub fn with_noise<R: Rng + ?Sized>(values: &[f64], sigma: f64, rng: &mut R) -> Vec<f64> {
    let normal = Normal::new(0.0, sigma).expect("invalid standard deviation");
    values.iter().map(|v| v + normal.sample(rng)).collect()
}

/// Generates `runs` noisy geometric trajectories with given rate.
pub fn noisy_runs<R: Rng + ?Sized>(
    initial: f64,
    optimum: f64,
    rate: f64,
    len: usize,
    runs: usize,
    rng: &mut R,
) -> Vec<Vec<f64>> {
    let base = geometric(initial, optimum, rate, len);
    let sigma = 0.01 * (initial - optimum).abs();
    (0..runs).map(|_| with_noise(&base, sigma, rng)).collect()
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn geometric_halving() {
        assert_eq!(geometric(9.0, 1.0, 0.5, 4), vec![9.0, 5.0, 3.0, 2.0]);
    }

    #[test]
    fn linear_ends_at_optimum() {
        assert_eq!(linear(4.0, 0.0, 5), vec![4.0, 3.0, 2.0, 1.0, 0.0]);
        assert_eq!(linear(4.0, 0.0, 1), vec![4.0]);
    }

    #[test]
    fn plateau_stalls() {
        assert_eq!(plateau(8.0, 0.0, 2, 5), vec![8.0, 8.0, 8.0, 4.0, 2.0]);
        assert_eq!(plateau(8.0, 0.0, 10, 3), vec![8.0, 8.0, 8.0]);
    }

    #[test]
    fn noise_keeps_length() {
        let mut rng = rand::thread_rng();
        let runs = noisy_runs(100.0, 0.0, 0.9, 30, 5, &mut rng);

        assert_eq!(runs.len(), 5);
        assert!(runs.iter().all(|run| run.len() == 30));
        assert!(runs.iter().flatten().all(|v| v.is_finite()));
    }
}
