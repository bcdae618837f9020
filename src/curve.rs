//! Numeric building blocks of the metric.
//!
//! A trajectory is turned into a *distance curve* (absolute distance to the
//! optimum at each iteration), the curve is normalized to a common scale and
//! the area under it is computed by a discrete integration rule. The smaller
//! the area, the faster the curve drops towards zero and stays there.

use std::iter;

use nalgebra::{convert, DVector, RealField};

use crate::core::Trajectory;

/// How distance curves are scaled to a common range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum Normalization {
    /// Each curve is divided by its own initial distance, so all curves start
    /// at 1. A curve starting at the optimum is all zeros.
    #[default]
    Initial,
    /// All curves are divided by the largest distance observed in any
    /// trajectory of the computation. Differences in the starting points are
    /// thus kept.
    Global,
}

/// Discrete integration rule over iteration index with unit step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum Integration {
    /// Trapezoidal rule. A single-sample curve is taken as a unit-width
    /// rectangle.
    #[default]
    Trapezoidal,
    /// Left Riemann sum, i.e., the plain sum of the values.
    Rectangular,
    /// Sum of values weighted by `i + 1`. Distance remaining late in the run
    /// is penalized more than distance early in the run.
    LinearlyWeighted,
}

/// Policy for aligning runs of different lengths within a run group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum Alignment {
    /// Shorter runs are padded with their last value up to the length of the
    /// longest run.
    #[default]
    HoldLast,
    /// All runs are cut to the length of the shortest run.
    Truncate,
}

/// Computes the absolute distance to the optimum in every iteration.
pub fn distance<T: RealField + Copy>(values: &DVector<T>, optimum: T) -> DVector<T> {
    values.map(|v| (v - optimum).abs())
}

/// Divides the curve by `reference`.
///
/// When the reference is zero, the curve is all zeros. With
/// [`Normalization::Initial`] this means the optimum was found in the very
/// first iteration, which is instantaneous convergence.
pub fn normalize<T: RealField + Copy>(curve: &DVector<T>, reference: T) -> DVector<T> {
    if reference == T::zero() {
        DVector::zeros(curve.len())
    } else {
        curve.map(|d| d / reference)
    }
}

/// Computes the area under the curve using given integration rule.
pub fn area<T: RealField + Copy>(curve: &DVector<T>, rule: Integration) -> T {
    match rule {
        Integration::Trapezoidal => {
            if curve.len() == 1 {
                return curve[0];
            }

            let half = convert::<_, T>(0.5);
            curve
                .as_slice()
                .windows(2)
                .fold(T::zero(), |acc, w| acc + half * (w[0] + w[1]))
        }
        Integration::Rectangular => curve.sum(),
        Integration::LinearlyWeighted => curve
            .iter()
            .enumerate()
            .fold(T::zero(), |acc, (i, d)| {
                acc + convert::<_, T>((i + 1) as f64) * *d
            }),
    }
}

/// Aligns the values of the runs to a common length given by the policy.
///
/// Returns an empty vector for no runs.
pub fn align<T: RealField + Copy>(runs: &[Trajectory<T>], policy: Alignment) -> Vec<DVector<T>> {
    let lengths = runs.iter().map(Trajectory::len);
    let len = match policy {
        Alignment::HoldLast => lengths.max(),
        Alignment::Truncate => lengths.min(),
    };

    let len = match len {
        Some(len) => len,
        None => return Vec::new(),
    };

    runs.iter()
        .map(|run| {
            let values = run
                .as_slice()
                .iter()
                .copied()
                .chain(iter::repeat(run.last()));
            DVector::from_iterator(len, values.take(len))
        })
        .collect()
}

/// Computes the arithmetic mean of the values, `None` for no values.
///
/// The values are divided before summing, so the mean of finite values is
/// finite even if their sum is not.
pub fn mean<T: RealField + Copy>(values: &[T]) -> Option<T> {
    if values.is_empty() {
        return None;
    }

    let n = convert::<_, T>(values.len() as f64);
    Some(values.iter().fold(T::zero(), |acc, v| acc + *v / n))
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::dvector;

    use super::*;

    fn trajectory(values: &[f64]) -> Trajectory<f64> {
        Trajectory::try_from(values).unwrap()
    }

    #[test]
    fn distance_to_optimum() {
        let t = trajectory(&[3.0, -1.0, 2.0]);
        assert_eq!(distance(t.values(), 1.0), dvector![2.0, 2.0, 1.0]);
    }

    #[test]
    fn normalize_by_initial() {
        let curve = dvector![10.0, 5.0, 1.0, 0.0];
        assert_eq!(normalize(&curve, curve[0]), dvector![1.0, 0.5, 0.1, 0.0]);
    }

    #[test]
    fn normalize_zero_reference() {
        let curve = dvector![0.0, 3.0, 1.0];
        assert_eq!(normalize(&curve, 0.0), dvector![0.0, 0.0, 0.0]);
    }

    #[test]
    fn trapezoidal() {
        let curve = dvector![1.0, 0.5, 0.1, 0.0, 0.0];
        assert_relative_eq!(area(&curve, Integration::Trapezoidal), 1.1, epsilon = 1e-12);

        let curve = dvector![1.0, 0.9, 0.8, 0.7, 0.6];
        assert_relative_eq!(area(&curve, Integration::Trapezoidal), 3.2, epsilon = 1e-12);
    }

    #[test]
    fn trapezoidal_single_sample() {
        assert_eq!(area(&dvector![1.0], Integration::Trapezoidal), 1.0);
        assert_eq!(area(&dvector![1.0, 1.0], Integration::Trapezoidal), 1.0);
        assert_eq!(area(&dvector![0.0], Integration::Trapezoidal), 0.0);
    }

    #[test]
    fn rectangular() {
        let curve = dvector![1.0, 0.5, 0.25];
        assert_eq!(area(&curve, Integration::Rectangular), 1.75);
    }

    #[test]
    fn linearly_weighted() {
        let curve = dvector![1.0, 0.5, 0.25];
        assert_eq!(area(&curve, Integration::LinearlyWeighted), 2.75);
    }

    #[test]
    fn align_hold_last() {
        let runs = [trajectory(&[3.0, 2.0, 1.0, 0.0]), trajectory(&[3.0, 1.5])];
        let aligned = align(&runs, Alignment::HoldLast);

        assert_eq!(aligned[0], dvector![3.0, 2.0, 1.0, 0.0]);
        assert_eq!(aligned[1], dvector![3.0, 1.5, 1.5, 1.5]);
    }

    #[test]
    fn align_truncate() {
        let runs = [trajectory(&[3.0, 2.0, 1.0, 0.0]), trajectory(&[3.0, 1.5])];
        let aligned = align(&runs, Alignment::Truncate);

        assert_eq!(aligned[0], dvector![3.0, 2.0]);
        assert_eq!(aligned[1], dvector![3.0, 1.5]);
    }

    #[test]
    fn align_nothing() {
        assert!(align::<f64>(&[], Alignment::HoldLast).is_empty());
    }

    #[test]
    fn mean_of_areas() {
        assert_relative_eq!(mean(&[1.0, 2.0, 6.0]).unwrap(), 3.0, epsilon = 1e-12);
        assert_eq!(mean(&[0.5, 2.0]), Some(1.25));
        assert_eq!(mean::<f64>(&[]), None);
    }

    #[test]
    fn mean_of_large_values() {
        assert_eq!(mean(&[f64::MAX, f64::MAX]), Some(f64::MAX));
    }
}
