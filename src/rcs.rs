//! Relative convergence speed of several algorithms.
//!
//! Every trajectory is turned into a normalized distance-to-optimum curve and
//! the area under the curve is computed (see [curve](crate::curve) module).
//! The areas of all runs of one algorithm are averaged. Finally, the averaged
//! areas are rescaled relative to the slowest algorithm: the algorithm with
//! the largest area scores exactly 0, the algorithm with the smallest area
//! scores exactly 1 and the others lie in between.
//!
//! ```rust
//! use std::collections::BTreeMap;
//!
//! let mut trajectories = BTreeMap::new();
//! trajectories.insert("a", vec![vec![10.0, 5.0, 1.0, 0.0, 0.0]]);
//! trajectories.insert("b", vec![vec![10.0, 9.0, 8.0, 7.0, 6.0]]);
//!
//! let result = rcs::compute_rcs(trajectories, 0.0).expect("valid input");
//!
//! assert_eq!(result.score("a"), Some(1.0));
//! assert_eq!(result.score("b"), Some(0.0));
//! assert_eq!(result.best(), "a");
//! ```
//!
//! The metric uses absolute distances to the optimum, so it works the same way
//! for minimization and maximization problems. Trajectories are not required
//! to be monotonic; if the noise should be removed, enable the best-so-far
//! [envelope](RcsOptions::set_envelope).

use std::collections::{BTreeMap, BTreeSet};

use getset::{CopyGetters, Getters, Setters};
use log::debug;
use nalgebra::RealField;
use thiserror::Error;

use crate::{
    core::{RunGroup, Sense, Trajectory, TrajectoryError},
    curve::{self, Alignment, Integration, Normalization},
};

/// Options for the computation of the relative convergence speed.
#[derive(Debug, Clone, Default, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct RcsOptions {
    /// Scaling of the distance curves. Default: initial distance (see
    /// [`Normalization`]).
    normalization: Normalization,
    /// Rule for the area under the curve. Default: trapezoidal (see
    /// [`Integration`]).
    integration: Integration,
    /// Policy for runs of different lengths within one algorithm. Default:
    /// hold last value (see [`Alignment`]).
    alignment: Alignment,
    /// Replace every trajectory by its best-so-far envelope before the
    /// computation. Default: `false`.
    envelope: bool,
    /// Direction of the optimization, used only for the envelope. Default:
    /// minimization.
    sense: Sense,
}

/// Error returned from the computation of the relative convergence speed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RcsError {
    /// No algorithms were given.
    #[error("no data supplied")]
    NoData,
    /// Less than two algorithms were given, there is nothing to compare with.
    #[error("relative metric requires >=2 algorithms, got {0}")]
    NotEnoughAlgorithms(usize),
    /// An algorithm has no runs.
    #[error("algorithm `{0}` has no runs")]
    NoRuns(String),
    /// The same algorithm was given in more than one run group.
    #[error("algorithm `{0}` is given more than once")]
    DuplicateAlgorithm(String),
    /// The optimum is NaN or infinite.
    #[error("non-finite input: optimum")]
    NonFiniteOptimum,
    /// A trajectory is malformed.
    #[error("algorithm `{algorithm}`, run {run}: {source}")]
    InvalidTrajectory {
        /// Algorithm identity.
        algorithm: String,
        /// Index of the run within the algorithm.
        run: usize,
        /// The validation failure.
        #[source]
        source: TrajectoryError,
    },
    /// The area under the normalized distance curve of a run overflowed.
    ///
    /// This happens for finite values whose distances to the optimum span too
    /// many orders of magnitude to be represented in the scalar type.
    #[error("algorithm `{algorithm}`, run {run}: non-finite area")]
    NonFiniteArea {
        /// Algorithm identity.
        algorithm: String,
        /// Index of the run within the algorithm.
        run: usize,
    },
}

impl RcsError {
    /// Returns `true` if the error is caused by malformed values.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            RcsError::NonFiniteOptimum
                | RcsError::InvalidTrajectory { .. }
                | RcsError::NonFiniteArea { .. }
        )
    }

    /// Returns `true` if the data are insufficient for a relative comparison,
    /// even though they may be well-formed.
    pub fn is_configuration(&self) -> bool {
        !self.is_validation()
    }
}

/// Relative convergence speed of a set of algorithms.
///
/// All maps are keyed by the algorithm identity.
#[derive(Debug, Clone, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct RcsResult<T: RealField + Copy> {
    /// Score in `[0, 1]`. The fastest algorithm has 1, the slowest has 0.
    scores: BTreeMap<String, T>,
    /// Area under the normalized distance curve, averaged over runs.
    areas: BTreeMap<String, T>,
    /// Area under the normalized distance curve of every run.
    run_areas: BTreeMap<String, Vec<T>>,
    /// The algorithm with the smallest area.
    best: String,
    /// The algorithm with the largest area.
    worst: String,
}

impl<T: RealField + Copy> RcsResult<T> {
    /// Gets the score of an algorithm.
    pub fn score(&self, algorithm: &str) -> Option<T> {
        self.scores.get(algorithm).copied()
    }

    /// Gets the averaged area of an algorithm.
    pub fn area(&self, algorithm: &str) -> Option<T> {
        self.areas.get(algorithm).copied()
    }
}

/// Computes the relative convergence speed with default options.
///
/// See [`compute_rcs_with_options`].
pub fn compute_rcs<T, I, K, R>(trajectories: I, optimum: T) -> Result<RcsResult<T>, RcsError>
where
    T: RealField + Copy,
    I: IntoIterator<Item = (K, R)>,
    K: Into<String>,
    R: IntoIterator,
    R::Item: AsRef<[T]>,
{
    compute_rcs_with_options(trajectories, optimum, &RcsOptions::default())
}

/// Computes the relative convergence speed.
///
/// The input maps the algorithm identity to one or more trajectories
/// (independent runs). Trajectories given under the same identity are merged
/// into one run group. The `optimum` is the known global optimum of the
/// problem.
///
/// Runs of different lengths are aligned only within one algorithm (see
/// [`Alignment`]). Across algorithms the curves keep their own lengths, so the
/// area of an algorithm with longer trajectories is taken over more
/// iterations. For comparable areas, give all algorithms trajectories of the
/// same length (e.g., the same evaluation budget).
///
/// The computation either succeeds for all algorithms or fails as a whole.
pub fn compute_rcs_with_options<T, I, K, R>(
    trajectories: I,
    optimum: T,
    options: &RcsOptions,
) -> Result<RcsResult<T>, RcsError>
where
    T: RealField + Copy,
    I: IntoIterator<Item = (K, R)>,
    K: Into<String>,
    R: IntoIterator,
    R::Item: AsRef<[T]>,
{
    let mut raw: BTreeMap<String, Vec<Vec<T>>> = BTreeMap::new();
    for (name, runs) in trajectories {
        raw.entry(name.into())
            .or_default()
            .extend(runs.into_iter().map(|run| run.as_ref().to_vec()));
    }

    check_count(raw.len())?;
    check_optimum(optimum)?;

    let groups = raw
        .into_iter()
        .map(|(name, runs)| -> Result<RunGroup<T>, RcsError> {
            let runs = runs
                .into_iter()
                .enumerate()
                .map(|(run, values)| {
                    Trajectory::new(values).map_err(|source| RcsError::InvalidTrajectory {
                        algorithm: name.clone(),
                        run,
                        source,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            Ok(RunGroup::with_runs(name, runs))
        })
        .collect::<Result<Vec<_>, _>>()?;

    compute_rcs_of_groups(&groups, optimum, options)
}

/// Computes the relative convergence speed of already validated run groups.
pub fn compute_rcs_of_groups<T: RealField + Copy>(
    groups: &[RunGroup<T>],
    optimum: T,
    options: &RcsOptions,
) -> Result<RcsResult<T>, RcsError> {
    check_count(groups.len())?;
    check_optimum(optimum)?;

    let mut names = BTreeSet::new();
    for group in groups {
        if group.is_empty() {
            return Err(RcsError::NoRuns(group.name().to_string()));
        }

        if !names.insert(group.name()) {
            return Err(RcsError::DuplicateAlgorithm(group.name().to_string()));
        }
    }

    // Distance curves for all groups first, global normalization needs the
    // largest distance overall.
    let distances = groups
        .iter()
        .map(|group| {
            let aligned = if options.envelope {
                let runs = group
                    .runs()
                    .iter()
                    .map(|run| run.envelope(options.sense))
                    .collect::<Vec<_>>();
                curve::align(&runs, options.alignment)
            } else {
                curve::align(group.runs(), options.alignment)
            };

            aligned
                .iter()
                .map(|values| curve::distance(values, optimum))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let global = distances
        .iter()
        .flatten()
        .flat_map(|d| d.iter().copied())
        .fold(T::zero(), |max, d| max.max(d));

    let mut run_areas = BTreeMap::new();
    let mut areas = BTreeMap::new();

    for (group, curves) in groups.iter().zip(distances.iter()) {
        let per_run = curves
            .iter()
            .enumerate()
            .map(|(run, d)| -> Result<T, RcsError> {
                let reference = match options.normalization {
                    Normalization::Initial => d[0],
                    Normalization::Global => global,
                };

                if reference == T::zero() {
                    debug!(
                        "algorithm {}: zero reference distance, taking the curve as all zeros",
                        group.name()
                    );
                }

                let area = curve::area(&curve::normalize(d, reference), options.integration);

                if area.is_finite() {
                    Ok(area)
                } else {
                    debug!(
                        "algorithm {}, run {}: area {} with reference {}",
                        group.name(),
                        run,
                        area,
                        reference
                    );
                    Err(RcsError::NonFiniteArea {
                        algorithm: group.name().to_string(),
                        run,
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Groups are never empty here.
        let area = curve::mean(&per_run).unwrap_or_else(T::zero);

        debug!(
            "algorithm {}: area = {} over {} runs of length {}",
            group.name(),
            area,
            per_run.len(),
            curves.first().map(|d| d.len()).unwrap_or_default()
        );

        areas.insert(group.name().to_string(), area);
        run_areas.insert(group.name().to_string(), per_run);
    }

    let (best, worst) = extremes(&areas);
    let a_min = areas[&best];
    let a_max = areas[&worst];

    let scores = if a_max == a_min {
        debug!("all algorithms have area {}, scoring all with 1", a_max);
        areas.keys().map(|name| (name.clone(), T::one())).collect()
    } else {
        let range = a_max - a_min;
        areas
            .iter()
            .map(|(name, area)| (name.clone(), (a_max - *area) / range))
            .collect()
    };

    Ok(RcsResult {
        scores,
        areas,
        run_areas,
        best,
        worst,
    })
}

fn check_count(count: usize) -> Result<(), RcsError> {
    match count {
        0 => Err(RcsError::NoData),
        1 => Err(RcsError::NotEnoughAlgorithms(1)),
        _ => Ok(()),
    }
}

fn check_optimum<T: RealField + Copy>(optimum: T) -> Result<(), RcsError> {
    if optimum.is_finite() {
        Ok(())
    } else {
        Err(RcsError::NonFiniteOptimum)
    }
}

// Names of the algorithms with the smallest and the largest area. Ties are
// resolved in favor of the first name in order.
fn extremes<T: RealField + Copy>(areas: &BTreeMap<String, T>) -> (String, String) {
    let mut iter = areas.iter();
    let (first, first_area) = match iter.next() {
        Some(entry) => entry,
        None => return (String::new(), String::new()),
    };

    let mut best = (first, *first_area);
    let mut worst = (first, *first_area);

    for (name, area) in iter {
        if *area < best.1 {
            best = (name, *area);
        }

        if *area > worst.1 {
            worst = (name, *area);
        }
    }

    (best.0.clone(), worst.0.clone())
}
