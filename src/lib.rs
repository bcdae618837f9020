#![warn(missing_docs)]

//! # RCS
//!
//! Relative convergence speed (RCS) of optimization algorithms on benchmark
//! problems with a known global optimum.
//!
//! When evolutionary or other iterative optimization algorithms are compared,
//! the final objective value is often not enough: two algorithms may both
//! reach the optimum, but one of them much sooner than the other. RCS
//! summarizes the whole convergence curve into a single number that compares
//! the algorithms relative to each other.
//!
//! ## Metric
//!
//! For every run of an algorithm, the *trajectory* of the best objective value
//! found up to each iteration is recorded. The metric then
//!
//! 1. computes the distance to the optimum `d[i] = |v[i] - f*|`,
//! 2. normalizes the distance curve so that it starts at 1 (a run that starts
//!    at the optimum has an all-zero curve),
//! 3. computes the area under the normalized curve (trapezoidal rule by
//!    default),
//! 4. averages the areas over the runs of the algorithm,
//! 5. rescales the averaged areas to `[0, 1]` relative to the slowest
//!    algorithm:
//!
//! ```text
//! score(A) = (A_max - A) / (A_max - A_min)
//! ```
//!
//! The slowest algorithm thus always scores exactly 0 and the fastest always
//! scores exactly 1. If all algorithms have the same area, all of them score 1.
//!
//! ## Usage
//!
//! ```rust
//! use std::collections::BTreeMap;
//!
//! use rcs::{compute_rcs_with_options, Alignment, RcsOptions};
//!
//! let mut trajectories = BTreeMap::new();
//! trajectories.insert("ga", vec![vec![10.0, 5.0, 1.0, 0.0], vec![10.0, 4.0, 0.5]]);
//! trajectories.insert("pso", vec![vec![10.0, 9.0, 8.0, 7.0]]);
//!
//! let mut options = RcsOptions::default();
//! options.set_alignment(Alignment::Truncate);
//!
//! let result = compute_rcs_with_options(trajectories, 0.0, &options)?;
//!
//! assert_eq!(result.best(), "ga");
//! assert_eq!(result.score("pso"), Some(0.0));
//!
//! for (algorithm, area) in result.areas() {
//!     println!("{}: area = {}", algorithm, area);
//! }
//! # Ok::<(), rcs::RcsError>(())
//! ```
//!
//! The computation is a pure function of its input. It either succeeds for
//! all algorithms or fails with an [`RcsError`] naming the cause (and the
//! algorithm and run, if a trajectory is malformed).
//!
//! For dynamic optimization problems, where the optimum changes over time,
//! see the [period] module.
//!
//! ## License
//!
//! Licensed under MIT.

mod core;
pub mod curve;
pub mod period;
pub mod rcs;

pub use crate::core::*;
pub use crate::curve::{Alignment, Integration, Normalization};
pub use crate::period::{period_convergence_speed, ChangePeriods, PeriodError, PeriodOptions};
pub use crate::rcs::{
    compute_rcs, compute_rcs_of_groups, compute_rcs_with_options, RcsError, RcsOptions, RcsResult,
};

#[cfg(feature = "testing")]
pub mod testing;

#[cfg(not(feature = "testing"))]
pub(crate) mod testing;

pub use nalgebra;
