//! Convergence speed over the change periods of a dynamic problem.
//!
//! In dynamic optimization the optimum of the problem changes over time. The
//! generations of one run are split into *change periods*, each of them with
//! its own known global optimum. The convergence speed of an algorithm is
//! evaluated per period relative to the worst fitness that any of the compared
//! algorithms achieved in that period, and averaged over the periods.
//!
//! Unlike [`compute_rcs`](crate::compute_rcs), the score produced here is
//! **lower-is-better**: an algorithm that sits on the optimum in every
//! generation scores 0 and an algorithm that is stuck at the worst fitness of
//! every period scores 1.
//!
//! # References
//!
//! \[1\] Almuth Meier and Oliver Kramer: Prediction with Recurrent Neural
//! Networks in Evolutionary Dynamic Optimization, EvoApplications 2018.

use std::{collections::BTreeMap, ops::Range};

use getset::{CopyGetters, Setters};
use log::debug;
use nalgebra::{DVector, RealField};
use thiserror::Error;

use crate::{
    core::Sense,
    curve::{self, Integration},
};

/// Error returned from [`period_convergence_speed`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// No change periods were given.
    #[error("no change periods")]
    NoPeriods,
    /// A change period has no generations.
    #[error("change period {period} has no generations")]
    EmptyPeriod {
        /// Index of the period.
        period: usize,
    },
    /// There is no optimum for a change period.
    #[error("no global optimum for change period {period}")]
    MissingOptimum {
        /// Index of the period.
        period: usize,
    },
    /// The optimum of a change period is NaN or infinite.
    #[error("non-finite input: optimum of change period {period}")]
    NonFiniteOptimum {
        /// Index of the period.
        period: usize,
    },
    /// No algorithms were given.
    #[error("no data supplied")]
    NoData,
    /// A fitness value is NaN or infinite.
    #[error("non-finite input: algorithm `{algorithm}`, generation {generation}")]
    NonFinite {
        /// Algorithm identity.
        algorithm: String,
        /// Index of the generation.
        generation: usize,
    },
    /// The worst fitness in a period is better than its global optimum, so the
    /// optimum cannot be correct.
    #[error("global optimum of change period {period} is worse than the worst fitness")]
    OptimumWorseThanWorst {
        /// Index of the period.
        period: usize,
    },
    /// An algorithm found a fitness better than the global optimum.
    #[error("algorithm `{algorithm}` is better than the global optimum in generation {generation}")]
    FoundBetterThanOptimum {
        /// Algorithm identity.
        algorithm: String,
        /// Index of the generation.
        generation: usize,
    },
    /// The area under the distance curve of a period overflowed.
    #[error("algorithm `{algorithm}`, change period {period}: non-finite area")]
    NonFiniteArea {
        /// Algorithm identity.
        algorithm: String,
        /// Index of the period.
        period: usize,
    },
    /// The first period to evaluate for an algorithm is past the last period.
    #[error("no change period left to evaluate for algorithm `{algorithm}`")]
    NoEvaluatedPeriods {
        /// Algorithm identity.
        algorithm: String,
    },
}

/// Change periods of a dynamic problem together with their global optima.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangePeriods<T: RealField + Copy> {
    periods: Vec<Range<usize>>,
    optima: Vec<T>,
}

impl<T: RealField + Copy> ChangePeriods<T> {
    /// Creates the periods from generation ranges and optimum fitness values.
    ///
    /// The list of optima may be longer than the list of periods (e.g., when
    /// it holds the optima of all changes in a data set, but only some of them
    /// were used in the experiment). The extra values are ignored.
    pub fn new(periods: Vec<Range<usize>>, mut optima: Vec<T>) -> Result<Self, PeriodError> {
        if periods.is_empty() {
            return Err(PeriodError::NoPeriods);
        }

        if let Some(period) = periods.iter().position(|range| range.is_empty()) {
            return Err(PeriodError::EmptyPeriod { period });
        }

        if optima.len() < periods.len() {
            return Err(PeriodError::MissingOptimum {
                period: optima.len(),
            });
        }

        optima.truncate(periods.len());

        if let Some(period) = optima.iter().position(|v| !v.is_finite()) {
            return Err(PeriodError::NonFiniteOptimum { period });
        }

        Ok(Self { periods, optima })
    }

    /// Creates consecutive periods of given lengths, starting at generation 0.
    pub fn contiguous(lengths: &[usize], optima: Vec<T>) -> Result<Self, PeriodError> {
        let mut start = 0;
        let periods = lengths
            .iter()
            .map(|len| {
                let range = start..start + len;
                start += len;
                range
            })
            .collect();

        Self::new(periods, optima)
    }

    /// Gets the number of periods.
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Always returns `false`, there is at least one period.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Gets the generation ranges.
    pub fn periods(&self) -> &[Range<usize>] {
        &self.periods
    }

    /// Gets the global optima, one per period.
    pub fn optima(&self) -> &[T] {
        &self.optima
    }

    /// Number of generations a run must have to cover all periods.
    pub fn generations(&self) -> usize {
        self.periods
            .iter()
            .map(|range| range.end)
            .max()
            .unwrap_or_default()
    }
}

/// Options for [`period_convergence_speed`].
#[derive(Debug, Clone, CopyGetters, Setters)]
pub struct PeriodOptions {
    /// Direction of the optimization. Default: minimization.
    #[getset(get_copy = "pub", set = "pub")]
    sense: Sense,
    /// Rule for the area under the distance curve of a period. Default:
    /// linearly weighted (see [`Integration`]).
    #[getset(get_copy = "pub", set = "pub")]
    integration: Integration,
    first_periods: BTreeMap<String, usize>,
}

impl Default for PeriodOptions {
    fn default() -> Self {
        Self {
            sense: Sense::Minimize,
            integration: Integration::LinearlyWeighted,
            first_periods: BTreeMap::new(),
        }
    }
}

impl PeriodOptions {
    /// Evaluates the algorithm only from given period on.
    ///
    /// Useful for prediction-based algorithms that need a few periods to
    /// collect training data before their predictor is available.
    pub fn with_first_period(mut self, algorithm: impl Into<String>, period: usize) -> Self {
        self.first_periods.insert(algorithm.into(), period);
        self
    }

    /// Gets the first evaluated period of the algorithm. Default: 0.
    pub fn first_period(&self, algorithm: &str) -> usize {
        self.first_periods.get(algorithm).copied().unwrap_or(0)
    }
}

/// Computes the convergence speed of each algorithm over the change periods
/// of one run.
///
/// The input maps the algorithm identity to the best found fitness in every
/// generation. If the series of an algorithm does not cover all generations of
/// the periods (the run was not executed), its score is `None`. Otherwise the
/// score lies in `[0, 1]`, 0 is the best.
pub fn period_convergence_speed<T, I, K, V>(
    periods: &ChangePeriods<T>,
    best_found: I,
    options: &PeriodOptions,
) -> Result<BTreeMap<String, Option<T>>, PeriodError>
where
    T: RealField + Copy,
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: AsRef<[T]>,
{
    let series = best_found
        .into_iter()
        .map(|(name, values)| (name.into(), values.as_ref().to_vec()))
        .collect::<BTreeMap<String, Vec<T>>>();

    if series.is_empty() {
        return Err(PeriodError::NoData);
    }

    for (name, values) in &series {
        if let Some(generation) = values.iter().position(|v| !v.is_finite()) {
            return Err(PeriodError::NonFinite {
                algorithm: name.clone(),
                generation,
            });
        }
    }

    for name in options.first_periods.keys() {
        if !series.contains_key(name) {
            debug!(
                "algorithm {}: first period given, but the algorithm is not in the input",
                name
            );
        }
    }

    let sense = options.sense;
    let worst = worst_per_period(periods, &series, sense)?;

    series
        .iter()
        .map(|(name, values)| -> Result<(String, Option<T>), PeriodError> {
            let speed = if values.len() < periods.generations() {
                debug!(
                    "algorithm {}: {} of {} generations, run not executed",
                    name,
                    values.len(),
                    periods.generations()
                );
                None
            } else {
                Some(period_speed(name, values, periods, &worst, options)?)
            };

            Ok((name.clone(), speed))
        })
        .collect()
}

// The worst fitness any algorithm achieved in each period. `None` for a period
// that no series covers.
fn worst_per_period<T: RealField + Copy>(
    periods: &ChangePeriods<T>,
    series: &BTreeMap<String, Vec<T>>,
    sense: Sense,
) -> Result<Vec<Option<T>>, PeriodError> {
    periods
        .periods()
        .iter()
        .zip(periods.optima().iter())
        .enumerate()
        .map(|(period, (range, optimum))| {
            let worst = series
                .values()
                .flat_map(|values| {
                    // Series of runs that were not executed may end early.
                    let end = range.end.min(values.len());
                    let start = range.start.min(end);
                    &values[start..end]
                })
                .copied()
                .reduce(|a, b| sense.worst(a, b));

            match worst {
                Some(worst) if sense.is_better(worst, *optimum) => {
                    Err(PeriodError::OptimumWorseThanWorst { period })
                }
                _ => Ok(worst),
            }
        })
        .collect()
}

fn period_speed<T: RealField + Copy>(
    name: &str,
    values: &[T],
    periods: &ChangePeriods<T>,
    worst: &[Option<T>],
    options: &PeriodOptions,
) -> Result<T, PeriodError> {
    let first = options.first_period(name);
    let mut areas = Vec::with_capacity(periods.len());

    for (period, (range, optimum)) in periods
        .periods()
        .iter()
        .zip(periods.optima().iter().copied())
        .enumerate()
        .skip(first)
    {
        let found = &values[range.clone()];

        if let Some(offset) = found
            .iter()
            .position(|v| options.sense.is_better(*v, optimum))
        {
            return Err(PeriodError::FoundBetterThanOptimum {
                algorithm: name.to_string(),
                generation: range.start + offset,
            });
        }

        // The series covers the period, so there is a worst value.
        let worst = worst[period].unwrap_or(optimum);

        let distance = curve::distance(&DVector::from_column_slice(found), optimum);
        let max_distance = DVector::from_element(found.len(), (worst - optimum).abs());

        let area = curve::area(&distance, options.integration);
        let max_area = curve::area(&max_distance, options.integration);

        if !area.is_finite() || !max_area.is_finite() {
            return Err(PeriodError::NonFiniteArea {
                algorithm: name.to_string(),
                period,
            });
        }

        if max_area == T::zero() {
            // All algorithms had the optimum in every generation of the period.
            areas.push(T::zero());
        } else {
            areas.push(area / max_area);
        }
    }

    let speed = curve::mean(&areas).ok_or_else(|| PeriodError::NoEvaluatedPeriods {
        algorithm: name.to_string(),
    })?;

    debug!(
        "algorithm {}: convergence speed = {} over {} periods",
        name,
        speed,
        areas.len()
    );

    Ok(speed)
}
