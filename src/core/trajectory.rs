use nalgebra::{DVector, RealField};
use thiserror::Error;

use super::sense::Sense;

/// Error encountered while validating a trajectory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrajectoryError {
    /// The trajectory has no values.
    #[error("empty trajectory")]
    Empty,
    /// An invalid value (NaN, positive or negative infinity) occurred.
    #[error("non-finite input at iteration {index}")]
    NonFinite {
        /// Index of the first offending value.
        index: usize,
    },
}

/// Best objective value found up to each iteration of a single optimization
/// run.
///
/// A trajectory always holds at least one value and all its values are finite.
/// Both are checked on construction and the trajectory is immutable afterwards.
/// The values are typically non-increasing for minimization (non-decreasing
/// for maximization), but this is not required.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory<T: RealField + Copy> {
    values: DVector<T>,
}

impl<T: RealField + Copy> Trajectory<T> {
    /// Creates a trajectory from given values.
    pub fn new(values: Vec<T>) -> Result<Self, TrajectoryError> {
        if values.is_empty() {
            return Err(TrajectoryError::Empty);
        }

        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(TrajectoryError::NonFinite { index });
        }

        Ok(Self {
            values: DVector::from_vec(values),
        })
    }

    /// Creates a trajectory from raw per-iteration samples by keeping the best
    /// value seen so far at each iteration.
    pub fn best_so_far(samples: Vec<T>, sense: Sense) -> Result<Self, TrajectoryError> {
        let trajectory = Self::new(samples)?;
        Ok(trajectory.envelope(sense))
    }

    /// Returns the best-so-far envelope of the trajectory.
    ///
    /// The envelope is monotonic in the direction given by `sense`, so any
    /// noise that makes the trajectory temporarily worse is removed.
    pub fn envelope(&self, sense: Sense) -> Self {
        let mut best = self.values[0];
        let values = self.values.map(|v| {
            best = sense.best(best, v);
            best
        });

        Self { values }
    }

    /// Gets the number of iterations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always returns `false`, a trajectory cannot be empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Gets the value in the first iteration.
    pub fn first(&self) -> T {
        self.values[0]
    }

    /// Gets the value in the last iteration.
    pub fn last(&self) -> T {
        self.values[self.values.len() - 1]
    }

    /// Gets the values.
    pub fn values(&self) -> &DVector<T> {
        &self.values
    }

    /// Gets the values as a slice.
    pub fn as_slice(&self) -> &[T] {
        self.values.as_slice()
    }
}

impl<T: RealField + Copy> AsRef<[T]> for Trajectory<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: RealField + Copy> TryFrom<Vec<T>> for Trajectory<T> {
    type Error = TrajectoryError;

    fn try_from(values: Vec<T>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl<T: RealField + Copy> TryFrom<&[T]> for Trajectory<T> {
    type Error = TrajectoryError;

    fn try_from(values: &[T]) -> Result<Self, Self::Error> {
        Self::new(values.to_vec())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn valid() {
        let t = Trajectory::new(vec![10.0, 5.0, 1.0]).unwrap();
        assert_eq!(t.len(), 3);
        assert_eq!(t.first(), 10.0);
        assert_eq!(t.last(), 1.0);
        assert_eq!(t.as_slice(), &[10.0, 5.0, 1.0]);
    }

    #[test]
    fn empty() {
        assert_eq!(
            Trajectory::<f64>::new(Vec::new()),
            Err(TrajectoryError::Empty)
        );
    }

    #[test]
    fn non_finite() {
        assert_eq!(
            Trajectory::new(vec![1.0, f64::NAN]),
            Err(TrajectoryError::NonFinite { index: 1 })
        );
        assert_eq!(
            Trajectory::new(vec![f64::NEG_INFINITY, 1.0]),
            Err(TrajectoryError::NonFinite { index: 0 })
        );
    }

    #[test]
    fn envelope_minimize() {
        let t = Trajectory::best_so_far(vec![5.0, 3.0, 4.0, 1.0, 2.0], Sense::Minimize).unwrap();
        assert_eq!(t.as_slice(), &[5.0, 3.0, 3.0, 1.0, 1.0]);
    }

    #[test]
    fn envelope_maximize() {
        let t = Trajectory::best_so_far(vec![1.0, 3.0, 2.0, 4.0], Sense::Maximize).unwrap();
        assert_eq!(t.as_slice(), &[1.0, 3.0, 3.0, 4.0]);
    }

    #[test]
    fn from_slice() {
        let values = [2.0f32, 1.0];
        let t = Trajectory::try_from(&values[..]).unwrap();
        assert_eq!(t.as_slice(), &values);
    }
}
