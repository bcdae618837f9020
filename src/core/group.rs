use nalgebra::RealField;

use super::trajectory::Trajectory;

/// A named collection of trajectories of one algorithm on one problem
/// instance.
///
/// Each trajectory corresponds to one independent run. The runs are averaged
/// to reduce run-to-run noise before algorithms are compared.
#[derive(Debug, Clone, PartialEq)]
pub struct RunGroup<T: RealField + Copy> {
    name: String,
    runs: Vec<Trajectory<T>>,
}

impl<T: RealField + Copy> RunGroup<T> {
    /// Creates a group with no runs.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            runs: Vec::new(),
        }
    }

    /// Creates a group with given runs.
    pub fn with_runs(name: impl Into<String>, runs: Vec<Trajectory<T>>) -> Self {
        Self {
            name: name.into(),
            runs,
        }
    }

    /// Adds a run to the group.
    pub fn push(&mut self, run: Trajectory<T>) {
        self.runs.push(run);
    }

    /// Gets the algorithm identity.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the runs.
    pub fn runs(&self) -> &[Trajectory<T>] {
        &self.runs
    }

    /// Gets the number of runs.
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Returns `true` if the group has no runs.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Length of the shortest run, `None` for an empty group.
    pub fn shortest(&self) -> Option<usize> {
        self.runs.iter().map(Trajectory::len).min()
    }

    /// Length of the longest run, `None` for an empty group.
    pub fn longest(&self) -> Option<usize> {
        self.runs.iter().map(Trajectory::len).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths() {
        let mut group = RunGroup::new("ga");
        assert!(group.is_empty());
        assert_eq!(group.shortest(), None);

        group.push(Trajectory::new(vec![3.0, 2.0, 1.0]).unwrap());
        group.push(Trajectory::new(vec![3.0, 2.0]).unwrap());

        assert_eq!(group.name(), "ga");
        assert_eq!(group.len(), 2);
        assert_eq!(group.shortest(), Some(2));
        assert_eq!(group.longest(), Some(3));
    }
}
