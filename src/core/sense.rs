use nalgebra::RealField;

/// Direction of the optimization.
///
/// The distance-based metric itself does not depend on the direction, because
/// it works with absolute distances to the optimum. The direction matters when
/// a running best is taken ([`Trajectory::best_so_far`](super::Trajectory::best_so_far))
/// or when the worst fitness among several algorithms is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sense {
    /// Lower objective values are better.
    #[default]
    Minimize,
    /// Higher objective values are better.
    Maximize,
}

impl Sense {
    /// Returns `true` if `a` is strictly better than `b`.
    pub fn is_better<T: RealField + Copy>(self, a: T, b: T) -> bool {
        match self {
            Sense::Minimize => a < b,
            Sense::Maximize => a > b,
        }
    }

    /// Returns the better of two values.
    pub fn best<T: RealField + Copy>(self, a: T, b: T) -> T {
        if self.is_better(b, a) {
            b
        } else {
            a
        }
    }

    /// Returns the worse of two values.
    pub fn worst<T: RealField + Copy>(self, a: T, b: T) -> T {
        if self.is_better(b, a) {
            a
        } else {
            b
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn minimize() {
        assert!(Sense::Minimize.is_better(1.0, 2.0));
        assert!(!Sense::Minimize.is_better(2.0, 2.0));
        assert_eq!(Sense::Minimize.best(3.0, -1.0), -1.0);
        assert_eq!(Sense::Minimize.worst(3.0, -1.0), 3.0);
    }

    #[test]
    fn maximize() {
        assert!(Sense::Maximize.is_better(2.0, 1.0));
        assert_eq!(Sense::Maximize.best(3.0, -1.0), 3.0);
        assert_eq!(Sense::Maximize.worst(3.0, -1.0), -1.0);
    }

    #[test]
    fn default_is_minimize() {
        assert_eq!(Sense::default(), Sense::Minimize);
    }
}
