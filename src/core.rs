//! Core data model.
//!
//! *Users* supply [trajectories](Trajectory) of their optimization runs,
//! grouped by the algorithm identity into [run groups](RunGroup). The
//! direction of the optimization is described by [`Sense`].

mod group;
mod sense;
mod trajectory;

pub use group::*;
pub use sense::*;
pub use trajectory::*;
