//! Orchestration over the repository traits.

pub mod matches;
pub mod policy;
pub mod roster;
pub mod scheduling;
pub mod scores;
