pub mod courts;
pub mod matches;
pub mod partnerships;
pub mod players;
pub mod score_changes;
