//! Domain layer: pure tournament logic types and helpers.

pub mod audit;
pub mod courts;
pub mod ids;
pub mod matches;
pub mod partnerships;
pub mod players;
pub mod rounds;
pub mod schedule;
pub mod scoring;
pub mod status;

#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_partnerships;
#[cfg(test)]
mod tests_props_schedule;

// Re-exports for ergonomics
pub use audit::{ScoreChange, ScoreChangeRecord};
pub use courts::{court_drafts, Court, CourtDraft};
pub use ids::{CourtId, MatchId, PartnershipId, PlayerId, ScoreChangeId, TournamentId};
pub use matches::{Match, MatchScore, ScoreUpdate, StatusUpdate};
pub use partnerships::{check_drafts, generate_partnerships, Partnership, PartnershipDraft};
pub use players::{NewPlayer, Player};
pub use rounds::{group_by_round, Round};
pub use schedule::{build_schedule, RoundPacking, Schedule, ScheduledMatch};
pub use scoring::{
    common_scores, determine_winner, validate_score, ScoreIssue, ScoreValidation, ScoreWarning,
    ScoringRules, Team, WinCondition,
};
pub use status::MatchStatus;
