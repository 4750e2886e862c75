//! Identifier aliases. All ids are store-generated 64-bit integers.

pub type PlayerId = i64;
pub type TournamentId = i64;
pub type PartnershipId = i64;
pub type CourtId = i64;
pub type MatchId = i64;
pub type ScoreChangeId = i64;
