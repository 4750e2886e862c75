//! Repository traits: the store-facing seam of the core.
//!
//! Services depend on these traits only, so the same logic runs against the
//! sea-orm store (`crate::adapters::sea_store`) or the in-memory store
//! (`crate::adapters::memory`).

pub mod audit;
pub mod matches;
pub mod players;
pub mod policy;
pub mod tournaments;

pub use audit::{AuditLog, AuditSink};
pub use matches::MatchRepo;
pub use players::PlayerRepo;
pub use policy::MatchEditPolicy;
pub use tournaments::TournamentRepo;
