#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod errors;
pub mod infra;
pub mod repos;
pub mod services;
pub mod telemetry;


// Re-exports for public API
pub use adapters::memory::InMemoryStore;
pub use adapters::sea_store::SeaStore;
pub use config::db::{DbKind, DbSettings};
pub use config::tournament::TournamentConfig;
pub use errors::{DomainError, ErrorCode};
pub use infra::db::connect_db;
pub use services::matches::MatchStatusService;
pub use services::policy::{AllowAll, ParticipantOrOwner};
pub use services::scheduling::{GeneratedSchedule, ScheduleService};
pub use services::scores::{AuditOutcome, ScoreCoordinator, ScoreReceipt, ScoreSubmission};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
