//! Error codes for the courtside core.
//!
//! Every `DomainError` maps to exactly one code here; surrounding services
//! forward them verbatim. Add new codes here; never pass ad-hoc strings.
//!
//! All error codes are SCREAMING_SNAKE_CASE.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Capacity & configuration
    /// Roster outside the schedulable range
    RosterSize,
    /// Invalid tournament configuration
    ConfigError,

    // Validation
    /// Score failed one or more rules
    InvalidScore,
    /// Same player listed twice in a roster
    DuplicatePlayer,
    /// Partnership pairs a player with themselves
    SelfPartnership,
    /// Invalid email address
    InvalidEmail,
    /// Empty or oversized display name
    InvalidDisplayName,
    /// Match status change not allowed from the current status
    InvalidStatusTransition,
    /// General validation error
    ValidationError,

    // Authorization
    /// Actor may not edit the match
    PermissionDenied,

    // Not found
    PlayerNotFound,
    PartnershipNotFound,
    MatchNotFound,
    CourtNotFound,
    NotFound,

    // Conflicts
    /// Version mismatch on a conditional write
    OptimisticLock,
    /// Email already registered
    UniqueEmail,
    /// Partnership already exists in the tournament
    DuplicatePartnership,
    /// Court number already used in the tournament
    DuplicateCourt,
    Conflict,

    // Infrastructure
    DbError,
    DbUnavailable,
    DbTimeout,
    DataCorruption,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RosterSize => "ROSTER_SIZE",
            Self::ConfigError => "CONFIG_ERROR",

            Self::InvalidScore => "INVALID_SCORE",
            Self::DuplicatePlayer => "DUPLICATE_PLAYER",
            Self::SelfPartnership => "SELF_PARTNERSHIP",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidDisplayName => "INVALID_DISPLAY_NAME",
            Self::InvalidStatusTransition => "INVALID_STATUS_TRANSITION",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::PermissionDenied => "PERMISSION_DENIED",

            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::PartnershipNotFound => "PARTNERSHIP_NOT_FOUND",
            Self::MatchNotFound => "MATCH_NOT_FOUND",
            Self::CourtNotFound => "COURT_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::UniqueEmail => "UNIQUE_EMAIL",
            Self::DuplicatePartnership => "DUPLICATE_PARTNERSHIP",
            Self::DuplicateCourt => "DUPLICATE_COURT",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }

    /// Whether the caller may retry after re-reading current state.
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::OptimisticLock | Self::DbUnavailable | Self::DbTimeout
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
