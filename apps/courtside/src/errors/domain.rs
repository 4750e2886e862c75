//! Domain-level error type used across services and adapters.
//!
//! This error type is transport- and DB-agnostic. Adapters translate
//! `sea_orm::DbErr` into it (see `crate::infra::db_errors`), and callers
//! decide how to surface each kind. `code()` yields a stable identifier for
//! every variant.

use thiserror::Error;

use crate::domain::scoring::ScoreIssue;
use crate::errors::ErrorCode;

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    DataCorruption,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Player,
    Partnership,
    Match,
    Court,
    Other(String),
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// Stored version no longer matches the version the writer read.
    OptimisticLock { expected: i32, actual: i32 },
    UniqueEmail,
    DuplicatePartnership,
    DuplicateCourt,
    Other(String),
}

/// Single-rule validation failures outside of score checking
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    DuplicatePlayer,
    SelfPartnership,
    InvalidEmail,
    InvalidDisplayName,
    InvalidStatusTransition,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Roster too small or too large to schedule
    #[error("capacity error: roster has {size} players, expected {min}..={max}")]
    Capacity { size: usize, min: usize, max: usize },
    /// Invalid tournament configuration (courts, target score, win condition)
    #[error("configuration error: {0}")]
    Configuration(String),
    /// Input or business rule violation
    #[error("validation error {0:?}: {1}")]
    Validation(ValidationKind, String),
    /// Score rejected; carries every violated rule
    #[error("invalid score: {}", join_issues(.0))]
    InvalidScore(Vec<ScoreIssue>),
    /// Semantic conflict
    #[error("conflict {0:?}: {1}")]
    Conflict(ConflictKind, String),
    /// Actor may not perform this operation
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    /// Missing resource in domain terms
    #[error("not found {0:?}: {1}")]
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures
    #[error("infra {0:?}: {1}")]
    Infra(InfraErrorKind, String),
}

fn join_issues(issues: &[ScoreIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl DomainError {
    pub fn configuration(detail: impl Into<String>) -> Self {
        Self::Configuration(detail.into())
    }
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn permission_denied(detail: impl Into<String>) -> Self {
        Self::PermissionDenied(detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// Version mismatch on a conditional write.
    pub fn optimistic_lock(expected: i32, actual: i32) -> Self {
        Self::Conflict(
            ConflictKind::OptimisticLock { expected, actual },
            format!(
                "Resource was modified concurrently (expected version {expected}, actual version {actual}). Please refresh and retry."
            ),
        )
    }

    /// True for the recoverable version-mismatch case; callers re-read and retry.
    pub fn is_concurrency_conflict(&self) -> bool {
        matches!(
            self,
            DomainError::Conflict(ConflictKind::OptimisticLock { .. }, _)
        )
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Capacity { .. } => ErrorCode::RosterSize,
            DomainError::Configuration(_) => ErrorCode::ConfigError,
            DomainError::Validation(kind, _) => match kind {
                ValidationKind::DuplicatePlayer => ErrorCode::DuplicatePlayer,
                ValidationKind::SelfPartnership => ErrorCode::SelfPartnership,
                ValidationKind::InvalidEmail => ErrorCode::InvalidEmail,
                ValidationKind::InvalidDisplayName => ErrorCode::InvalidDisplayName,
                ValidationKind::InvalidStatusTransition => ErrorCode::InvalidStatusTransition,
                ValidationKind::Other(_) => ErrorCode::ValidationError,
            },
            DomainError::InvalidScore(_) => ErrorCode::InvalidScore,
            DomainError::Conflict(kind, _) => match kind {
                ConflictKind::OptimisticLock { .. } => ErrorCode::OptimisticLock,
                ConflictKind::UniqueEmail => ErrorCode::UniqueEmail,
                ConflictKind::DuplicatePartnership => ErrorCode::DuplicatePartnership,
                ConflictKind::DuplicateCourt => ErrorCode::DuplicateCourt,
                ConflictKind::Other(_) => ErrorCode::Conflict,
            },
            DomainError::PermissionDenied(_) => ErrorCode::PermissionDenied,
            DomainError::NotFound(kind, _) => match kind {
                NotFoundKind::Player => ErrorCode::PlayerNotFound,
                NotFoundKind::Partnership => ErrorCode::PartnershipNotFound,
                NotFoundKind::Match => ErrorCode::MatchNotFound,
                NotFoundKind::Court => ErrorCode::CourtNotFound,
                NotFoundKind::Other(_) => ErrorCode::NotFound,
            },
            DomainError::Infra(kind, _) => match kind {
                InfraErrorKind::Timeout => ErrorCode::DbTimeout,
                InfraErrorKind::DbUnavailable => ErrorCode::DbUnavailable,
                InfraErrorKind::DataCorruption => ErrorCode::DataCorruption,
                InfraErrorKind::Other(_) => ErrorCode::DbError,
            },
        }
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        crate::infra::db_errors::map_db_err(e)
    }
}
