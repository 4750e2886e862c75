//! SeaORM -> DomainError translation.
//!
//! Adapters return `sea_orm::DbErr`; everything above them sees
//! `DomainError` through `From<DbErr>`, which lands here.

use tracing::{error, warn};

use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};

/// Prefix for the structured version-mismatch payload raised by adapters.
pub const OPTIMISTIC_LOCK_PREFIX: &str = "OPTIMISTIC_LOCK:";
/// Prefix for a missing match raised by adapters, followed by the id.
pub const MATCH_NOT_FOUND_PREFIX: &str = "MATCH_NOT_FOUND:";

/// `DbErr` carrying the expected and actual version of a failed CAS.
pub fn optimistic_lock_err(expected: i32, actual: i32) -> sea_orm::DbErr {
    sea_orm::DbErr::Custom(format!(
        "{OPTIMISTIC_LOCK_PREFIX}{{\"expected\":{expected},\"actual\":{actual}}}"
    ))
}

pub fn match_not_found_err(match_id: i64) -> sea_orm::DbErr {
    sea_orm::DbErr::Custom(format!("{MATCH_NOT_FOUND_PREFIX}{match_id}"))
}

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Pull `table.column` out of SQLite's "UNIQUE constraint failed: ..." text.
fn extract_sqlite_table_column(error_msg: &str) -> Option<&str> {
    let marker = "UNIQUE constraint failed: ";
    let start = error_msg.find(marker)? + marker.len();
    error_msg[start..]
        .split(|c: char| c.is_whitespace() || c == ',' || c == '"')
        .next()
        .filter(|s| !s.is_empty())
}

fn map_sqlite_table_column_to_conflict(table_column: &str) -> Option<(ConflictKind, &'static str)> {
    match table_column {
        "players.email" => Some((ConflictKind::UniqueEmail, "Email already registered")),
        "partnerships.tournament_id" | "partnerships.player1_id" | "partnerships.player2_id" => {
            Some((
                ConflictKind::DuplicatePartnership,
                "Partnership already exists for this tournament",
            ))
        }
        "courts.tournament_id" | "courts.number" => Some((
            ConflictKind::DuplicateCourt,
            "Court number already used in this tournament",
        )),
        _ => None,
    }
}

fn map_postgres_constraint_to_conflict(error_msg: &str) -> Option<(ConflictKind, &'static str)> {
    if error_msg.contains("players_email_key") || error_msg.contains("ux_players_email") {
        return Some((ConflictKind::UniqueEmail, "Email already registered"));
    }
    if error_msg.contains("ux_partnerships_tournament_pair") {
        return Some((
            ConflictKind::DuplicatePartnership,
            "Partnership already exists for this tournament",
        ));
    }
    if error_msg.contains("ux_courts_tournament_number") {
        return Some((
            ConflictKind::DuplicateCourt,
            "Court number already used in this tournament",
        ));
    }
    None
}

#[derive(serde::Deserialize)]
struct LockInfo {
    expected: i32,
    actual: i32,
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();

    match &e {
        sea_orm::DbErr::RecordNotFound(what) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), what.clone());
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with(MATCH_NOT_FOUND_PREFIX) => {
            let raw = &msg[MATCH_NOT_FOUND_PREFIX.len()..];
            return match raw.parse::<i64>() {
                Ok(match_id) => DomainError::not_found(
                    NotFoundKind::Match,
                    format!("Match {match_id} not found"),
                ),
                Err(_) => {
                    warn!(raw_error = %msg, "Failed to parse MATCH_NOT_FOUND error");
                    DomainError::not_found(NotFoundKind::Match, "Match not found")
                }
            };
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with(OPTIMISTIC_LOCK_PREFIX) => {
            let json_str = &msg[OPTIMISTIC_LOCK_PREFIX.len()..];
            if let Ok(info) = serde_json::from_str::<LockInfo>(json_str) {
                warn!(
                    expected = info.expected,
                    actual = info.actual,
                    "Optimistic lock conflict detected"
                );
                return DomainError::optimistic_lock(info.expected, info.actual);
            }
            // Version info is required downstream; unreadable payload is a bug.
            error!(raw_error = %msg, "Malformed optimistic lock payload");
            return DomainError::infra(
                InfraErrorKind::Other("OptimisticLockPayload".into()),
                "Malformed optimistic lock payload",
            );
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(raw_error = %error_msg, "Unique constraint violation");

        if let Some(table_column) = extract_sqlite_table_column(&error_msg) {
            if let Some((kind, detail)) = map_sqlite_table_column_to_conflict(table_column) {
                return DomainError::conflict(kind, detail);
            }
        }
        if let Some((kind, detail)) = map_postgres_constraint_to_conflict(&error_msg) {
            return DomainError::conflict(kind, detail);
        }
        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(raw_error = %error_msg, "Foreign key constraint violation");
        return DomainError::validation(
            ValidationKind::Other("ForeignKey".into()),
            "Foreign key constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23514") || error_msg.contains("CHECK constraint failed") {
        warn!(raw_error = %error_msg, "Check constraint violation");
        // The partnerships table carries the only check in the schema.
        if error_msg.contains("partnerships") || error_msg.contains("player1_id") {
            return DomainError::validation(
                ValidationKind::SelfPartnership,
                "Partnership needs two different players",
            );
        }
        return DomainError::validation(
            ValidationKind::Other("Check".into()),
            "Check constraint violation",
        );
    }

    if error_msg.contains("timeout") || error_msg.contains("timed out") {
        warn!(raw_error = %error_msg, "Database timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}
