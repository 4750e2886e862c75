use std::env;

use crate::errors::domain::DomainError;

pub const ENV_DATABASE_URL: &str = "COURTSIDE_DATABASE_URL";
pub const ENV_DB_MAX_CONNECTIONS: &str = "COURTSIDE_DB_MAX_CONNECTIONS";

const DEFAULT_URL: &str = "sqlite::memory:";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Database backend, detected from the URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    SqliteFile,
    SqliteMemory,
}

impl DbKind {
    pub fn detect(url: &str) -> Result<Self, DomainError> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(DbKind::Postgres)
        } else if url.starts_with("sqlite:") {
            if url.contains(":memory:") || url.contains("mode=memory") {
                Ok(DbKind::SqliteMemory)
            } else {
                Ok(DbKind::SqliteFile)
            }
        } else {
            Err(DomainError::configuration(format!(
                "unsupported database url scheme in '{}'",
                url.split(':').next().unwrap_or_default()
            )))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbSettings {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DbSettings {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl DbSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    /// Private SQLite database living as long as the connection.
    pub fn in_memory() -> Self {
        Self::new(DEFAULT_URL)
    }

    pub fn from_env() -> Result<Self, DomainError> {
        let url = env::var(ENV_DATABASE_URL).unwrap_or_else(|_| DEFAULT_URL.to_string());
        let max_connections = match env::var(ENV_DB_MAX_CONNECTIONS) {
            Ok(raw) => raw.trim().parse().map_err(|_| {
                DomainError::configuration(format!(
                    "{ENV_DB_MAX_CONNECTIONS} has invalid value '{raw}'"
                ))
            })?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };
        if max_connections == 0 {
            return Err(DomainError::configuration(format!(
                "{ENV_DB_MAX_CONNECTIONS} must be at least 1"
            )));
        }
        let settings = Self {
            url,
            max_connections,
        };
        settings.kind()?;
        Ok(settings)
    }

    pub fn kind(&self) -> Result<DbKind, DomainError> {
        DbKind::detect(&self.url)
    }

    /// Pool size actually used. An in-memory SQLite database exists per
    /// connection, so it is pinned to one.
    pub fn effective_max_connections(&self) -> Result<u32, DomainError> {
        Ok(match self.kind()? {
            DbKind::SqliteMemory => 1,
            _ => self.max_connections,
        })
    }
}
