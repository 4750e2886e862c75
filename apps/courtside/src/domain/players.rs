use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::domain::ids::PlayerId;
use crate::errors::domain::{DomainError, ValidationKind};

pub const MAX_DISPLAY_NAME_LEN: usize = 64;

/// A registered player. Global identity, shared across tournaments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    pub email: String,
    /// Privileged role: may edit any match.
    pub is_owner: bool,
}

/// Registration input for a player, normalized by [`NewPlayer::normalized`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlayer {
    pub display_name: String,
    pub email: String,
    pub is_owner: bool,
}

impl NewPlayer {
    pub fn new(display_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            email: email.into(),
            is_owner: false,
        }
    }

    pub fn owner(mut self) -> Self {
        self.is_owner = true;
        self
    }

    /// Trim the display name, normalize the email, and reject bad input.
    pub fn normalized(self) -> Result<Self, DomainError> {
        let display_name = self.display_name.trim().to_string();
        if display_name.is_empty() || display_name.chars().count() > MAX_DISPLAY_NAME_LEN {
            return Err(DomainError::validation(
                ValidationKind::InvalidDisplayName,
                format!("Display name must be 1..={MAX_DISPLAY_NAME_LEN} characters"),
            ));
        }

        let email = normalize_email(&self.email);
        if !looks_like_email(&email) {
            return Err(DomainError::validation(
                ValidationKind::InvalidEmail,
                "Email address is not valid",
            ));
        }

        Ok(Self {
            display_name,
            email,
            is_owner: self.is_owner,
        })
    }
}

/// Trim, apply NFKC, and lowercase so visually equal addresses compare equal.
pub fn normalize_email(email: &str) -> String {
    email.trim().nfkc().collect::<String>().to_lowercase()
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}
