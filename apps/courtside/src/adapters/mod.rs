//! Store implementations of the repository traits.
//!
//! `*_sea` modules are thin SeaORM functions generic over `ConnectionTrait`
//! that return `DbErr`; `sea_store` wraps them behind the traits and maps
//! errors into `DomainError`. `memory` is the in-process fake.

pub mod courts_sea;
pub mod matches_sea;
pub mod memory;
pub mod partnerships_sea;
pub mod players_sea;
pub mod score_changes_sea;
pub mod sea_store;
