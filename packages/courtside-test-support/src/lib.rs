//! Courtside test support utilities
//!
//! Shared by the integration test suites: one-time logging initialization
//! and helpers for generating collision-free test data.

pub mod logging;
pub mod unique_helpers;

pub use unique_helpers::{unique_email, unique_str};
