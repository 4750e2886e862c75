#![allow(dead_code)]

// tests/common/mod.rs

// Logging is auto-installed for every test binary that declares `mod common`.
#[ctor::ctor]
fn init_logging() {
    courtside_test_support::logging::init();
}
