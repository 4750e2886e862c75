pub mod txn;

pub use txn::{begin, settle};
