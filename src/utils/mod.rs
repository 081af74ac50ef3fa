//! Utility modules
//!
//! Error taxonomy, classification and logging setup shared by the whole crate.

pub mod errors;
pub mod logging;

pub use errors::{ErrorKind, KahootStoreError, Result, StoreError, StoreResult};
