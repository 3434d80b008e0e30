//! Domain layer for the local GitHub Issues emulator
//!
//! This module contains the record types, query types and the storage port.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{StorageError, StoreError, StoreResult};
