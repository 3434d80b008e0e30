//! Port trait definitions (Hexagonal Architecture)
//!
//! The issue store talks to persistence only through [`BlobStorage`];
//! concrete backends live in `crate::adapters::storage`.

pub mod storage;

pub use storage::{path_segments, BlobStorage};
