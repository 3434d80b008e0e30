//! Adapters: the HTTP surface and storage backends.

pub mod http;
pub mod storage;
