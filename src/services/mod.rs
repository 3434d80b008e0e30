//! Service layer: business logic over the storage port.

pub mod issue_store;

pub use issue_store::IssueStore;
