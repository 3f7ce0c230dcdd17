//! Read-only course content store boundary.
//!
//! The store is the system of record for course trees; the API only reads it.
//! `InMemoryContentStore` backs dev/test deployments and can be loaded from a
//! JSON snapshot.

pub mod in_memory;
pub mod snapshot;
pub mod r#trait;

pub use in_memory::InMemoryContentStore;
pub use snapshot::{BlockSnapshot, CourseSnapshot, Snapshot, SnapshotError};
pub use r#trait::{ContentStore, StoreError};
