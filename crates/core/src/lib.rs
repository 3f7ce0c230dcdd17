//! `courseware-core` — course content domain building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! course and usage keys, content nodes, and grading-policy data.

pub mod content;
pub mod entity;
pub mod error;
pub mod keys;

pub use content::{Course, ContentNode, GraderEntry, GradingPolicyEntry, category};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use keys::{CourseKey, KeyFormat, UsageKey};
