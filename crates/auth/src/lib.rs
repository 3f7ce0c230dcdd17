//! `courseware-auth` — static API-key authentication boundary.
//!
//! This crate is intentionally decoupled from HTTP: callers hand it whatever
//! key the transport carried and get back an allow/deny decision.

pub mod api_key;

pub use api_key::{ApiKey, AuthError, KeyValidator, StaticKeyValidator};
