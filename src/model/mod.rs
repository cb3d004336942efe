//! Server application models and type definitions.
//!
//! Data models bridging database entities, the upstream feed, and HTTP
//! handlers: application state, API DTOs, and sync outcome types.

pub mod api;
pub mod app;
pub mod sync;
