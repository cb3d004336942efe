//! HTTP request handlers.

pub mod location;
pub mod station;
pub mod sync;
