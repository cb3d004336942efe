//! Utility functions and helpers for server operations.
//!
//! Shared pure helpers used by the sync and query paths: address heuristics,
//! brand canonicalization, great-circle geometry, text normalization, and
//! time/timestamp handling for the regional schedule calendar and the
//! upstream feed's heterogeneous timestamp formats.

pub mod address;
pub mod brand;
pub mod geo;
pub mod text;
pub mod time;
