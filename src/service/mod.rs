//! Business logic built on top of the repositories.

pub mod location;
pub mod nearby;
pub mod sync;
pub mod trend;
