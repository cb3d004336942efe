//! Fuelwatch server core.
//!
//! Fuelwatch ingests a third-party fuel-price feed on a fixed daily schedule,
//! reconciles it into a normalized store, and serves geospatial "nearby
//! stations" and "price trend" queries against that store. The modules here
//! cover the full data lifecycle: feed client, sync scheduling and execution,
//! address/brand normalization, and the read-side query services.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod feed;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod util;
