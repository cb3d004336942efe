//! Client and payload models for the upstream fuel price feed.

pub mod client;
pub mod model;

pub use client::{FeedClient, FeedClientConfig};
pub use model::{FeedPrice, FeedSnapshot, FeedStation, NearbyFeedRequest};
