//! Remote GeoJSON feeds
//!
//! [`FeedClient`] is the seam between the renderer and the network; tests
//! substitute an in-memory client.

pub mod client;
pub mod feeds;

pub use client::{FeedClient, ReqwestFeedClient};
pub use feeds::{fetch_feeds, fetch_geojson, FeedOutcome, FeedSet};
