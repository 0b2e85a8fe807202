//! Storefront API client and wire types.

pub mod client;
pub mod model;

pub use client::StorefrontClient;
