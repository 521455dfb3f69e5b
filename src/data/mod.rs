//! Data fetching and storage
//!
//! Handles:
//! - Yahoo Finance API for option chains (free)
//! - Local snapshot caching

pub mod yahoo;
pub mod cache;

pub use yahoo::*;
pub use cache::*;
