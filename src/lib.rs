//! Feed engine for commercial real-estate listings.
//!
//! The crate builds marketplace XML feed documents from listing batches and
//! validates externally supplied feed documents before publication. Listing
//! storage, photo upload, and the HTTP surface live in the host application;
//! everything here works on in-memory values and returns value objects.

pub mod config;
pub mod feeds;
