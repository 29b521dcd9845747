//! Art Institute of Chicago artworks client library
//!
//! Fetches pages of the public artworks listing and keeps a row selection
//! that survives page navigation.

pub mod api;
pub mod browser;
pub mod config;
pub mod error;
pub mod model;
pub mod retry;
pub mod selection;

mod client;

pub use client::*;
