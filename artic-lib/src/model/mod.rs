//! Typed models

mod artwork;
mod opaque;

pub use artwork::*;
