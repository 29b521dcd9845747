//! Web API operations

mod artworks;
mod page;
mod source;

pub use page::Page;
pub use source::PageSource;
