//! HTTP page cache

mod page;

pub use page::cache_page;
