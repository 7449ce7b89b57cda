//! Reporting utilities: banners, preview table and page text.

pub mod format;

pub use format::*;
