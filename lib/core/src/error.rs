//! Error handling foundation for blogsmith.
//!
//! Library crates define their own typed error enums. Code that only needs
//! to report a failure upward (process start-up, mostly) wraps those enums
//! in a rootcause `Report` through this alias.

use rootcause::Report;

/// A Result type alias using rootcause's Report for error handling.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;
