//! Shared alias for the fallible return type of manual [`Display`][std::fmt::Display] impls.

/// Result type returned by every hand-written `Display::fmt` in this crate.
pub type Formatted = std::fmt::Result;
