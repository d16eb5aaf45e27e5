//! Shared foundational types used across the kiln workspace.
//!
//! Currently this is the content hash used to fingerprint generated rule sets.

#![warn(missing_docs)]

pub mod hash;

pub use hash::ContentHash;
