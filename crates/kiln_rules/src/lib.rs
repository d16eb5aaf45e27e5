//! Build-rule generation for C++ projects.
//!
//! Discovers source files, derives object/depfile/binary paths from a
//! [`BuildPolicy`](kiln_config::BuildPolicy), and registers one compile rule per
//! source, one link rule, and a synthetic `all` rule with a [`RuleContext`].
//! Executing the rules is left entirely to the build backend that consumes them.

#![warn(missing_docs)]

pub mod discover;
pub mod emit;
pub mod error;
pub mod generator;
pub mod rule;

pub use discover::{discover_sources, SourceFile};
pub use error::RuleError;
pub use generator::{Artifacts, RuleGenerator, ALL_TARGET};
pub use rule::{Rule, RuleContext, RuleSet};
