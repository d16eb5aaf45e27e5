//! The rule model and the context rules are registered with.

use std::collections::HashSet;

use kiln_common::ContentHash;
use serde::{Deserialize, Serialize};

use crate::error::RuleError;

/// A declarative build step: produce `output` from `inputs` by running `command`.
///
/// Paths are stored as strings exactly as the backend will see them. Rules are
/// immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// The file (or synthetic target name) this rule produces.
    pub output: String,
    /// Files this rule depends on, in order.
    pub inputs: Vec<String>,
    /// Process invocation as ordered argument tokens.
    pub command: Vec<String>,
    /// Compiler-written dependency file, if the command produces one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depfile: Option<String>,
}

impl Rule {
    /// Creates a rule without a depfile.
    pub fn new(output: impl Into<String>, inputs: Vec<String>, command: Vec<String>) -> Self {
        Self {
            output: output.into(),
            inputs,
            command,
            depfile: None,
        }
    }

    /// Attaches a depfile path.
    pub fn with_depfile(mut self, depfile: impl Into<String>) -> Self {
        self.depfile = Some(depfile.into());
        self
    }
}

/// Receives rules from the generator.
///
/// Implemented by whatever persists or executes the rules. Implementations may
/// reject a rule, which aborts generation.
pub trait RuleContext {
    /// Registers a rule.
    fn add_rule(&mut self, rule: Rule) -> Result<(), RuleError>;
}

/// An in-memory [`RuleContext`] that keeps rules in registration order.
///
/// Rejects a second rule for an output that already has one.
#[derive(Debug, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
    outputs: HashSet<String>,
}

impl RuleSet {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the rules in registration order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Looks up the rule producing `output`.
    pub fn get(&self, output: &str) -> Option<&Rule> {
        if !self.outputs.contains(output) {
            return None;
        }
        self.rules.iter().find(|r| r.output == output)
    }

    /// Returns the number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no rules have been registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Computes a fingerprint over the serialized rules.
    ///
    /// Two rule sets with the same rules in the same order have the same digest.
    pub fn digest(&self) -> Result<ContentHash, RuleError> {
        let bytes = serde_json::to_vec(&self.rules).map_err(|e| RuleError::Serialization {
            reason: e.to_string(),
        })?;
        Ok(ContentHash::from_bytes(&bytes))
    }
}

impl RuleContext for RuleSet {
    fn add_rule(&mut self, rule: Rule) -> Result<(), RuleError> {
        if !self.outputs.insert(rule.output.clone()) {
            return Err(RuleError::DuplicateOutput(rule.output));
        }
        self.rules.push(rule);
        Ok(())
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
