//! Rendering a generated rule set for people and for build backends.
//!
//! - [`render_text`]: one artifact path per line, objects then binary.
//! - [`render_json`]: rules, artifacts, and the rule-set digest.
//! - [`render_ninja`]: a `build.ninja` file.

use kiln_common::ContentHash;
use serde::Serialize;

use crate::error::RuleError;
use crate::generator::{Artifacts, ALL_TARGET};
use crate::rule::{Rule, RuleSet};

/// Renders the artifact list, one path per line.
pub fn render_text(artifacts: &Artifacts) -> String {
    let mut out = String::new();
    for path in artifacts.all() {
        out.push_str(&path.to_string_lossy());
        out.push('\n');
    }
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    rules: &'a [Rule],
    artifacts: Vec<String>,
    digest: ContentHash,
}

/// Renders the rule set as pretty-printed JSON.
pub fn render_json(rules: &RuleSet, artifacts: &Artifacts) -> Result<String, RuleError> {
    let report = JsonReport {
        rules: rules.rules(),
        artifacts: artifacts
            .all()
            .map(|p| p.to_string_lossy().into_owned())
            .collect(),
        digest: rules.digest()?,
    };
    serde_json::to_string_pretty(&report).map_err(|e| RuleError::Serialization {
        reason: e.to_string(),
    })
}

/// Renders the rule set as a ninja build file.
///
/// Rules with a depfile use the `cc` rule (`deps = gcc`), everything else uses
/// the generic `cmd` rule. The synthetic `all` rule becomes a phony edge and
/// the default target.
pub fn render_ninja(rules: &RuleSet) -> String {
    let mut out = String::from(
        "# Generated by kiln. Do not edit.\n\
         ninja_required_version = 1.3\n\
         \n\
         rule cmd\n  command = $cmd\n  description = $desc\n\
         \n\
         rule cc\n  command = $cmd\n  description = $desc\n  depfile = $dep\n  deps = gcc\n",
    );

    let mut has_all = false;
    for rule in rules {
        out.push('\n');
        let inputs = rule
            .inputs
            .iter()
            .map(|i| escape_path(i))
            .collect::<Vec<_>>()
            .join(" ");

        if rule.output == ALL_TARGET {
            has_all = true;
            out.push_str(&format!("build {ALL_TARGET}: phony {inputs}\n"));
            continue;
        }

        let rule_name = if rule.depfile.is_some() { "cc" } else { "cmd" };
        out.push_str(&format!(
            "build {}: {rule_name} {inputs}\n",
            escape_path(&rule.output)
        ));
        out.push_str(&format!("  cmd = {}\n", escape_value(&shell_join(&rule.command))));
        out.push_str(&format!("  desc = {}\n", escape_value(&describe(rule))));
        if let Some(depfile) = &rule.depfile {
            out.push_str(&format!("  dep = {}\n", escape_value(depfile)));
        }
    }

    if has_all {
        out.push_str(&format!("\ndefault {ALL_TARGET}\n"));
    }
    out
}

/// Short progress label shown by the backend while a rule runs.
///
/// Compile commands are recognised by their `-c`, with or without a depfile.
fn describe(rule: &Rule) -> String {
    let verb = if rule.command.iter().any(|t| t == "-c") {
        "CXX"
    } else {
        "LINK"
    };
    format!("{verb} {}", rule.output)
}

/// Escapes a path for use in a `build` line.
fn escape_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        match c {
            '$' | ' ' | ':' => {
                out.push('$');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Escapes a variable value. Only `$` is special there.
fn escape_value(value: &str) -> String {
    value.replace('$', "$$")
}

/// Joins command tokens into a single POSIX shell command line.
pub fn shell_join(tokens: &[String]) -> String {
    tokens
        .iter()
        .map(|t| shell_quote(t))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Quotes a token for a POSIX shell if it contains anything outside a safe set.
fn shell_quote(token: &str) -> String {
    let safe = |c: char| c.is_ascii_alphanumeric() || "_-+=./,:@%^".contains(c);
    if !token.is_empty() && token.chars().all(safe) {
        return token.to_string();
    }
    format!("'{}'", token.replace('\'', r"'\''"))
}
