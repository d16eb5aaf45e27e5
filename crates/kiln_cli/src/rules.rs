//! `kiln rules`: generate and print the build rules.
//!
//! 1. Resolve the project root and build policy
//! 2. Discover sources in the configured source directory
//! 3. Register compile, link, and `all` rules
//! 4. Render in the requested format to stdout or a file

use std::path::Path;

use kiln_rules::emit::{render_json, render_ninja, render_text};
use kiln_rules::{Artifacts, RuleGenerator, RuleSet};

use crate::pipeline::{resolve_project, Project};
use crate::{GlobalArgs, RulesArgs, RulesFormat};

/// Runs the `kiln rules` command. Returns exit code 0 on success.
pub fn run(args: &RulesArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project = resolve_project(global)?;

    if !global.quiet {
        eprintln!(
            "  Generating {} ({})",
            project.policy.project.name,
            project.root.display()
        );
    }

    let (rules, artifacts) = generate(&project)?;

    if artifacts.objects.is_empty() && !global.quiet {
        eprintln!(
            "warning: no source files found in {}",
            project.root.join(&project.policy.layout.src_dir).display()
        );
    }

    let rendered = render(args.format, &rules, &artifacts)?;

    match &args.output {
        Some(path) => {
            std::fs::write(Path::new(path), &rendered)?;
            if !global.quiet {
                eprintln!("       Wrote {path}");
            }
        }
        None => print!("{rendered}"),
    }

    if !global.quiet {
        eprintln!(
            "   Generated {} rules ({} objects)",
            rules.len(),
            artifacts.objects.len()
        );
    }

    Ok(0)
}

/// Runs the generator over a project into a fresh [`RuleSet`].
pub fn generate(project: &Project) -> Result<(RuleSet, Artifacts), kiln_rules::RuleError> {
    let mut rules = RuleSet::new();
    let artifacts =
        RuleGenerator::new(&project.policy).generate_from_dir(&project.root, &mut rules)?;
    Ok((rules, artifacts))
}

/// Renders a generated rule set in the requested format.
pub fn render(
    format: RulesFormat,
    rules: &RuleSet,
    artifacts: &Artifacts,
) -> Result<String, kiln_rules::RuleError> {
    Ok(match format {
        RulesFormat::Text => render_text(artifacts),
        RulesFormat::Json => render_json(rules, artifacts)?,
        RulesFormat::Ninja => render_ninja(rules),
    })
}
