//! Rule generation: compile, link, and the synthetic `all` target.
//!
//! For sources `src/a.cpp` and `src/b.cpp` under the stock policy the generator
//! registers, in order:
//!
//! 1. `_out/a.o` from `[src/a.cpp]`, depfile `_out/a.d`
//! 2. `_out/b.o` from `[src/b.cpp]`, depfile `_out/b.d`
//! 3. `_out/main` from `[_out/a.o, _out/b.o]`
//! 4. `all` from `[_out/a.o, _out/b.o, _out/main]`

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use kiln_config::BuildPolicy;
use tracing::debug;

use crate::discover::{discover_sources, SourceFile};
use crate::error::RuleError;
use crate::rule::{Rule, RuleContext};

/// Output name of the synthetic rule that depends on every artifact.
pub const ALL_TARGET: &str = "all";

/// Placeholder command for the `all` rule.
const NOOP_COMMAND: &str = "echo";

/// Paths of everything the generated rules produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    /// Object files, one per source, in registration order.
    pub objects: Vec<PathBuf>,
    /// The linked binary.
    pub binary: PathBuf,
}

impl Artifacts {
    /// Objects followed by the binary.
    pub fn all(&self) -> impl Iterator<Item = &Path> {
        self.objects
            .iter()
            .map(PathBuf::as_path)
            .chain(std::iter::once(self.binary.as_path()))
    }
}

/// Builds compile/link rules from a [`BuildPolicy`].
pub struct RuleGenerator<'a> {
    policy: &'a BuildPolicy,
}

impl<'a> RuleGenerator<'a> {
    /// Creates a generator for the given policy.
    pub fn new(policy: &'a BuildPolicy) -> Self {
        Self { policy }
    }

    /// Discovers sources under `root` according to the policy layout and
    /// registers the full rule set with `ctx`.
    pub fn generate_from_dir(
        &self,
        root: &Path,
        ctx: &mut impl RuleContext,
    ) -> Result<Artifacts, RuleError> {
        let layout = &self.policy.layout;
        let sources = discover_sources(root, Path::new(&layout.src_dir), &layout.extensions)?;
        self.generate(&sources, ctx)
    }

    /// Registers one compile rule per source, then the link rule, then `all`.
    ///
    /// Sources are processed in the order given. Compile rules declare a
    /// `.d` depfile only when the toolchain emits one. Fails before
    /// registering anything if two sources share a stem.
    pub fn generate(
        &self,
        sources: &[SourceFile],
        ctx: &mut impl RuleContext,
    ) -> Result<Artifacts, RuleError> {
        check_unique_stems(sources)?;

        let compiler = &self.policy.toolchain.compiler;
        let out_dir = Path::new(&self.policy.layout.out_dir);
        let compile_flags = self.policy.compile_flags();
        let lib_flags = self.policy.lib_flags();
        let depfiles = self.policy.toolchain.depfiles;

        let mut objects = Vec::with_capacity(sources.len());
        for source in sources {
            let object = out_dir.join(format!("{}.o", source.stem));

            let mut command = vec![
                compiler.clone(),
                "-o".to_string(),
                path_str(&object),
                "-c".to_string(),
                path_str(&source.path),
            ];
            command.extend(compile_flags.iter().cloned());
            command.extend(lib_flags.iter().cloned());

            let mut rule = Rule::new(path_str(&object), vec![path_str(&source.path)], command);
            if depfiles {
                rule = rule.with_depfile(path_str(&out_dir.join(format!("{}.d", source.stem))));
            }
            debug!(output = %rule.output, "registering compile rule");
            ctx.add_rule(rule)?;
            objects.push(object);
        }

        let binary = out_dir.join(&self.policy.layout.binary);
        let object_strs: Vec<String> = objects.iter().map(|o| path_str(o)).collect();

        let mut command = vec![compiler.clone(), "-o".to_string(), path_str(&binary)];
        command.extend(object_strs.iter().cloned());
        command.extend(lib_flags);
        command.extend(self.policy.link_flags());
        debug!(output = %binary.display(), objects = objects.len(), "registering link rule");
        ctx.add_rule(Rule::new(path_str(&binary), object_strs.clone(), command))?;

        let mut all_inputs = object_strs;
        all_inputs.push(path_str(&binary));
        ctx.add_rule(Rule::new(
            ALL_TARGET,
            all_inputs,
            vec![NOOP_COMMAND.to_string()],
        ))?;

        Ok(Artifacts { objects, binary })
    }
}

/// Fails if two sources would map to the same object file.
fn check_unique_stems(sources: &[SourceFile]) -> Result<(), RuleError> {
    let mut seen: HashMap<&str, &Path> = HashMap::with_capacity(sources.len());
    for source in sources {
        if let Some(first) = seen.insert(&source.stem, &source.path) {
            return Err(RuleError::StemCollision {
                stem: source.stem.clone(),
                first: first.to_path_buf(),
                second: source.path.clone(),
            });
        }
    }
    Ok(())
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
