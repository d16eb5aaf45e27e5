//! Flag resolution: turning a [`BuildPolicy`] into compiler argument lists.

use crate::types::{BuildPolicy, ToolchainConfig};

impl ToolchainConfig {
    /// Returns the `-std=` flag for the configured language standard.
    pub fn std_flag(&self) -> String {
        format!("-std={}", self.std.as_str())
    }

    /// Flags appended to every compile command, after the source path.
    ///
    /// Order: standard, `-MD` (when depfiles are enabled), optimization,
    /// warnings in configured order, color diagnostics.
    pub fn compile_flags(&self) -> Vec<String> {
        let mut flags = vec![self.std_flag()];
        if self.depfiles {
            flags.push("-MD".to_string());
        }
        flags.push(format!("-O{}", self.optimization.as_str()));
        flags.extend(self.warnings.iter().map(|w| format!("-W{w}")));
        flags.push(format!(
            "-fdiagnostics-color={}",
            self.color_diagnostics.as_str()
        ));
        flags
    }

    /// `-l<name>` for each configured library, in configured order.
    pub fn lib_flags(&self) -> Vec<String> {
        self.libs.iter().map(|lib| format!("-l{lib}")).collect()
    }

    /// Flags appended to the link command after the library flags.
    pub fn link_flags(&self) -> Vec<String> {
        vec![self.std_flag()]
    }
}

impl BuildPolicy {
    /// Shorthand for [`ToolchainConfig::compile_flags`].
    pub fn compile_flags(&self) -> Vec<String> {
        self.toolchain.compile_flags()
    }

    /// Shorthand for [`ToolchainConfig::lib_flags`].
    pub fn lib_flags(&self) -> Vec<String> {
        self.toolchain.lib_flags()
    }

    /// Shorthand for [`ToolchainConfig::link_flags`].
    pub fn link_flags(&self) -> Vec<String> {
        self.toolchain.link_flags()
    }
}
