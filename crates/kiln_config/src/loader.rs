//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::BuildPolicy;
use std::path::{Component, Path, PathBuf};

/// Name of the project configuration file.
pub const CONFIG_FILE_NAME: &str = "kiln.toml";

/// Output name reserved for the aggregate rule that depends on every artifact.
const ALL_TARGET_NAME: &str = "all";

/// Loads the build policy for a project directory.
///
/// Reads `<project_dir>/kiln.toml` if it exists. A project without a
/// configuration file gets [`BuildPolicy::default`].
pub fn load_config(project_dir: &Path) -> Result<BuildPolicy, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE_NAME);
    if !config_path.is_file() {
        return Ok(BuildPolicy::default());
    }
    load_config_file(&config_path)
}

/// Loads and validates a configuration from an explicit file path.
///
/// Unlike [`load_config`], a missing file is an error.
pub fn load_config_file(path: &Path) -> Result<BuildPolicy, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `kiln.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<BuildPolicy, ConfigError> {
    let policy: BuildPolicy =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&policy)?;
    Ok(policy)
}

/// Validates that required fields are present and values cannot produce
/// malformed commands or colliding artifact paths.
fn validate_config(policy: &BuildPolicy) -> Result<(), ConfigError> {
    let toolchain = &policy.toolchain;
    let layout = &policy.layout;

    if toolchain.compiler.trim().is_empty() {
        return Err(ConfigError::MissingField("toolchain.compiler".to_string()));
    }
    if layout.binary.is_empty() {
        return Err(ConfigError::MissingField("layout.binary".to_string()));
    }
    if layout.binary.contains(['/', '\\']) {
        return Err(ConfigError::ValidationError(format!(
            "layout.binary '{}' must be a file name, not a path",
            layout.binary
        )));
    }
    let binary_path = normalize(&Path::new(&layout.out_dir).join(&layout.binary));
    if binary_path == Path::new(ALL_TARGET_NAME) {
        return Err(ConfigError::ValidationError(format!(
            "layout.out_dir '{}' with layout.binary '{}' clashes with the synthetic '{ALL_TARGET_NAME}' rule",
            layout.out_dir, layout.binary
        )));
    }
    if Path::new(&layout.out_dir).is_absolute() {
        return Err(ConfigError::ValidationError(format!(
            "layout.out_dir '{}' must be relative to the project root",
            layout.out_dir
        )));
    }

    for lib in &toolchain.libs {
        if lib.is_empty() {
            return Err(ConfigError::ValidationError(
                "toolchain.libs contains an empty library name".to_string(),
            ));
        }
        if lib.starts_with("-l") {
            return Err(ConfigError::ValidationError(format!(
                "toolchain.libs entry '{lib}' should be a bare name; the -l prefix is added automatically"
            )));
        }
    }

    for warning in &toolchain.warnings {
        if warning.is_empty() || warning.starts_with('-') {
            return Err(ConfigError::ValidationError(format!(
                "toolchain.warnings entry '{warning}' should be a bare name such as \"all\""
            )));
        }
    }

    if layout.extensions.is_empty() {
        return Err(ConfigError::MissingField("layout.extensions".to_string()));
    }
    for ext in &layout.extensions {
        if ext.is_empty() || ext.starts_with('.') {
            return Err(ConfigError::ValidationError(format!(
                "layout.extensions entry '{ext}' should be given without a leading dot"
            )));
        }
        if ext == "o" || ext == "d" {
            return Err(ConfigError::ValidationError(format!(
                "layout.extensions entry '{ext}' collides with generated artifacts"
            )));
        }
    }

    Ok(())
}

/// Lexically resolves `.` and `..` the way ninja canonicalizes build paths.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColorDiagnostics, CxxStandard, OptLevel};
    use tempfile::TempDir;

    #[test]
    fn empty_config_is_default() {
        let policy = load_config_from_str("").unwrap();
        assert_eq!(policy, BuildPolicy::default());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[project]
name = "bench"

[toolchain]
compiler = "clang++"
std = "c++20"
optimization = "3"
warnings = ["all", "extra"]
color_diagnostics = "never"
depfiles = false
libs = ["m"]

[layout]
src_dir = "code"
out_dir = "build"
binary = "bench"
extensions = ["cpp", "cc"]
"#;
        let policy = load_config_from_str(toml).unwrap();
        assert_eq!(policy.project.name, "bench");
        assert_eq!(policy.toolchain.compiler, "clang++");
        assert_eq!(policy.toolchain.std, CxxStandard::Cxx20);
        assert_eq!(policy.toolchain.optimization, OptLevel::O3);
        assert_eq!(policy.toolchain.warnings, vec!["all", "extra"]);
        assert_eq!(policy.toolchain.color_diagnostics, ColorDiagnostics::Never);
        assert!(!policy.toolchain.depfiles);
        assert_eq!(policy.toolchain.libs, vec!["m"]);
        assert_eq!(policy.layout.src_dir, "code");
        assert_eq!(policy.layout.out_dir, "build");
        assert_eq!(policy.layout.binary, "bench");
        assert_eq!(policy.layout.extensions, vec!["cpp", "cc"]);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let policy = load_config_from_str("[toolchain]\ncompiler = \"clang++\"\n").unwrap();
        assert_eq!(policy.toolchain.compiler, "clang++");
        assert_eq!(policy.toolchain.libs, vec!["fmt", "benchmark", "pthread"]);
        assert_eq!(policy.layout, crate::types::LayoutConfig::default());
    }

    #[test]
    fn empty_compiler_errors() {
        let err = load_config_from_str("[toolchain]\ncompiler = \"  \"\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(_)));
    }

    #[test]
    fn empty_binary_errors() {
        let err = load_config_from_str("[layout]\nbinary = \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(_)));
    }

    #[test]
    fn binary_with_separator_errors() {
        let err = load_config_from_str("[layout]\nbinary = \"bin/main\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn binary_resolving_to_all_errors() {
        for layout in [
            "out_dir = \"\"\nbinary = \"all\"",
            "out_dir = \".\"\nbinary = \"all\"",
            "out_dir = \"./\"\nbinary = \"all\"",
            "out_dir = \"build/..\"\nbinary = \"all\"",
        ] {
            let err = load_config_from_str(&format!("[layout]\n{layout}\n")).unwrap_err();
            assert!(err.to_string().contains("clashes"), "accepted: {layout}");
        }
    }

    #[test]
    fn binary_named_all_in_out_dir_is_fine() {
        let policy = load_config_from_str("[layout]\nbinary = \"all\"\n").unwrap();
        assert_eq!(policy.layout.binary, "all");
    }

    #[test]
    fn absolute_out_dir_errors() {
        let err = load_config_from_str("[layout]\nout_dir = \"/tmp/out\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn prefixed_lib_errors() {
        let err = load_config_from_str("[toolchain]\nlibs = [\"-lfmt\"]\n").unwrap_err();
        assert!(err.to_string().contains("-l prefix"));
    }

    #[test]
    fn empty_lib_errors() {
        let err = load_config_from_str("[toolchain]\nlibs = [\"\"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn prefixed_warning_errors() {
        let err = load_config_from_str("[toolchain]\nwarnings = [\"-Wall\"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn no_extensions_errors() {
        let err = load_config_from_str("[layout]\nextensions = []\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(_)));
    }

    #[test]
    fn dotted_extension_errors() {
        let err = load_config_from_str("[layout]\nextensions = [\".cpp\"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn artifact_extension_errors() {
        let err = load_config_from_str("[layout]\nextensions = [\"o\"]\n").unwrap_err();
        assert!(err.to_string().contains("collides"));
    }

    #[test]
    fn invalid_toml_errors() {
        let err = load_config_from_str("this is not valid toml {{{}}}").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let tmp = TempDir::new().unwrap();
        let policy = load_config(tmp.path()).unwrap();
        assert_eq!(policy, BuildPolicy::default());
    }

    #[test]
    fn loads_file_from_project_dir() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            "[layout]\nbinary = \"bench\"\n",
        )
        .unwrap();
        let policy = load_config(tmp.path()).unwrap();
        assert_eq!(policy.layout.binary, "bench");
    }

    #[test]
    fn explicit_missing_file_errors() {
        let err = load_config_file(Path::new("/nonexistent/dir/kiln.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
