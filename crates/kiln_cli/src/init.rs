//! `kiln init`: project scaffolding.
//!
//! Creates a `kiln.toml` spelling out the default policy and a `src/main.cpp`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use kiln_config::CONFIG_FILE_NAME;

use crate::GlobalArgs;

/// Runs the `kiln init` command.
///
/// If `name` is `Some`, creates a new subdirectory with that name.
/// Otherwise initializes in the current working directory, refusing to
/// overwrite an existing `kiln.toml`. Returns exit code 0 on success.
pub fn run(name: Option<String>, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project_dir = match &name {
        Some(n) => {
            let dir = PathBuf::from(n);
            if dir.exists() {
                return Err(format!("directory '{n}' already exists").into());
            }
            fs::create_dir_all(&dir)?;
            dir
        }
        None => std::env::current_dir()?,
    };

    let config_path = project_dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        return Err(format!("{} already exists", config_path.display()).into());
    }

    let project_name = project_dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("main");

    if !global.quiet {
        eprintln!("    Creating kiln project `{project_name}`");
    }

    write_kiln_toml(&config_path, project_name)?;
    let main_path = write_main_cpp(&project_dir)?;

    if !global.quiet {
        eprintln!("     Created {}", config_path.display());
        if let Some(path) = main_path {
            eprintln!("     Created {}", path.display());
        }
    }

    Ok(0)
}

/// Writes a `kiln.toml` with every default spelled out.
fn write_kiln_toml(path: &Path, name: &str) -> io::Result<()> {
    let content = format!(
        r#"[project]
name = "{name}"

[toolchain]
compiler = "g++"
std = "c++17"
optimization = "2"
warnings = ["all", "error=return-type", "cast-align"]
color_diagnostics = "always"
depfiles = true
libs = ["fmt", "benchmark", "pthread"]

[layout]
src_dir = "src"
out_dir = "_out"
binary = "main"
extensions = ["cpp"]
"#
    );
    fs::write(path, content)
}

/// Writes `src/main.cpp` unless the source directory already has it.
///
/// Returns the path written, if any.
fn write_main_cpp(root: &Path) -> io::Result<Option<PathBuf>> {
    let src = root.join("src");
    fs::create_dir_all(&src)?;
    let main = src.join("main.cpp");
    if main.exists() {
        return Ok(None);
    }
    fs::write(
        &main,
        r#"#include <fmt/core.h>

int main() {
    fmt::print("hello from kiln\n");
    return 0;
}
"#,
    )?;
    Ok(Some(main))
}
