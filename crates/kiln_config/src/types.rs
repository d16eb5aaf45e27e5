//! Configuration types deserialized from `kiln.toml`.
//!
//! Every section is optional. Missing fields fall back to the stock policy:
//! `g++`, C++17, `-O2`, the `all`/`error=return-type`/`cast-align` warning set,
//! forced color diagnostics, and linking against `fmt`, `benchmark` and `pthread`.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};

/// The complete build policy: project metadata, toolchain flags, and layout.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BuildPolicy {
    /// Project metadata.
    pub project: ProjectMeta,
    /// Compiler, flags, and libraries.
    pub toolchain: ToolchainConfig,
    /// Source and output directory layout.
    pub layout: LayoutConfig,
}

/// Project metadata.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProjectMeta {
    /// Human-readable project name, used only in status output.
    pub name: String,
}

impl Default for ProjectMeta {
    fn default() -> Self {
        Self {
            name: "main".to_string(),
        }
    }
}

/// Toolchain settings that determine every compile and link command.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ToolchainConfig {
    /// Compiler driver used for both compiling and linking.
    pub compiler: String,
    /// Language standard passed as `-std=`.
    pub std: CxxStandard,
    /// Optimization level passed as `-O`.
    pub optimization: OptLevel,
    /// Warning names, each emitted as `-W<name>`.
    pub warnings: Vec<String>,
    /// Color diagnostics mode, emitted as `-fdiagnostics-color=<mode>`.
    pub color_diagnostics: ColorDiagnostics,
    /// Whether the compiler writes `.d` dependency files (`-MD`).
    pub depfiles: bool,
    /// Library names, each emitted as `-l<name>`.
    ///
    /// Accepts either a single string or a list of strings.
    #[serde(deserialize_with = "deserialize_string_or_vec")]
    pub libs: Vec<String>,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            compiler: "g++".to_string(),
            std: CxxStandard::default(),
            optimization: OptLevel::default(),
            warnings: vec![
                "all".to_string(),
                "error=return-type".to_string(),
                "cast-align".to_string(),
            ],
            // Compiler output is usually captured through a pipe by the backend.
            color_diagnostics: ColorDiagnostics::Always,
            depfiles: true,
            libs: vec![
                "fmt".to_string(),
                "benchmark".to_string(),
                "pthread".to_string(),
            ],
        }
    }
}

/// Directory layout for sources and generated artifacts.
///
/// All paths are relative to the project root.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Directory scanned (non-recursively) for source files.
    pub src_dir: String,
    /// Directory that receives object files, depfiles, and the binary.
    pub out_dir: String,
    /// File name of the linked binary inside `out_dir`.
    pub binary: String,
    /// Source file extensions, without the leading dot.
    pub extensions: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            src_dir: "src".to_string(),
            out_dir: "_out".to_string(),
            binary: "main".to_string(),
            extensions: vec!["cpp".to_string()],
        }
    }
}

/// C++ language standard.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
pub enum CxxStandard {
    /// ISO C++ 2011.
    #[serde(rename = "c++11")]
    Cxx11,
    /// ISO C++ 2014.
    #[serde(rename = "c++14")]
    Cxx14,
    /// ISO C++ 2017 (default).
    #[default]
    #[serde(rename = "c++17")]
    Cxx17,
    /// ISO C++ 2020.
    #[serde(rename = "c++20")]
    Cxx20,
    /// ISO C++ 2023.
    #[serde(rename = "c++23")]
    Cxx23,
}

impl CxxStandard {
    /// Returns the value accepted by `-std=`.
    pub fn as_str(self) -> &'static str {
        match self {
            CxxStandard::Cxx11 => "c++11",
            CxxStandard::Cxx14 => "c++14",
            CxxStandard::Cxx17 => "c++17",
            CxxStandard::Cxx20 => "c++20",
            CxxStandard::Cxx23 => "c++23",
        }
    }
}

/// Compiler optimization level.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
pub enum OptLevel {
    /// No optimization.
    #[serde(rename = "0")]
    O0,
    /// Basic optimization.
    #[serde(rename = "1")]
    O1,
    /// Full optimization without space/speed tradeoffs (default).
    #[default]
    #[serde(rename = "2")]
    O2,
    /// Aggressive optimization.
    #[serde(rename = "3")]
    O3,
    /// Optimize for size.
    #[serde(rename = "s")]
    Size,
    /// Optimize for debugging experience.
    #[serde(rename = "g")]
    Debug,
}

impl OptLevel {
    /// Returns the suffix accepted by `-O`.
    pub fn as_str(self) -> &'static str {
        match self {
            OptLevel::O0 => "0",
            OptLevel::O1 => "1",
            OptLevel::O2 => "2",
            OptLevel::O3 => "3",
            OptLevel::Size => "s",
            OptLevel::Debug => "g",
        }
    }
}

/// Color mode for compiler diagnostics.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorDiagnostics {
    /// Always emit color escapes.
    Always,
    /// Let the compiler detect a terminal.
    #[default]
    Auto,
    /// Never emit color escapes.
    Never,
}

impl ColorDiagnostics {
    /// Returns the value accepted by `-fdiagnostics-color=`.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorDiagnostics::Always => "always",
            ColorDiagnostics::Auto => "auto",
            ColorDiagnostics::Never => "never",
        }
    }
}

/// Deserializes a field that can be either a single string or a list of strings.
///
/// Allows `libs = "pthread"` as well as `libs = ["fmt", "pthread"]`.
fn deserialize_string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut vec = Vec::new();
            while let Some(val) = seq.next_element::<String>()? {
                vec.push(val);
            }
            Ok(vec)
        }
    }

    deserializer.deserialize_any(StringOrVec)
}
