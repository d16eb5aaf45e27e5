//! Source file discovery.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::RuleError;

/// A source file found in the source directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceFile {
    /// Path relative to the project root, e.g. `src/a.cpp`.
    pub path: PathBuf,
    /// File name without its extension, e.g. `a`.
    pub stem: String,
}

impl SourceFile {
    /// Builds a source entry from a root-relative path.
    ///
    /// Returns `None` if the path has no file stem.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let stem = path.file_stem()?.to_string_lossy().into_owned();
        Some(Self { path, stem })
    }
}

/// Lists source files directly inside `root/src_dir` whose extension is one
/// of `extensions`.
///
/// The scan is not recursive. Returned paths are relative to `root` (they
/// start with `src_dir`) and sorted lexicographically so that rule order does
/// not depend on the platform's directory enumeration order.
pub fn discover_sources(
    root: &Path,
    src_dir: &Path,
    extensions: &[String],
) -> Result<Vec<SourceFile>, RuleError> {
    let dir = root.join(src_dir);
    let io_err = |source: std::io::Error| RuleError::Io {
        path: dir.clone(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(&dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let full_path = entry.path();
        if !full_path.is_file() || !has_extension(&full_path, extensions) {
            continue;
        }
        if let Some(source) = SourceFile::from_path(src_dir.join(entry.file_name())) {
            debug!(path = %source.path.display(), "discovered source");
            files.push(source);
        }
    }
    files.sort();
    Ok(files)
}

/// Returns `true` if `path` has one of the given extensions (case-sensitive).
fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want == ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn exts(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "int main() {}\n").unwrap();
    }

    #[test]
    fn finds_matching_files_sorted() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        touch(&src, "zeta.cpp");
        touch(&src, "alpha.cpp");
        touch(&src, "mid.cpp");

        let files = discover_sources(tmp.path(), Path::new("src"), &exts(&["cpp"])).unwrap();
        let paths: Vec<_> = files.iter().map(|f| f.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("src/alpha.cpp"),
                PathBuf::from("src/mid.cpp"),
                PathBuf::from("src/zeta.cpp"),
            ]
        );
        assert_eq!(files[0].stem, "alpha");
    }

    #[test]
    fn ignores_other_extensions_and_headers() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        touch(&src, "main.cpp");
        touch(&src, "util.h");
        touch(&src, "util.hpp");
        touch(&src, "notes.txt");
        touch(&src, "upper.CPP");

        let files = discover_sources(tmp.path(), Path::new("src"), &exts(&["cpp"])).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, PathBuf::from("src/main.cpp"));
    }

    #[test]
    fn does_not_recurse() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir_all(src.join("nested")).unwrap();
        touch(&src, "top.cpp");
        touch(&src.join("nested"), "deep.cpp");

        let files = discover_sources(tmp.path(), Path::new("src"), &exts(&["cpp"])).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].stem, "top");
    }

    #[test]
    fn skips_directories_named_like_sources() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir_all(src.join("weird.cpp")).unwrap();

        let files = discover_sources(tmp.path(), Path::new("src"), &exts(&["cpp"])).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn multiple_extensions() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        touch(&src, "a.cc");
        touch(&src, "b.cpp");
        touch(&src, "c.cxx");

        let files =
            discover_sources(tmp.path(), Path::new("src"), &exts(&["cpp", "cc"])).unwrap();
        let stems: Vec<_> = files.iter().map(|f| f.stem.as_str()).collect();
        assert_eq!(stems, vec!["a", "b"]);
    }

    #[test]
    fn empty_directory_yields_nothing() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("src")).unwrap();
        let files = discover_sources(tmp.path(), Path::new("src"), &exts(&["cpp"])).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn missing_directory_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = discover_sources(tmp.path(), Path::new("src"), &exts(&["cpp"])).unwrap_err();
        match err {
            RuleError::Io { path, .. } => assert_eq!(path, tmp.path().join("src")),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn source_file_from_path() {
        let f = SourceFile::from_path("src/engine.cpp").unwrap();
        assert_eq!(f.stem, "engine");
        assert_eq!(f.path, PathBuf::from("src/engine.cpp"));
    }
}
