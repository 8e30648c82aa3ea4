use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use crate::config::constants::SUPPORTED_FILE_EXTENSIONS;
use crate::errors::{GuardError, GuardResult};
use crate::structs::config::scan_config::ScanConfig;

const ALWAYS_IGNORED: &[&str] = &[".git/"];
const TEST_DIRECTORIES: &[&str] = &["test/", "tests/", "__tests__/", "spec/"];

/// Walks a repository and returns the files worth looking at, honouring
/// `.gitignore` style exclude patterns.
///
/// Symlinked directories are never entered, so a link back to an ancestor
/// cannot make the same file show up under several paths.
pub struct RepoScanner {
    root: PathBuf,
    ignores: Gitignore,
    extensions: HashSet<String>,
}

impl RepoScanner {
    pub fn new(root: &Path) -> Self {
        Self::with_ignores(root, &[], false)
    }

    pub fn from_config(root: &Path, config: &ScanConfig) -> Self {
        let mut patterns: Vec<&str> = config.exclude_patterns.iter().map(String::as_str).collect();
        if config.skip_tests {
            patterns.extend(TEST_DIRECTORIES);
        }

        let extensions: Vec<&str> = if config.file_extensions.is_empty() {
            SUPPORTED_FILE_EXTENSIONS.iter().map(|(ext, _, _)| *ext).collect()
        } else {
            config.file_extensions.iter().map(|e| e.trim_start_matches('.')).collect()
        };

        Self::with_ignores(root, &patterns, config.respect_gitignore).with_extensions(&extensions)
    }

    fn with_ignores(root: &Path, patterns: &[&str], respect_gitignore: bool) -> Self {
        let mut builder = GitignoreBuilder::new(root);

        for pattern in ALWAYS_IGNORED.iter().chain(patterns).map(|p| p.trim()) {
            if pattern.is_empty() || pattern.starts_with('#') {
                continue;
            }
            if let Err(e) = builder.add_line(None, pattern) {
                log::warn!("⚠️ Skipping invalid exclude pattern '{}': {}", pattern, e);
            }
        }

        if respect_gitignore {
            let gitignore_path = root.join(".gitignore");
            if gitignore_path.is_file() {
                match builder.add(&gitignore_path) {
                    Some(e) => log::warn!("⚠️ Problem reading {}: {}", gitignore_path.display(), e),
                    None => log::debug!("📄 Loaded {}", gitignore_path.display()),
                }
            }
        }

        let ignores = builder.build().unwrap_or_else(|e| {
            log::warn!("⚠️ Exclude patterns could not be compiled, scanning everything: {}", e);
            Gitignore::empty()
        });

        Self {
            root: root.to_path_buf(),
            ignores,
            extensions: HashSet::new(),
        }
    }

    /// An empty set accepts every extension.
    pub fn with_extensions<S: AsRef<str>>(mut self, extensions: &[S]) -> Self {
        self.extensions = extensions.iter().map(|e| e.as_ref().to_ascii_lowercase()).collect();
        self
    }

    /// Every matching file below the root, sorted for stable output.
    pub fn scan_files(&self) -> GuardResult<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(GuardError::file_error(
                &self.root.to_string_lossy(),
                "scan",
                "not a directory",
            ));
        }

        let mut files = Vec::new();
        self.collect_files(&self.root, &mut files);
        files.sort();
        Ok(files)
    }

    /// Recursive search for one extension, without any exclude patterns.
    pub fn find_files_with_extension(dir: &Path, extension: &str) -> GuardResult<Vec<PathBuf>> {
        let scanner = Self::new(dir).with_extensions(&[extension]);
        scanner.scan_files()
    }

    pub fn relative_path(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn collect_files(&self, dir: &Path, files: &mut Vec<PathBuf>) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("⚠️ Cannot read directory {}: {}", dir.display(), e);
                return;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            // `DirEntry::file_type` reports the link itself, not its target.
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            if file_type.is_symlink() && path.is_dir() {
                log::debug!("⏭️ Not following symlinked directory {}", path.display());
                continue;
            }

            let is_dir = file_type.is_dir();
            let relative = path.strip_prefix(&self.root).unwrap_or(&path);
            if self.ignores.matched(relative, is_dir).is_ignore() {
                continue;
            }

            if is_dir {
                self.collect_files(&path, files);
            } else if path.is_file() && self.has_wanted_extension(&path) {
                files.push(path);
            }
        }
    }

    fn has_wanted_extension(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.extensions.contains(&e.to_ascii_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    fn relative_names(scanner: &RepoScanner) -> Vec<String> {
        scanner
            .scan_files()
            .unwrap()
            .iter()
            .map(|p| scanner.relative_path(p))
            .collect()
    }

    #[test]
    fn excludes_directories_extensions_and_gitignored_files() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "src/main/Payment.java");
        touch(root, "src/app.py");
        touch(root, "target/generated/Gen.java");
        touch(root, "node_modules/lib/index.js");
        touch(root, "secrets/local.properties");
        touch(root, "README.md");
        fs::write(root.join(".gitignore"), "# local only\nsecrets/\n").unwrap();

        let scanner = RepoScanner::from_config(root, &ScanConfig::default());

        assert_eq!(relative_names(&scanner), vec!["src/app.py", "src/main/Payment.java"]);
    }

    #[test]
    fn skip_tests_drops_test_trees() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "src/Service.java");
        touch(root, "src/test/ServiceTest.java");

        let config = ScanConfig {
            skip_tests: true,
            ..ScanConfig::default()
        };
        let scanner = RepoScanner::from_config(root, &config);

        assert_eq!(relative_names(&scanner), vec!["src/Service.java"]);
    }

    #[test]
    fn finds_sarif_files_recursively() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "codeql/java.sarif");
        touch(dir.path(), "semgrep/results.SARIF");
        touch(dir.path(), "semgrep/results.json");

        let files = RepoScanner::find_files_with_extension(dir.path(), "sarif").unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        let scanner = RepoScanner::new(&dir.path().join("nope"));
        assert!(scanner.scan_files().is_err());
    }

    #[test]
    fn gitignore_negation_reincludes_a_file() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "generated/Keep.java");
        touch(root, "generated/Drop.java");
        fs::write(root.join(".gitignore"), "generated/*\n!generated/Keep.java\n").unwrap();

        let scanner = RepoScanner::from_config(root, &ScanConfig::default());

        assert_eq!(relative_names(&scanner), vec!["generated/Keep.java"]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directories_are_not_followed() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "src/A.java");
        std::os::unix::fs::symlink(root, root.join("loop")).unwrap();
        std::os::unix::fs::symlink(root.join("src"), root.join("src/again")).unwrap();

        let scanner = RepoScanner::from_config(root, &ScanConfig::default());

        assert_eq!(relative_names(&scanner), vec!["src/A.java"]);
    }
}
