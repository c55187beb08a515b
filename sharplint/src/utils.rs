use crate::constants::{DEFAULT_EXCLUDE_FOLDERS, SOURCE_EXTENSION};
use rustc_hash::FxHashSet;
use text_size::TextSize;

/// A utility struct to convert byte offsets to line numbers.
///
/// Trees address text by byte offset, findings are reported by line and
/// column.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Stores the byte index of the start of each line.
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Creates a new `LineIndex` by scanning the source code for newlines.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        // newlines are always single bytes in UTF-8
        for (i, byte) in source.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Converts a `TextSize` (byte offset) to a 1-indexed line number.
    #[must_use]
    pub fn line_index(&self, offset: TextSize) -> usize {
        let offset = usize::from(offset);
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(line) => line,
        }
    }

    /// Converts a byte offset to a 1-indexed `(line, column)` pair.
    ///
    /// The column counts bytes from the start of the line.
    #[must_use]
    pub fn line_col(&self, offset: TextSize) -> (usize, usize) {
        let line = self.line_index(offset);
        let start = self.line_starts.get(line - 1).copied().unwrap_or_default();
        (line, usize::from(offset) - start + 1)
    }
}

/// Detects lines with suppression comments.
///
/// Supports `// sharplint: ignore` and `// sharplint:ignore`.
///
/// Returns a set of line numbers (1-indexed) that should be ignored by the analyzer.
#[must_use]
pub fn get_ignored_lines(source: &str) -> FxHashSet<usize> {
    let patterns = crate::constants::SUPPRESSION_PATTERNS();
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| patterns.iter().any(|pattern| line.contains(pattern)))
        .map(|(i, _)| i + 1)
        .collect()
}

/// Normalizes a path for CLI display.
///
/// - Converts backslashes to forward slashes (for cross-platform consistency)
/// - Strips leading "./" or ".\" prefix (for cleaner output)
///
/// # Examples
/// ```
/// use std::path::Path;
/// use sharplint::utils::normalize_display_path;
///
/// assert_eq!(normalize_display_path(Path::new(".\\src\\Program.cs")), "src/Program.cs");
/// assert_eq!(normalize_display_path(Path::new("./src/Foo.cs")), "src/Foo.cs");
/// ```
#[must_use]
pub fn normalize_display_path(path: &std::path::Path) -> String {
    let s = path.to_string_lossy();
    let normalized = s.replace('\\', "/");
    normalized
        .strip_prefix("./")
        .unwrap_or(&normalized)
        .to_owned()
}

/// Checks if a name matches any exclusion pattern.
/// Supports exact matching and wildcard patterns starting with `*.`.
#[must_use]
pub fn is_excluded(name: &str, excludes: &[String]) -> bool {
    excludes.iter().any(|exclude| match exclude.strip_prefix('*') {
        Some(suffix) if suffix.starts_with('.') => name.ends_with(suffix),
        _ => name == exclude,
    })
}

/// Collects C# files from a directory with gitignore support.
///
/// Uses the `ignore` crate to respect .gitignore, .git/info/exclude, and global gitignore
/// in addition to the default exclusions (`bin`, `obj`, `.vs`, ...).
///
/// # Arguments
/// * `root` - Root directory to search, or a single file
/// * `exclude` - Additional user-specified exclusion patterns
/// * `verbose` - Whether to log walk errors
///
/// # Returns
/// Tuple of (Vector of `PathBuf` for all C# files found, directory count)
#[must_use]
pub fn collect_source_files(
    root: &std::path::Path,
    exclude: &[String],
    verbose: bool,
) -> (Vec<std::path::PathBuf>, usize) {
    use ignore::WalkBuilder;

    if root.is_file() {
        return (vec![root.to_path_buf()], 0);
    }

    let all_excludes: Vec<String> = exclude
        .iter()
        .cloned()
        .chain(DEFAULT_EXCLUDE_FOLDERS().iter().map(|&s| s.to_owned()))
        .collect();
    let root_for_filter = root.to_path_buf();

    // filter_entry skips excluded directories at traversal time
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .filter_entry(move |entry| {
            if entry.path() == root_for_filter {
                return true;
            }
            if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                return true;
            }
            entry
                .file_name()
                .to_str()
                .is_none_or(|name| !is_excluded(name, &all_excludes))
        })
        .build();

    let mut files = Vec::new();
    let mut dir_count = 0;

    for result in walker {
        match result {
            Ok(entry) => {
                let path = entry.path();
                if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                    if path != root {
                        dir_count += 1;
                    }
                    continue;
                }
                if path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION) {
                    files.push(path.to_path_buf());
                }
            }
            Err(e) if verbose => tracing::warn!("walk error: {e}"),
            Err(_) => {}
        }
    }

    files.sort();
    (files, dir_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_line_col() {
        let index = LineIndex::new("ab\ncd\n\nef");
        assert_eq!(index.line_col(TextSize::from(0)), (1, 1));
        assert_eq!(index.line_col(TextSize::from(2)), (1, 3));
        assert_eq!(index.line_col(TextSize::from(3)), (2, 1));
        assert_eq!(index.line_col(TextSize::from(6)), (3, 1));
        assert_eq!(index.line_col(TextSize::from(8)), (4, 2));
    }

    #[test]
    fn test_ignored_lines() {
        let source = "class A {\n    bool notA = true; // sharplint: ignore\n    bool notB = true;\n}";
        let ignored = get_ignored_lines(source);
        assert!(ignored.contains(&2));
        assert_eq!(ignored.len(), 1);
    }

    #[test]
    fn test_is_excluded_patterns() {
        let excludes = vec!["obj".to_owned(), "*.generated".to_owned()];
        assert!(is_excluded("obj", &excludes));
        assert!(!is_excluded("objects", &excludes));
        assert!(is_excluded("api.generated", &excludes));
    }

    #[test]
    fn test_collect_source_files_exclusion() -> anyhow::Result<()> {
        let temp_dir = tempdir()?;
        let root = temp_dir.path();

        let src_dir = root.join("src");
        fs::create_dir(&src_dir)?;
        fs::write(src_dir.join("A.cs"), "class A { }")?;
        fs::write(src_dir.join("notes.txt"), "not code")?;

        // "binary" contains "bin" but is not excluded
        let binary_dir = root.join("binary");
        fs::create_dir(&binary_dir)?;
        fs::write(binary_dir.join("B.cs"), "class B { }")?;

        let obj_dir = root.join("obj");
        fs::create_dir(&obj_dir)?;
        fs::write(obj_dir.join("C.cs"), "class C { }")?;

        let (files, dirs) = collect_source_files(root, &[], false);
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["B.cs", "A.cs"]);
        assert_eq!(dirs, 2);

        let (files, _) = collect_source_files(root, &["binary".to_owned()], false);
        assert_eq!(files.len(), 1);

        let (files, _) = collect_source_files(&src_dir.join("A.cs"), &[], false);
        assert_eq!(files, [src_dir.join("A.cs")]);

        Ok(())
    }
}
