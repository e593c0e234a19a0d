//! Path filtering for tracked files.
//!
//! Tracked paths come from `git ls-files`; this module decides which of them
//! the file-based collectors look at (glob include/exclude) and which count
//! as source code.

use glob::Pattern;

use crate::error::InsightsError;
use crate::Result;

/// File extensions (lower-case, without the dot) treated as source code.
pub const SOURCE_EXTENSIONS: &[&str] = &[
    "ts", "tsx", "js", "jsx", "mjs", "cjs", "py", "rb", "go", "rs", "java", "c", "cpp", "h", "hpp",
    "cs", "php", "swift", "kt", "scala", "sh", "vue", "svelte",
];

/// Configuration for file filtering.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Glob patterns to include (if empty, include every path)
    pub include: Vec<Pattern>,
    /// Glob patterns to exclude
    pub exclude: Vec<Pattern>,
}

impl FilterConfig {
    /// Create a new empty filter config (includes every path).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an include pattern.
    pub fn include(mut self, pattern: &str) -> Result<Self> {
        self.include.push(compile(pattern)?);
        Ok(self)
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        self.exclude.push(compile(pattern)?);
        Ok(self)
    }

    /// Add multiple include patterns.
    pub fn include_many(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.include(pattern)?;
        }
        Ok(self)
    }

    /// Add multiple exclude patterns.
    pub fn exclude_many(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.exclude(pattern)?;
        }
        Ok(self)
    }

    /// Whether no patterns are configured.
    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    /// Check if a path matches the filter criteria.
    ///
    /// A path matches if it matches no exclude pattern and either there are
    /// no include patterns or it matches at least one of them.
    pub fn matches(&self, path: &str) -> bool {
        if self.exclude.iter().any(|p| p.matches(path)) {
            return false;
        }

        self.include.is_empty() || self.include.iter().any(|p| p.matches(path))
    }

    /// Keep only the paths that match, preserving order.
    pub fn apply<'a>(&self, paths: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
        paths.into_iter().filter(|p| self.matches(p)).collect()
    }
}

fn compile(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|e| InsightsError::InvalidGlob {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// Extension of a path as the report spells it: text after the last dot of
/// the file name, without the dot. Dotfiles such as `.gitignore` have none.
pub fn extension(path: &str) -> Option<&str> {
    let name = file_name(path);
    match name.rfind('.') {
        Some(0) | None => None,
        Some(idx) => Some(&name[idx + 1..]),
    }
}

/// Final path segment.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Whether a path has one of the [`SOURCE_EXTENSIONS`].
pub fn is_source_file(path: &str) -> bool {
    extension(path).is_some_and(|ext| {
        let ext = ext.to_ascii_lowercase();
        SOURCE_EXTENSIONS.contains(&ext.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = FilterConfig::new();

        assert!(filter.is_empty());
        assert!(filter.matches("src/main.rs"));
        assert!(filter.matches("README.md"));
    }

    #[test]
    fn test_filter_with_include_pattern() {
        let filter = FilterConfig::new().include("src/**").unwrap();

        assert!(filter.matches("src/main.rs"));
        assert!(filter.matches("src/utils/helper.ts"));
        assert!(!filter.matches("docs/guide.md"));
    }

    #[test]
    fn test_filter_with_exclude_pattern() {
        let filter = FilterConfig::new().exclude("vendor/**").unwrap();

        assert!(filter.matches("src/main.rs"));
        assert!(!filter.matches("vendor/lib/x.js"));
    }

    #[test]
    fn test_exclude_wins_over_include() {
        let filter = FilterConfig::new()
            .include_many(&["src/**", "tests/**"])
            .unwrap()
            .exclude("src/generated/**")
            .unwrap();

        assert!(filter.matches("src/lib.rs"));
        assert!(filter.matches("tests/it.rs"));
        assert!(!filter.matches("src/generated/schema.rs"));
        assert!(!filter.matches("examples/demo.rs"));
    }

    #[test]
    fn test_apply_preserves_order() {
        let filter = FilterConfig::new().exclude_many(&["*.md"]).unwrap();
        let kept = filter.apply(["b.rs", "README.md", "a.rs"]);

        assert_eq!(kept, vec!["b.rs", "a.rs"]);
    }

    #[test]
    fn test_invalid_glob_pattern() {
        let result = FilterConfig::new().include("[invalid");

        if let Err(InsightsError::InvalidGlob { pattern, .. }) = result {
            assert_eq!(pattern, "[invalid");
        } else {
            panic!("Expected InvalidGlob error");
        }
    }

    #[test]
    fn test_extension() {
        assert_eq!(extension("src/main.rs"), Some("rs"));
        assert_eq!(extension("archive.tar.gz"), Some("gz"));
        assert_eq!(extension("Makefile"), None);
        assert_eq!(extension(".gitignore"), None);
        assert_eq!(extension("dir.d/file"), None);
    }

    #[test]
    fn test_is_source_file() {
        assert!(is_source_file("src/main.rs"));
        assert!(is_source_file("web/App.TSX"));
        assert!(is_source_file("scripts/build.sh"));
        assert!(!is_source_file("README.md"));
        assert!(!is_source_file("Makefile"));
    }
}
