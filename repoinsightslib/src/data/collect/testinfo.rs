//! Test inventory: which tracked files are tests and roughly how many test
//! cases they hold.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::data::stats::TestInventory;
use crate::source::{file_name, line_count, FileReader};
use crate::Result;

use super::Sources;

/// Patterns over the lower-cased full path.
static TEST_PATH: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"\.(test|spec)\.\w+$", r"[_\-](test|spec)\.\w+$"]
        .iter()
        .map(|p| Regex::new(p).expect("valid test path regex"))
        .collect()
});

static TEST_FILE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^test_.*\.\w+$").expect("valid regex"));

static TEST_DIRECTORY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(e2e|tests?|__tests__)/").expect("valid regex"));

/// Test case openers across the common test frameworks.
static TEST_CASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(it|test)\s*\(|def\s+test_|func\s+Test[A-Z]|#\[(?:tokio::)?test\]")
        .expect("valid regex")
});

pub fn collect(sources: &Sources<'_>) -> Result<TestInventory> {
    let files = sources.tracked_files()?;
    Ok(inventory(sources.files, &files))
}

/// Whether a repository-relative path looks like a test file.
pub fn is_test_path(path: &str) -> bool {
    let lower = path.to_lowercase();
    TEST_PATH.iter().any(|re| re.is_match(&lower))
        || TEST_FILE_NAME.is_match(file_name(&lower))
        || TEST_DIRECTORY.is_match(path)
}

/// Number of test case openers in `content`.
pub fn count_test_cases(content: &str) -> u64 {
    TEST_CASE.find_iter(content).count() as u64
}

/// Build the inventory over `files`. Unreadable files are listed but add no
/// lines or cases.
pub fn inventory(reader: &dyn FileReader, files: &[String]) -> TestInventory {
    let file_list: Vec<String> = files.iter().filter(|f| is_test_path(f)).cloned().collect();

    let mut total_test_lines = 0;
    let mut estimated_tests = 0;
    for file in &file_list {
        match reader.read_to_string(Path::new(file)) {
            Ok(content) => {
                total_test_lines += line_count(&content);
                estimated_tests += count_test_cases(&content);
            }
            Err(e) => debug!("skipping unreadable test file: {}", e),
        }
    }

    TestInventory {
        test_files: file_list.len() as u64,
        total_test_lines,
        estimated_tests,
        file_list,
    }
}
