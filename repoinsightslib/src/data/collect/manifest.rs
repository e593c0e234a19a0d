//! Dependency manifest reading.
//!
//! `package.json` is preferred; `Cargo.toml` is used when there is no
//! `package.json`. Dependency names keep the order they are declared in.

use std::path::Path;

use tracing::{debug, warn};

use crate::data::stats::DependencySummary;
use crate::error::InsightsError;
use crate::source::FileReader;
use crate::Result;

use super::Sources;

/// Production dependencies listed in the summary.
pub const TOP_DEPS: usize = 20;
/// Development dependencies listed in the summary.
pub const TOP_DEV_DEPS: usize = 15;

pub const PACKAGE_JSON: &str = "package.json";
pub const CARGO_TOML: &str = "Cargo.toml";

type ManifestParser = fn(&str) -> std::result::Result<Manifest, String>;

/// The parts of a manifest the report uses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub name: Option<String>,
    pub dependencies: Vec<String>,
    pub dev_dependencies: Vec<String>,
}

impl Manifest {
    /// Load the manifest at the work tree root, if there is one.
    pub fn load(reader: &dyn FileReader) -> Result<Option<Manifest>> {
        let candidates: [(&str, ManifestParser); 2] = [
            (PACKAGE_JSON, Manifest::from_package_json),
            (CARGO_TOML, Manifest::from_cargo_toml),
        ];
        for (file, parse) in candidates {
            let path = Path::new(file);
            if !reader.exists(path) {
                continue;
            }
            let text = reader.read_to_string(path)?;
            let manifest = parse(&text).map_err(|message| InsightsError::Manifest {
                path: path.to_path_buf(),
                message,
            })?;
            debug!("loaded manifest {}", file);
            return Ok(Some(manifest));
        }
        Ok(None)
    }

    /// Parse an npm `package.json`.
    pub fn from_package_json(text: &str) -> std::result::Result<Manifest, String> {
        let value: serde_json::Value = serde_json::from_str(text).map_err(|e| e.to_string())?;
        let object = value
            .as_object()
            .ok_or_else(|| "expected a JSON object".to_string())?;

        let keys = |section: &str| -> Vec<String> {
            object
                .get(section)
                .and_then(|v| v.as_object())
                .map(|deps| deps.keys().cloned().collect())
                .unwrap_or_default()
        };

        Ok(Manifest {
            name: object
                .get("name")
                .and_then(|v| v.as_str())
                .filter(|name| !name.is_empty())
                .map(str::to_string),
            dependencies: keys("dependencies"),
            dev_dependencies: keys("devDependencies"),
        })
    }

    /// Parse a Cargo `Cargo.toml`. A virtual workspace manifest reports its
    /// `[workspace.dependencies]`.
    pub fn from_cargo_toml(text: &str) -> std::result::Result<Manifest, String> {
        let table: toml::Table = text.parse().map_err(|e: toml::de::Error| e.to_string())?;

        let keys = |section: Option<&toml::Value>| -> Vec<String> {
            section
                .and_then(|v| v.as_table())
                .map(|deps| deps.keys().cloned().collect())
                .unwrap_or_default()
        };

        let workspace_deps = table
            .get("workspace")
            .and_then(|w| w.as_table())
            .and_then(|w| w.get("dependencies"));
        let dependencies = match table.get("dependencies") {
            Some(deps) => keys(Some(deps)),
            None => keys(workspace_deps),
        };

        Ok(Manifest {
            name: table
                .get("package")
                .and_then(|p| p.get("name"))
                .and_then(|n| n.as_str())
                .map(str::to_string),
            dependencies,
            dev_dependencies: keys(table.get("dev-dependencies")),
        })
    }

    /// Counts and leading names.
    pub fn summary(&self) -> DependencySummary {
        let production = self.dependencies.len() as u64;
        let dev = self.dev_dependencies.len() as u64;
        DependencySummary {
            production,
            dev,
            total: production + dev,
            top_deps: self.dependencies.iter().take(TOP_DEPS).cloned().collect(),
            top_dev_deps: self
                .dev_dependencies
                .iter()
                .take(TOP_DEV_DEPS)
                .cloned()
                .collect(),
        }
    }
}

/// Dependency summary; all zeros without a manifest or when the manifest
/// does not parse. Read failures still fail the section.
pub fn collect(sources: &Sources<'_>) -> Result<DependencySummary> {
    match Manifest::load(sources.files) {
        Ok(manifest) => Ok(manifest.map(|m| m.summary()).unwrap_or_default()),
        Err(e @ InsightsError::Manifest { .. }) => {
            warn!("{}; reporting no dependencies", e);
            Ok(DependencySummary::default())
        }
        Err(e) => Err(e),
    }
}

/// Manifest package name, falling back to the work tree directory name.
pub fn project_name(reader: &dyn FileReader, root: &Path) -> String {
    let from_manifest = match Manifest::load(reader) {
        Ok(manifest) => manifest.and_then(|m| m.name),
        Err(e) => {
            debug!("ignoring manifest for project name: {}", e);
            None
        }
    };

    from_manifest.unwrap_or_else(|| {
        root.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::CollectOptions;
    use crate::source::fixture::{FixtureHistory, FixtureReader};
    use crate::source::FsReader;
    use std::fs;
    use tempfile::tempdir;

    const PACKAGE: &str = r#"{
        "name": "web-app",
        "dependencies": { "react": "^18", "zod": "^3", "axios": "^1" },
        "devDependencies": { "vitest": "^1", "eslint": "^9" }
    }"#;

    #[test]
    fn test_package_json_keeps_declaration_order() {
        let manifest = Manifest::from_package_json(PACKAGE).unwrap();

        assert_eq!(manifest.name.as_deref(), Some("web-app"));
        assert_eq!(manifest.dependencies, vec!["react", "zod", "axios"]);
        assert_eq!(manifest.dev_dependencies, vec!["vitest", "eslint"]);
    }

    #[test]
    fn test_summary_truncates_lists() {
        let manifest = Manifest {
            name: None,
            dependencies: (0..25).map(|i| format!("dep{}", i)).collect(),
            dev_dependencies: (0..18).map(|i| format!("dev{}", i)).collect(),
        };

        let summary = manifest.summary();

        assert_eq!(summary.production, 25);
        assert_eq!(summary.dev, 18);
        assert_eq!(summary.total, 43);
        assert_eq!(summary.top_deps.len(), TOP_DEPS);
        assert_eq!(summary.top_dev_deps.len(), TOP_DEV_DEPS);
        assert_eq!(summary.top_deps[0], "dep0");
    }

    #[test]
    fn test_cargo_toml() {
        let text = r#"
[package]
name = "tool"
version = "0.1.0"

[dependencies]
serde = "1"
clap = { version = "4", features = ["derive"] }

[dev-dependencies]
tempfile = "3"
"#;
        let manifest = Manifest::from_cargo_toml(text).unwrap();

        assert_eq!(manifest.name.as_deref(), Some("tool"));
        assert_eq!(manifest.dependencies, vec!["serde", "clap"]);
        assert_eq!(manifest.dev_dependencies, vec!["tempfile"]);
    }

    #[test]
    fn test_cargo_workspace_dependencies() {
        let text = "[workspace]\nmembers = [\"a\"]\n\n[workspace.dependencies]\nregex = \"1\"\n";
        let manifest = Manifest::from_cargo_toml(text).unwrap();

        assert_eq!(manifest.name, None);
        assert_eq!(manifest.dependencies, vec!["regex"]);
    }

    #[test]
    fn test_package_json_preferred() {
        let reader = FixtureReader::new()
            .with(PACKAGE_JSON, PACKAGE)
            .with(CARGO_TOML, "[package]\nname = \"other\"\n");

        let manifest = Manifest::load(&reader).unwrap().unwrap();

        assert_eq!(manifest.name.as_deref(), Some("web-app"));
    }

    #[test]
    fn test_missing_manifest_is_zero() {
        let reader = FixtureReader::new();

        assert_eq!(Manifest::load(&reader).unwrap(), None);
        assert_eq!(project_name(&reader, Path::new("/work/my-repo")), "my-repo");
    }

    #[test]
    fn test_malformed_manifest() {
        let reader = FixtureReader::new().with(PACKAGE_JSON, "{ not json");

        let err = Manifest::load(&reader).unwrap_err();
        assert!(matches!(err, InsightsError::Manifest { .. }));
        assert_eq!(project_name(&reader, Path::new("/work/fallback")), "fallback");
    }

    #[test]
    fn test_collect_malformed_manifest_is_zero() {
        let history = FixtureHistory::new();
        let options = CollectOptions::new();
        for (file, text) in [(PACKAGE_JSON, "{ not json"), (CARGO_TOML, "[package\nname =")] {
            let reader = FixtureReader::new().with(file, text);
            let sources = Sources::new(&history, &reader, Path::new("/repo"), &options);

            assert_eq!(collect(&sources).unwrap(), DependencySummary::default());
        }
    }

    #[test]
    fn test_collect_propagates_read_failure() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(PACKAGE_JSON), [0xff, 0xfe, 0x00]).unwrap();
        let reader = FsReader::new(temp.path());
        let history = FixtureHistory::new();
        let options = CollectOptions::new();
        let sources = Sources::new(&history, &reader, temp.path(), &options);

        assert!(collect(&sources).is_err());
    }

    #[test]
    fn test_unnamed_package_falls_back_to_directory() {
        let reader = FixtureReader::new().with(PACKAGE_JSON, r#"{"name": ""}"#);

        assert_eq!(project_name(&reader, Path::new("/src/site")), "site");
    }

    #[test]
    fn test_load_from_disk() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(CARGO_TOML), "[package]\nname = \"on-disk\"\n").unwrap();
        let reader = FsReader::new(temp.path());

        assert_eq!(project_name(&reader, temp.path()), "on-disk");
        let manifest = Manifest::load(&reader).unwrap().unwrap();
        assert_eq!(manifest.summary(), DependencySummary::default());
    }
}
