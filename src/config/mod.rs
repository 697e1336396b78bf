//! Resolved configuration from `.floraparse.yml`.
//!
//! Reads a single YAML file: per-section `Enabled` flags keyed by clause
//! label, and `AllFiles.Exclude` glob patterns applied during file discovery.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde_yml::Value;

#[derive(Debug)]
pub struct ResolvedConfig {
    /// Per-section enablement keyed by lowercased clause label.
    section_enabled: HashMap<String, bool>,
    global_excludes: Vec<String>,
}

impl ResolvedConfig {
    fn empty() -> Self {
        ResolvedConfig {
            section_enabled: HashMap::new(),
            global_excludes: Vec::new(),
        }
    }

    /// Check if a vocabulary section is enabled. Unknown sections default to
    /// enabled.
    pub fn is_section_enabled(&self, label: &str) -> bool {
        self.section_enabled
            .get(&label.to_ascii_lowercase())
            .copied()
            .unwrap_or(true)
    }

    /// Global exclude patterns from AllFiles.Exclude.
    pub fn global_excludes(&self) -> &[String] {
        &self.global_excludes
    }
}

/// Load config from the given path, or look for `.floraparse.yml` in the
/// current directory. Returns an empty config if the file doesn't exist.
pub fn load_config(path: Option<&Path>) -> Result<ResolvedConfig> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => Path::new(".floraparse.yml").to_path_buf(),
    };

    if !config_path.exists() {
        return Ok(ResolvedConfig::empty());
    }

    let contents = std::fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read config {}", config_path.display()))?;
    let raw: Value =
        serde_yml::from_str(&contents).with_context(|| "failed to parse .floraparse.yml")?;

    let mut section_enabled = HashMap::new();
    let mut global_excludes = Vec::new();

    if let Value::Mapping(map) = &raw {
        for (key, value) in map {
            let key_str = match key.as_str() {
                Some(s) => s,
                None => continue,
            };

            if key_str == "AllFiles" {
                if let Some(excludes) = extract_string_list(value, "Exclude") {
                    global_excludes = excludes;
                }
                continue;
            }

            // Any other top-level key is a section label ("Habit", "Stem", ...)
            if let Some(enabled) = value
                .as_mapping()
                .and_then(|m| m.get(Value::String("Enabled".to_string())))
                .and_then(Value::as_bool)
            {
                section_enabled.insert(key_str.to_ascii_lowercase(), enabled);
            }
        }
    }

    Ok(ResolvedConfig {
        section_enabled,
        global_excludes,
    })
}

fn extract_string_list(value: &Value, key: &str) -> Option<Vec<String>> {
    value
        .as_mapping()?
        .get(Value::String(key.to_string()))?
        .as_sequence()
        .map(|seq| {
            seq.iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(".floraparse.yml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn missing_config_returns_empty() {
        let config = load_config(Some(Path::new("/nonexistent/.floraparse.yml"))).unwrap();
        assert!(config.global_excludes().is_empty());
        assert!(config.is_section_enabled("Habit"));
    }

    #[test]
    fn allfiles_exclude() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "AllFiles:\n  Exclude:\n    - 'drafts/**'\n    - 'tmp/**'\n",
        );
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(
            config.global_excludes(),
            &["drafts/**".to_string(), "tmp/**".to_string()]
        );
    }

    #[test]
    fn section_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "Ecology:\n  Enabled: false\n");
        let config = load_config(Some(&path)).unwrap();
        assert!(!config.is_section_enabled("Ecology"));
        // Label matching is case-insensitive; unknown sections stay enabled
        assert!(!config.is_section_enabled("ecology"));
        assert!(config.is_section_enabled("Habit"));
    }

    #[test]
    fn section_explicitly_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "Stem:\n  Enabled: true\n");
        let config = load_config(Some(&path)).unwrap();
        assert!(config.is_section_enabled("Stem"));
    }

    #[test]
    fn malformed_yaml_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), ":\n  - [unbalanced\n");
        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn non_mapping_section_values_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "Habit: just-a-string\n");
        let config = load_config(Some(&path)).unwrap();
        assert!(config.is_section_enabled("Habit"));
    }
}
