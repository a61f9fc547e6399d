use super::PhraseCategoryConfig;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::Path;

/// A YAML file contributing one extra phrase category, e.g. a regional
/// language table maintained outside the main configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignalModule {
    pub name: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub label: String,
    pub weight: u32,
    pub phrases: Vec<String>,
    #[serde(skip)]
    pub hash: String,
}

fn default_enabled() -> bool {
    true
}

impl SignalModule {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read signal module: {}", path.display()))?;
        let mut module: SignalModule = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse signal module: {}", path.display()))?;

        let mut hasher = DefaultHasher::new();
        content.hash(&mut hasher);
        module.hash = format!("{:016x}", hasher.finish())[..8].to_string();

        Ok(module)
    }

    pub fn into_category(self) -> PhraseCategoryConfig {
        PhraseCategoryConfig {
            name: self.name,
            label: self.label,
            weight: self.weight,
            phrases: self.phrases,
        }
    }
}

/// Load every enabled `*.yaml`/`*.yml` module in `module_dir`, sorted by file
/// name. Files that fail to parse are skipped with a warning.
pub fn load_modules(module_dir: &str) -> Result<Vec<SignalModule>> {
    let dir_path = Path::new(module_dir);
    if !dir_path.is_dir() {
        bail!("Module directory does not exist: {}", module_dir);
    }

    let mut yaml_files = Vec::new();
    for entry in fs::read_dir(dir_path)? {
        let path = entry?.path();
        if path.is_file() {
            if let Some(extension) = path.extension() {
                if extension == "yaml" || extension == "yml" {
                    yaml_files.push(path);
                }
            }
        }
    }

    yaml_files.sort();
    log::debug!(
        "Found {} signal module files in {}",
        yaml_files.len(),
        module_dir
    );

    let mut modules = Vec::new();
    for path in &yaml_files {
        match SignalModule::load_from_file(path) {
            Ok(module) => {
                log::debug!(
                    "Loaded signal module {} [{}] (enabled: {})",
                    module.name,
                    module.hash,
                    module.enabled
                );
                if module.enabled {
                    modules.push(module);
                }
            }
            Err(e) => {
                log::warn!("Skipping signal module {}: {:#}", path.display(), e);
            }
        }
    }

    Ok(modules)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_loads_enabled_modules_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "20-tamil.yaml",
            "name: tamil\nlabel: Tamil high-risk\nweight: 25\nphrases:\n  - \"லாட்டரி\"\n",
        );
        write(
            dir.path(),
            "10-marathi.yml",
            "name: marathi\nlabel: Marathi high-risk\nweight: 25\nphrases:\n  - \"लॉटरी लागली\"\n",
        );
        write(
            dir.path(),
            "30-off.yaml",
            "name: off\nenabled: false\nlabel: Off\nweight: 5\nphrases: [\"x\"]\n",
        );
        write(dir.path(), "notes.txt", "ignored");

        let modules = load_modules(dir.path().to_str().unwrap()).unwrap();
        let names: Vec<&str> = modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["marathi", "tamil"]);
        assert_eq!(modules[0].hash.len(), 8);
    }

    #[test]
    fn test_skips_malformed_module() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "bad.yaml", "name: [unterminated");
        write(
            dir.path(),
            "good.yaml",
            "name: good\nlabel: Good\nweight: 10\nphrases: [\"prize\"]\n",
        );

        let modules = load_modules(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].name, "good");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "typo.yaml",
            "name: typo\nlabel: T\nweigth: 10\nweight: 10\nphrases: [\"a\"]\n",
        );
        assert!(SignalModule::load_from_file(&dir.path().join("typo.yaml")).is_err());
    }

    #[test]
    fn test_missing_directory_is_error() {
        assert!(load_modules("/nonexistent/eye-meney/modules").is_err());
    }
}
