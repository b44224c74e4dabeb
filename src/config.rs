use crate::error::RelkitError;
use crate::templates::Variables;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "relkit.toml";

/// Optional `relkit.toml` in the project directory.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct RelkitConfig {
    #[serde(default)]
    pub templates: TemplatesConfig,
    #[serde(default)]
    pub variables: Variables,
    pub version: Option<MutationConfig>,
    pub stamp: Option<MutationConfig>,
    pub release: Option<ReleaseConfig>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct TemplatesConfig {
    pub root: Option<PathBuf>,
}

/// Pattern and target files for `rk version` / `rk stamp`.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct MutationConfig {
    pub pattern: Option<String>,
    #[serde(default)]
    pub files: Vec<PathBuf>,
    #[serde(default)]
    pub backup: bool,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct ReleaseConfig {
    /// Files uploaded by `rk release upload` when none are given.
    #[serde(default)]
    pub assets: Vec<PathBuf>,
    #[serde(default)]
    pub draft: bool,
}

impl RelkitConfig {
    /// Template root from config, resolved against `project_dir`.
    pub fn template_root(&self, project_dir: &Path) -> Option<PathBuf> {
        self.templates.root.as_ref().map(|root| {
            if root.is_absolute() {
                root.clone()
            } else {
                project_dir.join(root)
            }
        })
    }
}

/// Loads `relkit.toml` from `project_dir`; a missing file is an empty config.
pub fn load_config(project_dir: &Path) -> Result<RelkitConfig> {
    let path = project_dir.join(CONFIG_FILE);
    if !path.exists() {
        log::debug!("No {} in {}", CONFIG_FILE, project_dir.display());
        return Ok(RelkitConfig::default());
    }

    let config_str = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_config(&config_str)
        .with_context(|| format!("Failed to parse {} - check for syntax errors", path.display()))
}

pub fn parse_config(config_str: &str) -> Result<RelkitConfig> {
    let config: RelkitConfig =
        toml::from_str(config_str).map_err(|e| RelkitError::Config(e.to_string()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_syntax_error_is_config_error() {
        let err = parse_config("[version\npattern = 1").unwrap_err();
        match err.downcast_ref::<RelkitError>() {
            Some(e) => assert_eq!(e.kind(), "Config"),
            None => panic!("expected RelkitError, got {err:?}"),
        }
    }

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
[templates]
root = "tools/templates"

[variables]
AUTHOR = "Jane Doe"
PROJECT_NAME = "Widget"

[version]
pattern = 'AssemblyVersion\("([^"]+)"\)'
files = ["src/AssemblyInfo.cs"]
backup = true

[stamp]
pattern = 'BUILD_TIME = (\d+)'
files = ["src/build_info.rs"]

[release]
assets = ["dist/app.zip"]
"#,
        )
        .unwrap();

        assert_eq!(config.variables.get("AUTHOR").unwrap(), "Jane Doe");
        let version = config.version.unwrap();
        assert_eq!(
            version.pattern.as_deref(),
            Some(r#"AssemblyVersion\("([^"]+)"\)"#)
        );
        assert!(version.backup);
        assert_eq!(config.stamp.unwrap().files, vec![PathBuf::from("src/build_info.rs")]);
        assert_eq!(config.release.unwrap().assets.len(), 1);
        assert_eq!(
            config.templates.root.as_deref(),
            Some(Path::new("tools/templates"))
        );
    }

    #[test]
    fn test_missing_config_is_default() {
        let dir = tempdir().unwrap();
        let config = load_config(dir.path()).unwrap();
        assert!(config.variables.is_empty());
        assert!(config.version.is_none());
    }

    #[test]
    fn test_template_root_relative_to_project() {
        let config = parse_config("[templates]\nroot = \"tpl\"\n").unwrap();
        assert_eq!(
            config.template_root(Path::new("/work/app")),
            Some(PathBuf::from("/work/app/tpl"))
        );
    }

    #[test]
    fn test_invalid_config_reports_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "[version\n").unwrap();
        assert!(load_config(dir.path()).is_err());
    }
}
