use crate::error::{RelkitError, Result};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use walkdir::WalkDir;

/// Template category. Decides the storage subdirectory and file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateCategory {
    GitIgnore,
    License,
    Readme,
}

impl TemplateCategory {
    pub const ALL: [TemplateCategory; 3] = [
        TemplateCategory::GitIgnore,
        TemplateCategory::License,
        TemplateCategory::Readme,
    ];

    /// Subdirectory name under the template root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            TemplateCategory::GitIgnore => "GitIgnore",
            TemplateCategory::License => "License",
            TemplateCategory::Readme => "README",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            TemplateCategory::GitIgnore | TemplateCategory::License => "txt",
            TemplateCategory::Readme => "md",
        }
    }

    /// File name used when a rendered template is written into a project.
    pub fn output_file_name(&self) -> &'static str {
        match self {
            TemplateCategory::GitIgnore => ".gitignore",
            TemplateCategory::License => "LICENSE",
            TemplateCategory::Readme => "README.md",
        }
    }
}

impl fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for TemplateCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gitignore" | "ignore" => Ok(TemplateCategory::GitIgnore),
            "license" | "licence" => Ok(TemplateCategory::License),
            "readme" => Ok(TemplateCategory::Readme),
            other => Err(format!(
                "unknown template category '{}' (expected gitignore, license or readme)",
                other
            )),
        }
    }
}

/// Identity of a template: (category, name).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateDescriptor {
    pub category: TemplateCategory,
    pub name: String,
}

impl TemplateDescriptor {
    pub fn new(category: TemplateCategory, name: impl Into<String>) -> Self {
        Self {
            category,
            name: name.into(),
        }
    }

    /// `{name}.{ext}`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, self.category.extension())
    }
}

impl fmt::Display for TemplateDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.name)
    }
}

/// File-backed template repository rooted at a fixed directory.
///
/// Nothing is cached: each `resolve` reads the file again, so repeated calls
/// return the same text until the file changes on disk.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    root: PathBuf,
}

impl TemplateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, descriptor: &TemplateDescriptor) -> PathBuf {
        self.root
            .join(descriptor.category.dir_name())
            .join(descriptor.file_name())
    }

    /// Returns the raw template text, or [`RelkitError::NotFound`] when the file
    /// is missing. Whether that is fatal is the caller's call.
    pub fn resolve(&self, descriptor: &TemplateDescriptor) -> Result<String> {
        let path = self.path_for(descriptor);
        log::debug!("Resolving template {} at {}", descriptor, path.display());
        match fs::read_to_string(&path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(RelkitError::NotFound { path }),
            Err(e) => Err(RelkitError::Io(e)),
        }
    }

    /// Names of the templates available in `category`, sorted.
    pub fn list(&self, category: TemplateCategory) -> Vec<String> {
        let dir = self.root.join(category.dir_name());
        if !dir.is_dir() {
            return Vec::new();
        }

        let mut names: Vec<String> = WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| {
                let path = e.path();
                let ext = path.extension()?.to_str()?;
                if ext.eq_ignore_ascii_case(category.extension()) {
                    path.file_stem().map(|s| s.to_string_lossy().to_string())
                } else {
                    None
                }
            })
            .collect();
        names.sort();
        names
    }
}

/// `$RELKIT_TEMPLATES`, else `~/.relkit/templates`.
pub fn default_template_root() -> PathBuf {
    if let Some(dir) = std::env::var_os("RELKIT_TEMPLATES") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".relkit")
        .join("templates")
}
