//! Template command handlers
//!
//! Handles `rk template list|show|new` and `rk scaffold`.

use anyhow::{Context, Result, anyhow};
use colored::*;
use std::path::{Path, PathBuf};

use crate::config::RelkitConfig;
use crate::error::RelkitError;
use crate::templates::{
    self, TemplateCategory, TemplateDescriptor, TemplateStore, Variables, default_template_root,
};

/// Picks the template root: CLI flag, then `relkit.toml`, then the default.
pub fn resolve_store(
    project_dir: &Path,
    config: &RelkitConfig,
    cli_root: Option<&Path>,
) -> TemplateStore {
    let root = cli_root
        .map(Path::to_path_buf)
        .or_else(|| config.template_root(project_dir))
        .unwrap_or_else(default_template_root);
    log::debug!("Template root: {}", root.display());
    TemplateStore::new(root)
}

/// Parses `KEY=VALUE` pairs from the command line.
pub fn parse_vars(pairs: &[String]) -> Result<Variables> {
    let mut vars = Variables::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("Invalid variable '{}', expected KEY=VALUE", pair))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(anyhow!("Invalid variable '{}', empty key", pair));
        }
        if !templates::is_valid_key(key) {
            return Err(anyhow!(
                "Invalid variable '{}', keys may only use letters, digits and '_'",
                pair
            ));
        }
        vars.insert(key.to_string(), value.to_string());
    }
    Ok(vars)
}

/// `relkit.toml` variables overlaid by command-line ones.
pub fn merged_overrides(config: &RelkitConfig, cli_vars: &[String]) -> Result<Variables> {
    let mut vars = config.variables.clone();
    for key in vars.keys().filter(|k| !templates::is_valid_key(k)) {
        log::warn!("Variable '{}' in relkit.toml can never match a placeholder", key);
    }
    vars.extend(parse_vars(cli_vars)?);
    Ok(vars)
}

pub fn list_templates(store: &TemplateStore, category: Option<TemplateCategory>) -> Result<()> {
    let categories = match category {
        Some(c) => vec![c],
        None => TemplateCategory::ALL.to_vec(),
    };

    println!(
        "{} Templates in {}",
        "📄".cyan(),
        store.root().display().to_string().dimmed()
    );
    for category in categories {
        let names = store.list(category);
        if names.is_empty() {
            println!("   {} {} (none)", category.to_string().bold(), "-".dimmed());
        } else {
            println!("   {} {}", category.to_string().bold(), names.join(", ").cyan());
        }
    }
    Ok(())
}

/// Prints a rendered template. A missing template is a warning, not a failure.
pub fn show_template(
    store: &TemplateStore,
    descriptor: &TemplateDescriptor,
    overrides: &Variables,
) -> Result<()> {
    match store.resolve(descriptor) {
        Ok(raw) => {
            print!("{}", templates::render(&raw, overrides));
            Ok(())
        }
        Err(RelkitError::NotFound { path }) => {
            println!(
                "{} Template {} not found at {}",
                "!".yellow(),
                descriptor,
                path.display()
            );
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Writes one rendered template into `dest`. A missing template is fatal.
pub fn new_from_template(
    store: &TemplateStore,
    descriptor: &TemplateDescriptor,
    overrides: &Variables,
    dest: &Path,
    force: bool,
) -> Result<Option<PathBuf>> {
    let written = templates::create_from_template(store, descriptor, overrides, dest, force)
        .with_context(|| {
            format!(
                "Failed to create {} from template {}",
                descriptor.category.output_file_name(),
                descriptor
            )
        })?;

    match &written {
        Some(path) => println!("{} Created {}", "✓".green(), path.display()),
        None => println!(
            "{} {} already exists (use --force to overwrite)",
            "!".yellow(),
            dest.join(descriptor.category.output_file_name()).display()
        ),
    }
    Ok(written)
}

/// Creates `.gitignore`, `LICENSE` and `README.md` in `dest` from the named
/// templates. Categories without a name are skipped.
pub fn scaffold(
    store: &TemplateStore,
    gitignore: Option<&str>,
    license: Option<&str>,
    readme: Option<&str>,
    overrides: &Variables,
    dest: &Path,
    force: bool,
) -> Result<()> {
    let requested = [
        (TemplateCategory::GitIgnore, gitignore),
        (TemplateCategory::License, license),
        (TemplateCategory::Readme, readme),
    ];

    let mut overrides = overrides.clone();
    if let Some(license) = license {
        overrides
            .entry("LICENSE".to_string())
            .or_insert_with(|| license.to_string());
    }

    println!("{} Scaffolding {}...", "🏗".blue(), dest.display());
    let mut created = 0;
    for (category, name) in requested {
        let Some(name) = name else { continue };
        let descriptor = TemplateDescriptor::new(category, name);
        if new_from_template(store, &descriptor, &overrides, dest, force)?.is_some() {
            created += 1;
        }
    }

    if created == 0 {
        println!("{} Nothing was created", "!".yellow());
    }
    Ok(())
}
