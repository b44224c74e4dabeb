//! Project scaffolding templates.
//!
//! Templates live on disk under a root directory, one subdirectory per
//! category:
//!
//! ```text
//! <root>/GitIgnore/Rust.txt
//! <root>/License/MIT.txt
//! <root>/README/Default.md
//! ```
//!
//! Bodies contain `{{KEY}}` placeholders that [`render`] fills from a
//! [`Variables`] mapping layered over the built-in defaults.

mod render;
mod store;

pub use render::{Variables, default_variables, is_valid_key, render, render_with};
pub use store::{TemplateCategory, TemplateDescriptor, TemplateStore, default_template_root};

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolves, renders and writes a template into `dest_dir`.
///
/// The output file name comes from the category (`.gitignore`, `LICENSE`,
/// `README.md`). A missing template is fatal here. Existing files are left
/// alone unless `force` is set; `Ok(None)` reports that case.
pub fn create_from_template(
    store: &TemplateStore,
    descriptor: &TemplateDescriptor,
    overrides: &Variables,
    dest_dir: &Path,
    force: bool,
) -> Result<Option<PathBuf>> {
    let raw = store.resolve(descriptor)?;
    let target = dest_dir.join(descriptor.category.output_file_name());

    if target.exists() && !force {
        log::debug!("{} exists, not overwriting", target.display());
        return Ok(None);
    }

    let rendered = render(&raw, overrides);
    fs::create_dir_all(dest_dir)?;
    fs::write(&target, rendered).map_err(|source| crate::error::RelkitError::WriteFailure {
        path: target.clone(),
        source,
    })?;
    Ok(Some(target))
}
