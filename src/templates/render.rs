use chrono::Datelike;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Placeholder key to replacement text.
pub type Variables = HashMap<String, String>;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("placeholder regex"));

static KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("key regex"));

/// True when `key` can appear in a `{{KEY}}` placeholder: ASCII letters,
/// digits and `_`.
pub fn is_valid_key(key: &str) -> bool {
    KEY.is_match(key)
}

fn current_user() -> String {
    ["USER", "USERNAME"]
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Built-in values for the well-known keys.
pub fn default_variables() -> Variables {
    let mut vars = Variables::new();
    vars.insert("YEAR".into(), chrono::Local::now().year().to_string());
    vars.insert("AUTHOR".into(), current_user());
    vars.insert("PROJECT_NAME".into(), "MyProject".into());
    vars.insert("PROJECT_DESCRIPTION".into(), String::new());
    vars.insert("LICENSE".into(), "MIT".into());
    vars.insert("REPO_URL".into(), String::new());
    vars
}

/// Renders `raw` with the defaults overlaid by `overrides`.
pub fn render(raw: &str, overrides: &Variables) -> String {
    let mut merged = default_variables();
    merged.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    render_with(raw, &merged)
}

/// Replaces every `{{KEY}}` whose key is in `vars`; unknown placeholders are
/// kept as-is. Keys are limited to ASCII letters, digits and `_` (see
/// [`is_valid_key`]); entries with other keys never match a placeholder.
///
/// This is a single scan of `raw`: substituted text is never rescanned, so the
/// output does not depend on the map's iteration order. Template values that
/// themselves contain `{{OTHER}}` are emitted literally.
pub fn render_with(raw: &str, vars: &Variables) -> String {
    PLACEHOLDER
        .replace_all(raw, |caps: &Captures| match vars.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}
