//! Caller-supplied patterns for locating a mutable token in a file.
//!
//! A pattern is a regular expression with at least one capture group. Bump
//! and stamp replace the text of group 1; an explicit set keeps group 1 as a
//! prefix and replaces the rest of the match. Only the first match in a file
//! is considered.

use crate::error::{RelkitError, Result};
use regex::Regex;
use std::ops::Range;

/// Compiles `pattern`, requiring at least one capture group.
pub fn compile(pattern: &str) -> Result<Regex> {
    let regex = Regex::new(pattern).map_err(|e| RelkitError::InvalidPattern(e.to_string()))?;
    if regex.captures_len() < 2 {
        return Err(RelkitError::InvalidPattern(format!(
            "'{}' has no capture group around the value",
            pattern
        )));
    }
    Ok(regex)
}

/// First match of `regex` in `content`: the captured token and its byte span.
///
/// A match where group 1 did not participate counts as no match.
pub fn find_token<'a>(regex: &Regex, content: &'a str) -> Option<(&'a str, Range<usize>)> {
    let caps = regex.captures(content)?;
    let group = caps.get(1)?;
    Some((group.as_str(), group.range()))
}

/// First match of `regex` in `content`, split at the end of group 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixMatch<'a> {
    /// Text of capture group 1.
    pub group: &'a str,
    /// Matched text after group 1.
    pub rest: &'a str,
    /// Byte span of the whole match.
    pub span: Range<usize>,
}

/// First match of `regex` in `content` with group 1 and the trailing text.
///
/// Returns `None` when nothing matches or group 1 did not participate.
pub fn find_prefixed<'a>(regex: &Regex, content: &'a str) -> Option<PrefixMatch<'a>> {
    let caps = regex.captures(content)?;
    let whole = caps.get(0)?;
    let group = caps.get(1)?;
    Some(PrefixMatch {
        group: group.as_str(),
        rest: &content[group.end()..whole.end()],
        span: whole.range(),
    })
}

/// Returns `content` with `span` replaced by `replacement`.
pub fn splice(content: &str, span: Range<usize>, replacement: &str) -> String {
    let mut out = String::with_capacity(content.len() + replacement.len());
    out.push_str(&content[..span.start]);
    out.push_str(replacement);
    out.push_str(&content[span.end..]);
    out
}
