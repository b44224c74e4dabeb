//! Version string mutation.
//!
//! Versions are handled in a canonical four-part form
//! `major.minor.patch.build`. Shorter inputs are padded with zeros; anything
//! that is not one to four dot-separated integers is replaced by the
//! [`Version::BASELINE`] before mutating.
//!
//! Bumping uses a fixed single-digit build counter:
//!
//! ```text
//! 1.0.0.8 -> 1.0.0.9
//! 1.0.0.9 -> 1.0.1.0
//! ```
//!
//! Major and minor are never touched, and patch grows without bound.

use crate::error::{RelkitError, Result};
use crate::pattern;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

static DOTTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+){0,3}$").expect("dotted version regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub build: u64,
}

impl Version {
    pub const BASELINE: Version = Version::new(1, 0, 0, 0);

    /// Largest build value before it rolls over into patch.
    pub const MAX_BUILD: u64 = 9;

    pub const fn new(major: u64, minor: u64, patch: u64, build: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            build,
        }
    }

    /// Strict parse of one to four dot-separated integers, zero-padded.
    pub fn parse(s: &str) -> Result<Self> {
        let malformed = || RelkitError::MalformedVersion {
            value: s.to_string(),
        };
        if !DOTTED.is_match(s) {
            return Err(malformed());
        }

        let mut parts = [0u64; 4];
        for (slot, piece) in parts.iter_mut().zip(s.split('.')) {
            *slot = piece.parse().map_err(|_| malformed())?;
        }
        Ok(Self::new(parts[0], parts[1], parts[2], parts[3]))
    }

    /// Parses `s`, falling back to [`Version::BASELINE`] when malformed.
    pub fn parse_or_baseline(s: &str) -> Self {
        match Self::parse(s) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("{}, using baseline {}", e, Self::BASELINE);
                Self::BASELINE
            }
        }
    }

    /// Next version under the single-digit build rollover rule.
    pub fn bumped(&self) -> Self {
        let mut next = *self;
        next.build += 1;
        if next.build > Self::MAX_BUILD {
            next.build = 0;
            next.patch += 1;
        }
        next
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.patch, self.build
        )
    }
}

/// Outcome of a version or stamp rewrite on one file's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub content: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub changed: bool,
}

impl Rewrite {
    fn unchanged(content: &str) -> Self {
        Self {
            content: content.to_string(),
            old_value: None,
            new_value: None,
            changed: false,
        }
    }
}

/// Replaces the first match with capture group 1 followed by `new_version`.
///
/// Group 1 is the prefix that survives (`(<Version>)[^<]*`); everything the
/// match covers after it is dropped and reported as the old value. A group
/// that wraps the version itself keeps the old version and appends the new
/// one. `new_version` is not validated. Without a match the content comes
/// back unchanged with `changed == false`.
pub fn set_version(content: &str, regex: &Regex, new_version: &str) -> Rewrite {
    let Some(found) = pattern::find_prefixed(regex, content) else {
        return Rewrite::unchanged(content);
    };

    let replacement = format!("{}{}", found.group, new_version);
    let updated = pattern::splice(content, found.span.clone(), &replacement);
    Rewrite {
        changed: updated != content,
        content: updated,
        old_value: Some(found.rest.to_string()),
        new_value: Some(new_version.to_string()),
    }
}

/// Bumps the version captured by group 1 of the first match.
///
/// Fails with [`RelkitError::PatternNotMatched`] when nothing matches. The
/// splice covers exactly the group's span, so a group that also swallows
/// surrounding text (quotes, `;`) replaces that text too.
pub fn bump_version(content: &str, regex: &Regex) -> Result<Rewrite> {
    let (old, span) =
        pattern::find_token(regex, content).ok_or_else(|| RelkitError::PatternNotMatched {
            pattern: regex.as_str().to_string(),
        })?;

    let next = Version::parse_or_baseline(old).bumped().to_string();
    log::debug!("Bumping {} -> {}", old, next);

    let old = old.to_string();
    let updated = pattern::splice(content, span, &next);
    Ok(Rewrite {
        changed: updated != content,
        content: updated,
        old_value: Some(old),
        new_value: Some(next),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::compile;

    fn bump(s: &str) -> String {
        Version::parse_or_baseline(s).bumped().to_string()
    }

    #[test]
    fn test_parse_pads_to_four_components() {
        assert_eq!(Version::parse("2").unwrap(), Version::new(2, 0, 0, 0));
        assert_eq!(Version::parse("2.5").unwrap(), Version::new(2, 5, 0, 0));
        assert_eq!(Version::parse("2.5.7").unwrap(), Version::new(2, 5, 7, 0));
        assert_eq!(Version::parse("2.5.7.3").unwrap(), Version::new(2, 5, 7, 3));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "v1.2", "1.2.3.4.5", "1..2", "1.2-beta", " 1.2", "1.2.", "abc"] {
            assert!(Version::parse(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(Version::parse("99999999999999999999999").is_err());
    }

    #[test]
    fn test_bump_increments_build_below_rollover() {
        for major in [0u64, 1, 12] {
            for minor in [0u64, 3] {
                for patch in [0u64, 7, 42] {
                    for build in 0..=8u64 {
                        let input = format!("{major}.{minor}.{patch}.{build}");
                        let expected = format!("{major}.{minor}.{patch}.{}", build + 1);
                        assert_eq!(bump(&input), expected);
                    }
                }
            }
        }
    }

    #[test]
    fn test_bump_rolls_build_into_patch() {
        assert_eq!(bump("1.0.0.9"), "1.0.1.0");
        assert_eq!(bump("3.4.9.9"), "3.4.10.0");
        assert_eq!(bump("0.0.123.9"), "0.0.124.0");
    }

    #[test]
    fn test_bump_never_touches_major_minor() {
        assert_eq!(bump("7.9.9.9"), "7.9.10.0");
    }

    #[test]
    fn test_bump_pads_short_versions() {
        assert_eq!(bump("2.1"), "2.1.0.1");
        assert_eq!(bump("5"), "5.0.0.1");
    }

    #[test]
    fn test_bump_malformed_uses_baseline() {
        for bad in ["1.0.0-beta", "latest", "1.2.3.4.5", "$(Version)"] {
            assert_eq!(bump(bad), "1.0.0.1");
        }
    }

    #[test]
    fn test_build_above_nine_rolls_over_once() {
        // An out-of-policy build value still carries only one step.
        assert_eq!(bump("1.0.0.15"), "1.0.1.0");
    }

    #[test]
    fn test_assembly_version_scenario() {
        let re = compile(r#"AssemblyVersion\("([^"]+)"\)"#).unwrap();
        let out = bump_version(r#"[assembly: AssemblyVersion("1.0.0.9")]"#, &re).unwrap();
        assert_eq!(out.content, r#"[assembly: AssemblyVersion("1.0.1.0")]"#);
        assert_eq!(out.old_value.as_deref(), Some("1.0.0.9"));
        assert_eq!(out.new_value.as_deref(), Some("1.0.1.0"));
        assert!(out.changed);
    }

    #[test]
    fn test_bump_without_match_fails() {
        let re = compile(r#"AssemblyVersion\("([^"]+)"\)"#).unwrap();
        let err = bump_version("nothing here", &re).unwrap_err();
        assert_eq!(err.kind(), "PatternNotMatched");
    }

    #[test]
    fn test_bump_only_first_match() {
        let re = compile(r"Version=(\S+)").unwrap();
        let out = bump_version("Version=1.0.0.1\nVersion=1.0.0.1\n", &re).unwrap();
        assert_eq!(out.content, "Version=1.0.0.2\nVersion=1.0.0.1\n");
    }

    #[test]
    fn test_loose_group_swallows_trailing_text() {
        // The group captures "1.2.3.4;" which is not a version, so the
        // baseline is bumped and the ';' inside the group is lost.
        let re = compile(r"Version = (.*)").unwrap();
        let out = bump_version("Version = 1.2.3.4;\nnext", &re).unwrap();
        assert_eq!(out.old_value.as_deref(), Some("1.2.3.4;"));
        assert_eq!(out.content, "Version = 1.0.0.1\nnext");
    }

    #[test]
    fn test_set_version_round_trip() {
        let re = compile(r"(<Version>)[^<]*").unwrap();
        let out = set_version("<Version>0.9.1</Version>", &re, "2.0.0.0");
        assert!(out.changed);
        assert_eq!(out.old_value.as_deref(), Some("0.9.1"));
        let caps = re.captures(&out.content).unwrap();
        assert_eq!(&caps[0], format!("{}2.0.0.0", &caps[1]));
        assert_eq!(out.content, "<Version>2.0.0.0</Version>");
    }

    #[test]
    fn test_set_version_keeps_prefix_group() {
        let re = compile(r"(<Version>)[^<]*").unwrap();
        let out = set_version("<Version>1.0</Version>", &re, "2.0.0.0");
        assert_eq!(out.content, "<Version>2.0.0.0</Version>");

        let re = compile(r"(Version = )\S+").unwrap();
        let out = set_version("Version = 1.2.3.4\nName = x", &re, "1.3.0.0");
        assert_eq!(out.content, "Version = 1.3.0.0\nName = x");
    }

    #[test]
    fn test_set_version_group_around_value_appends() {
        let re = compile(r#"AssemblyVersion\("([^"]+)"\)"#).unwrap();
        let out = set_version(r#"[assembly: AssemblyVersion("1.0.0.0")]"#, &re, "2.0.0.0");
        assert_eq!(out.content, "[assembly: 1.0.0.02.0.0.0]");
    }

    #[test]
    fn test_set_version_not_validated() {
        let re = compile(r#"(version: ")[^"]*"#).unwrap();
        let out = set_version(r#"version: "1.0""#, &re, "banana");
        assert_eq!(out.content, r#"version: "banana""#);
    }

    #[test]
    fn test_set_version_no_match_is_unchanged() {
        let re = compile(r#"(version: ")[^"]*"#).unwrap();
        let out = set_version("name: x", &re, "2.0.0.0");
        assert!(!out.changed);
        assert_eq!(out.content, "name: x");
        assert!(out.old_value.is_none());
    }

    #[test]
    fn test_set_version_same_value_not_changed() {
        let re = compile(r"(v=)\S+").unwrap();
        let out = set_version("v=2.0.0.0", &re, "2.0.0.0");
        assert!(!out.changed);
        assert_eq!(out.old_value.as_deref(), Some("2.0.0.0"));
    }
}
