//! # relkit - build and release automation toolkit
//!
//! relkit bundles the small chores that surround a release: bumping version
//! strings inside source files, injecting build timestamps, generating
//! project scaffolding from templates, and driving the usual external tools
//! (git, docker, dotnet, npm, gh) through one consistent interface.
//!
//! ## Quick Start
//!
//! ```bash
//! # Bump the build digit in an assembly attribute
//! rk version bump src/AssemblyInfo.cs --pattern 'AssemblyVersion\("([^"]+)"\)'
//!
//! # Stamp the current time into a source file
//! rk stamp src/build_info.rs --pattern 'BUILD_TIME: i64 = (\d+)'
//!
//! # Create LICENSE and README.md from templates
//! rk scaffold --license MIT --readme Default --var PROJECT_NAME=Widget
//! ```
//!
//! ## Module Organization
//!
//! - [`templates`] - Template store and `{{KEY}}` substitution
//! - [`version`] - Version set / bump with build-digit rollover
//! - [`stamp`] - Epoch-seconds build stamps
//! - [`batch`] - Per-file read-modify-write with isolated failures
//! - [`tools`] - git, docker, dotnet, npm-family and gh wrappers

/// Per-file mutation driver.
pub mod batch;

/// CLI command handlers.
pub mod commands;

/// Configuration file parsing (`relkit.toml`).
pub mod config;

/// Error taxonomy.
pub mod error;

/// Capture-group patterns.
pub mod pattern;

/// External process execution.
pub mod process;

/// Build stamp engine.
pub mod stamp;

/// Scaffolding templates.
pub mod templates;

/// External tool wrappers.
pub mod tools;

/// Terminal UI utilities (tables, colors).
pub mod ui;

/// Version mutation engine.
pub mod version;
