//! Thin wrappers over external build and release tools.
//!
//! Each operation builds an argument list, runs the tool in an explicit
//! working directory through [`crate::process`], and checks the exit code.
//! The argument builders are public so callers can preview a command.

pub mod docker;
pub mod dotnet;
pub mod gh;
pub mod git;
pub mod npm;

/// Tools checked by `rk doctor`, with whether they are required.
pub const KNOWN_TOOLS: [(&str, bool); 7] = [
    ("git", true),
    ("docker", false),
    ("dotnet", false),
    ("npm", false),
    ("yarn", false),
    ("pnpm", false),
    ("gh", false),
];
