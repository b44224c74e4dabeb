//! CLI command handlers.
//!
//! Every handler receives the project directory explicitly; nothing here
//! changes the process working directory.

pub mod doctor;
pub mod mutate;
pub mod template;
pub mod tools;
