//! Doctor command handler
//!
//! Handles `rk doctor`: reports which external tools are reachable.

use anyhow::Result;
use colored::*;

use crate::process;
use crate::tools::KNOWN_TOOLS;

/// Availability of each known tool, in display order.
pub fn probe_tools() -> Vec<(&'static str, bool, bool)> {
    KNOWN_TOOLS
        .iter()
        .map(|(name, required)| (*name, *required, process::is_available(name)))
        .collect()
}

/// Run the `rk doctor` command to diagnose missing tools
pub fn run_doctor() -> Result<()> {
    println!("{} Running System Doctor...", "🚑".red());
    println!("-------------------------------");

    print!("Checking OS... ");
    println!(
        "{} ({})",
        std::env::consts::OS.green(),
        std::env::consts::ARCH.cyan()
    );

    let mut missing_required = false;
    for (name, required, found) in probe_tools() {
        print!("Checking {}... ", name);
        if found {
            println!("{}", "Found".green());
        } else if required {
            println!("{}", format!("Not Found (Install {})", name).red());
            missing_required = true;
        } else {
            println!("{}", "Not Found (Optional)".yellow());
        }
    }

    if missing_required {
        anyhow::bail!("required tools are missing");
    }
    Ok(())
}
