//! # relkit CLI Entry Point
//!
//! This is the main executable for the `rk` command-line tool.
//! It parses CLI arguments using clap and routes commands to the appropriate handlers.
//!
//! ## Command Structure
//!
//! - **Scaffolding**: `template`, `scaffold`
//! - **Versioning**: `version set`, `version bump`, `stamp`
//! - **Tools**: `git`, `docker`, `dotnet`, `npm`, `release`
//! - **Misc**: `doctor`, `completions`

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use std::path::{Path, PathBuf};

use relkit::batch::MutationMode;
use relkit::commands::{self, mutate::MutationArgs, tools as tool_cmds};
use relkit::config::{self, RelkitConfig};
use relkit::stamp::StampSource;
use relkit::templates::{TemplateCategory, TemplateDescriptor};
use relkit::ui;

#[cfg(windows)]
#[link(name = "kernel32")]
unsafe extern "system" {
    fn SetConsoleOutputCP(wCodePageID: u32) -> i32;
}

#[cfg(windows)]
fn enable_windows_utf8_console() {
    unsafe {
        SetConsoleOutputCP(65001);
    }
}

#[cfg(not(windows))]
fn enable_windows_utf8_console() {}

#[derive(Parser)]
#[command(name = "rk")]
#[command(about = "Build and release automation toolkit", version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Project directory (defaults to the current directory)
    #[arg(short = 'C', long = "dir", global = true, value_name = "PATH")]
    dir: Option<PathBuf>,

    /// Template root directory
    #[arg(long, global = true, value_name = "DIR")]
    templates: Option<PathBuf>,

    /// Show debug logging and tool output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and render templates
    Template {
        #[command(subcommand)]
        op: TemplateCmd,
    },
    /// Create .gitignore, LICENSE and README.md from templates
    Scaffold {
        /// GitIgnore template name
        #[arg(long)]
        gitignore: Option<String>,
        /// License template name
        #[arg(long)]
        license: Option<String>,
        /// README template name
        #[arg(long)]
        readme: Option<String>,
        #[command(flatten)]
        vars: VarArgs,
        /// Output directory [default: project directory]
        #[arg(long, short)]
        out: Option<PathBuf>,
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
    /// Set or bump version strings inside files
    Version {
        #[command(subcommand)]
        op: VersionCmd,
    },
    /// Replace an epoch-seconds build stamp inside files
    Stamp {
        /// Files to update [default: [stamp].files in relkit.toml]
        files: Vec<PathBuf>,
        /// Use this file's modification time instead of the current time
        #[arg(long, value_name = "FILE")]
        from_file: Option<PathBuf>,
        #[command(flatten)]
        flags: MutationFlags,
    },
    /// Run git operations
    Git {
        #[command(subcommand)]
        op: GitCmd,
    },
    /// Run docker operations
    Docker {
        #[command(subcommand)]
        op: DockerCmd,
    },
    /// Run dotnet operations
    Dotnet {
        #[command(subcommand)]
        op: DotnetCmd,
        /// Project or solution file
        #[arg(long, global = true)]
        project: Option<String>,
        /// Build configuration
        #[arg(long, short = 'c', global = true, default_value = "Release")]
        configuration: String,
    },
    /// Run npm / yarn / pnpm operations (detected from the lockfile)
    Npm {
        #[command(subcommand)]
        op: NpmCmd,
    },
    /// Manage GitHub releases via gh
    Release {
        #[command(subcommand)]
        op: ReleaseCmd,
    },
    /// Check which external tools are available
    Doctor,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Clone, Default)]
struct VarArgs {
    /// Template variable override (KEY=VALUE), repeatable
    #[arg(long = "var", value_name = "KEY=VALUE")]
    vars: Vec<String>,
}

#[derive(Args, Clone, Default)]
struct MutationFlags {
    /// Regex with one capture group: the value for bump/stamp, the kept prefix for set
    #[arg(long, short)]
    pattern: Option<String>,
    /// Keep a .backup copy of each modified file
    #[arg(long)]
    backup: bool,
    /// Show what would change without writing
    #[arg(long)]
    dry_run: bool,
    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

impl MutationFlags {
    fn into_args(self, files: Vec<PathBuf>) -> MutationArgs {
        MutationArgs {
            files,
            pattern: self.pattern,
            backup: self.backup,
            dry_run: self.dry_run,
            json: self.json,
        }
    }
}

#[derive(Subcommand)]
enum TemplateCmd {
    /// List available templates
    List {
        /// Only this category (gitignore, license, readme)
        category: Option<TemplateCategory>,
    },
    /// Print a rendered template
    Show {
        /// Category (gitignore, license, readme)
        category: TemplateCategory,
        /// Template name
        name: String,
        #[command(flatten)]
        vars: VarArgs,
    },
    /// Render a template into the project
    New {
        /// Category (gitignore, license, readme)
        category: TemplateCategory,
        /// Template name
        name: String,
        #[command(flatten)]
        vars: VarArgs,
        /// Output directory [default: project directory]
        #[arg(long, short)]
        out: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum VersionCmd {
    /// Write an explicit version
    Set {
        /// New version, written as given
        #[arg(id = "new_version", value_name = "VERSION")]
        version: String,
        /// Files to update [default: [version].files in relkit.toml]
        files: Vec<PathBuf>,
        #[command(flatten)]
        flags: MutationFlags,
    },
    /// Increment the build digit (9 rolls over into patch)
    Bump {
        /// Files to update [default: [version].files in relkit.toml]
        files: Vec<PathBuf>,
        #[command(flatten)]
        flags: MutationFlags,
    },
}

#[derive(Subcommand)]
enum GitCmd {
    /// Create a tag (annotated with --message)
    Tag {
        name: String,
        #[arg(long, short)]
        message: Option<String>,
    },
    /// Push the current branch
    Push {
        #[arg(default_value = "origin")]
        remote: String,
        /// Also push annotated tags
        #[arg(long)]
        tags: bool,
    },
    /// Stage and commit all changes
    Commit {
        #[arg(long, short)]
        message: String,
    },
    /// Show branch and working tree state
    Status,
}

#[derive(Subcommand)]
enum DockerCmd {
    /// Build an image from the project directory
    Build {
        #[arg(long, short)]
        tag: String,
        /// Dockerfile path
        #[arg(long, short)]
        file: Option<PathBuf>,
    },
    /// Tag an image
    Tag { source: String, target: String },
    /// Push an image
    Push { image: String },
}

#[derive(Subcommand)]
enum DotnetCmd {
    Build,
    Test,
    Pack {
        /// Output directory for packages
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum NpmCmd {
    /// Install dependencies
    Install {
        /// Use the lockfile exactly (npm ci / --frozen-lockfile)
        #[arg(long)]
        frozen: bool,
    },
    /// Run a package script
    Run { script: String },
    /// Publish the package
    Publish,
}

#[derive(Subcommand)]
enum ReleaseCmd {
    /// Create a release for a tag
    Create {
        tag: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        draft: bool,
    },
    /// Upload assets in parallel [default: [release].assets in relkit.toml]
    Upload {
        tag: String,
        assets: Vec<PathBuf>,
        /// Replace assets that already exist
        #[arg(long)]
        clobber: bool,
    },
}

fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    enable_windows_utf8_console();

    let cli = Cli::parse();
    init_logger(cli.verbose);

    let project_dir = match &cli.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    let Some(command) = cli.command else {
        print_splash();
        return Ok(());
    };

    // Completions and doctor do not need a project.
    match &command {
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, bin_name, &mut std::io::stdout());
            return Ok(());
        }
        Commands::Doctor => return commands::doctor::run_doctor(),
        _ => {}
    }

    let config = config::load_config(&project_dir)?;
    run_command(command, &project_dir, &config, cli.templates.as_deref(), cli.verbose)
}

fn run_command(
    command: Commands,
    dir: &Path,
    config: &RelkitConfig,
    templates_root: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let store = || commands::template::resolve_store(dir, config, templates_root);

    match command {
        Commands::Template { op } => match op {
            TemplateCmd::List { category } => {
                commands::template::list_templates(&store(), category)
            }
            TemplateCmd::Show {
                category,
                name,
                vars,
            } => {
                let overrides = commands::template::merged_overrides(config, &vars.vars)?;
                commands::template::show_template(
                    &store(),
                    &TemplateDescriptor::new(category, name),
                    &overrides,
                )
            }
            TemplateCmd::New {
                category,
                name,
                vars,
                out,
                force,
            } => {
                let overrides = commands::template::merged_overrides(config, &vars.vars)?;
                let dest = out.map(|o| dir.join(o)).unwrap_or_else(|| dir.to_path_buf());
                commands::template::new_from_template(
                    &store(),
                    &TemplateDescriptor::new(category, name),
                    &overrides,
                    &dest,
                    force,
                )
                .map(|_| ())
            }
        },
        Commands::Scaffold {
            gitignore,
            license,
            readme,
            vars,
            out,
            force,
        } => {
            let overrides = commands::template::merged_overrides(config, &vars.vars)?;
            let dest = out.map(|o| dir.join(o)).unwrap_or_else(|| dir.to_path_buf());
            commands::template::scaffold(
                &store(),
                gitignore.as_deref(),
                license.as_deref(),
                readme.as_deref(),
                &overrides,
                &dest,
                force,
            )
        }
        Commands::Version { op } => {
            let (args, mode) = match op {
                VersionCmd::Set {
                    version,
                    files,
                    flags,
                } => (flags.into_args(files), MutationMode::Set(version)),
                VersionCmd::Bump { files, flags } => (flags.into_args(files), MutationMode::Bump),
            };
            commands::mutate::run_mutation(dir, &args, config.version.as_ref(), "version", mode)
                .map(|_| ())
        }
        Commands::Stamp {
            files,
            from_file,
            flags,
        } => {
            let source = match from_file {
                Some(f) => StampSource::FileModified(dir.join(f)),
                None => StampSource::CurrentTime,
            };
            commands::mutate::run_mutation(
                dir,
                &flags.into_args(files),
                config.stamp.as_ref(),
                "stamp",
                MutationMode::Stamp(source),
            )
            .map(|_| ())
        }
        Commands::Git { op } => {
            let op = match op {
                GitCmd::Tag { name, message } => tool_cmds::GitOp::Tag { name, message },
                GitCmd::Push { remote, tags } => tool_cmds::GitOp::Push { remote, tags },
                GitCmd::Commit { message } => tool_cmds::GitOp::Commit { message },
                GitCmd::Status => tool_cmds::GitOp::Status,
            };
            tool_cmds::handle_git(dir, &op, verbose)
        }
        Commands::Docker { op } => {
            let op = match op {
                DockerCmd::Build { tag, file } => tool_cmds::DockerOp::Build { tag, file },
                DockerCmd::Tag { source, target } => tool_cmds::DockerOp::Tag { source, target },
                DockerCmd::Push { image } => tool_cmds::DockerOp::Push { image },
            };
            tool_cmds::handle_docker(dir, &op, verbose)
        }
        Commands::Dotnet {
            op,
            project,
            configuration,
        } => {
            let op = match op {
                DotnetCmd::Build => tool_cmds::DotnetOp::Build,
                DotnetCmd::Test => tool_cmds::DotnetOp::Test,
                DotnetCmd::Pack { output } => tool_cmds::DotnetOp::Pack { output },
            };
            tool_cmds::handle_dotnet(dir, &op, project.as_deref(), &configuration, verbose)
        }
        Commands::Npm { op } => {
            let op = match op {
                NpmCmd::Install { frozen } => tool_cmds::NpmOp::Install { frozen },
                NpmCmd::Run { script } => tool_cmds::NpmOp::Run { script },
                NpmCmd::Publish => tool_cmds::NpmOp::Publish,
            };
            tool_cmds::handle_npm(dir, &op, verbose)
        }
        Commands::Release { op } => {
            let op = match op {
                ReleaseCmd::Create {
                    tag,
                    title,
                    notes,
                    draft,
                } => tool_cmds::ReleaseOp::Create {
                    tag,
                    title,
                    notes,
                    draft,
                },
                ReleaseCmd::Upload {
                    tag,
                    assets,
                    clobber,
                } => tool_cmds::ReleaseOp::Upload {
                    tag,
                    assets,
                    clobber,
                },
            };
            tool_cmds::handle_release(dir, config, &op, verbose)
        }
        Commands::Completions { .. } | Commands::Doctor => Ok(()),
    }
}

fn print_splash() {
    println!();
    println!("   {}", "relkit".cyan().bold());
    println!(
        "   {}",
        "Build and release automation toolkit".dimmed().italic()
    );
    println!("   {}", format!("v{}", env!("CARGO_PKG_VERSION")).green());
    println!();

    let mut table = ui::Table::new(&["Category", "Commands"]);
    table.add_row(vec![
        "Scaffold".bold().green().to_string(),
        format!("{}, {}", "template".cyan(), "scaffold".cyan()),
    ]);
    table.add_row(vec![
        "Version".bold().yellow().to_string(),
        format!("{}, {}", "version".cyan(), "stamp".cyan()),
    ]);
    table.add_row(vec![
        "Tools".bold().magenta().to_string(),
        format!(
            "{}, {}, {}, {}, {}",
            "git".cyan(),
            "docker".cyan(),
            "dotnet".cyan(),
            "npm".cyan(),
            "release".cyan()
        ),
    ]);
    table.add_row(vec![
        "System".bold().white().to_string(),
        format!("{}, {}", "doctor".cyan(), "completions".cyan()),
    ]);
    table.print();

    println!();
    println!("   Run {} for detailed usage.", "rk --help".white().bold());
    println!();
}
