//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names and help
//! text.  No business logic lives here.

use clap::Parser;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "pyseed",
    bin_name = "pyseed",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Scaffold a containerised Python service",
    long_about = "pyseed creates a Python service skeleton (source stubs, \
                  requirements, Dockerfiles, linter config, ignore lists) \
                  and commits it to a fresh git repository on `develop`.",
    after_help = "EXAMPLES:\n\
        \x20 pyseed my-service\n\
        \x20 pyseed ../services/billing --dry-run\n\
        \x20 pyseed my-service --keep-partial -vv",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Directory to create.  Used verbatim as a relative or absolute path;
    /// it must not exist yet.
    #[arg(value_name = "PROJECT_NAME", help = "Project directory to create")]
    pub project_name: String,

    /// Preview what would be created without writing any files.
    #[arg(
        long = "dry-run",
        help = "Show what would be created without creating it"
    )]
    pub dry_run: bool,

    /// Leave a partially created project in place if a step fails.
    #[arg(
        long = "keep-partial",
        help = "Do not remove the project directory when a step fails"
    )]
    pub keep_partial: bool,

    /// Flags shared with every invocation.
    #[command(flatten)]
    pub global: GlobalArgs,
}
