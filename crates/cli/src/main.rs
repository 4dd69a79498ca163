use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jtc_release_core::BuildTarget;

mod cmd;
mod output;

/// jtc-release - containerized release pipeline for journald-to-cloudwatch
#[derive(Parser)]
#[command(name = "jtc-release")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Repository root of the daemon checkout
    #[arg(long, global = true, default_value = ".")]
    repo: PathBuf,

    /// Print the commands and file operations instead of running them
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ensure or rebuild the tagged build image for a target
    BuildImage {
        /// OS target (ubuntu or amazonlinux2)
        target: BuildTarget,

        /// Rebuild even if the image already exists
        #[arg(short, long)]
        force: bool,
    },

    /// Ensure the image, then compile the daemon inside it
    Build {
        /// OS target (ubuntu or amazonlinux2)
        target: BuildTarget,

        /// Compile with the release profile
        #[arg(short, long)]
        release: bool,
    },

    /// Compile in release mode, then package the versioned archive
    Publish {
        /// OS target (ubuntu or amazonlinux2)
        target: BuildTarget,
    },

    /// Remove the build-intermediate cache volume
    Clean {
        /// Also remove the cargo home volume
        #[arg(long)]
        clean_cargo: bool,
    },
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .without_time()
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        output::print_error(&err.to_string());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::BuildImage { target, force } => {
            cmd::cmd_build_image(&cli.repo, target, force, cli.dry_run)
        }
        Commands::Build { target, release } => {
            cmd::cmd_build(&cli.repo, target, release, cli.dry_run)
        }
        Commands::Publish { target } => cmd::cmd_publish(&cli.repo, target, cli.dry_run),
        Commands::Clean { clean_cargo } => cmd::cmd_clean(clean_cargo, cli.dry_run),
    }
}
