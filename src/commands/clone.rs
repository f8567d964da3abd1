//! Clone command implementation
//!
//! Runs the full resolution: parse `workspace.cfg`, register every
//! declaration, clone each unique destination, recursively ingest any
//! `dependencies.cfg` discovered inside freshly cloned repositories, and
//! finally export the resolved registry as `dependencies.txt`.

use anyhow::Result;
use clap::Args;
use console::style;
use std::path::PathBuf;

use gitforest::fetcher::GitFetcher;
use gitforest::manifest;
use gitforest::resolver::Resolver;

/// Arguments for the clone command
#[derive(Args, Debug)]
pub struct CloneArgs {
    /// Path to the root configuration file
    #[arg(short, long, value_name = "PATH", default_value = "workspace.cfg")]
    pub config: PathBuf,

    /// Workspace directory that destination paths resolve against
    /// (defaults to the current directory)
    #[arg(short, long, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Skip writing the dependencies.txt manifest
    #[arg(long)]
    pub no_manifest: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the clone command
pub fn execute(args: CloneArgs) -> Result<()> {
    let workspace = match args.dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    // A relative --config is looked up inside the workspace directory.
    let config_path = if args.config.is_absolute() {
        args.config
    } else {
        workspace.join(&args.config)
    };

    let resolver = Resolver::new(GitFetcher, &workspace);
    let resolution = resolver.resolve(&config_path)?;

    if !args.no_manifest {
        let manifest_path = workspace.join(manifest::MANIFEST_NAME);
        manifest::write(&resolution.jobs, &manifest_path)?;
    }

    if !args.quiet {
        println!(
            "{} {} repositories resolved",
            style("✓").green(),
            resolution.jobs.len()
        );
        for job in &resolution.jobs {
            println!(
                "  {} <- {}@{}",
                job.path,
                job.repo,
                job.branch.as_deref().unwrap_or("HEAD")
            );
        }
        if !resolution.diagnostics.is_empty() {
            eprintln!(
                "{} {} line(s) skipped, see warnings above",
                style("!").yellow(),
                resolution.diagnostics.len()
            );
        }
    }

    Ok(())
}
