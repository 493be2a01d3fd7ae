//! sitepub: sync site content, run the generator, publish the result.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use sitepub::config::SiteConfig;
use sitepub::error::SitepubError;
use sitepub::publish::Strategy;
use sitepub::{build, git, publish, sync};

#[derive(Parser, Debug)]
#[command(
    name = "sitepub",
    version,
    about = "Build the static site from its content repository and publish it"
)]
struct Cli {
    /// Publish strategy
    #[arg(long, value_enum, default_value = "fresh-clone")]
    strategy: Strategy,

    /// Config file path, relative to the repository root
    #[arg(long, default_value = "sitepub.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();

    if let Err(err) = run(&cli) {
        eprintln!("error: {err:#}");
        // A failed external command terminates the run with its own exit
        // code; everything else exits 1.
        let code = err
            .downcast_ref::<SitepubError>()
            .and_then(SitepubError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let root = git::toplevel(&cwd)?;
    let config = SiteConfig::load(&root.join(&cli.config))?;

    // Staging lives in a temp dir so it is removed on every exit path.
    let tmp = tempfile::tempdir()?;
    let staging = tmp.path().join("build");

    sync::sync_content(&root, &config)?;
    build::build_site(&root, &config, &staging)?;
    publish::publish_site(&root, &config, &staging, cli.strategy)?;

    info!("deployment complete");
    Ok(())
}
