//! Classify a version or a conventional-commit title as a release type.

use anyhow::{Context, Result};
use clap::Parser;

use semver_release::config;
use semver_release::conventional::{classify_commit, classify_version, ReleaseSignal};
use semver_release::ui;

const NO_RELEASE: &str = "No semver release.";

#[derive(clap::Parser)]
#[command(
    name = "semver-release-type",
    about = "Print the release type of a version or a conventional-commit title"
)]
struct Args {
    #[arg(long, env = "VERSION", help = "Version to classify")]
    version: Option<String>,

    #[arg(long, env = "RELEASE_VERSION", hide = true)]
    release_version: Option<String>,

    #[arg(long, env = "PREVIOUS_VERSION", hide = true)]
    previous_version: Option<String>,

    #[arg(long, env = "TITLE", help = "Pull request or commit title")]
    title: Option<String>,

    #[arg(long, env = "BODY", help = "Pull request or commit body")]
    body: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,
}

impl Args {
    /// First non-empty version input
    fn version(&self) -> Option<&str> {
        [&self.version, &self.release_version, &self.previous_version]
            .into_iter()
            .filter_map(|value| value.as_deref())
            .map(str::trim)
            .find(|value| !value.is_empty())
    }
}

fn main() {
    ui::init_tracing("warn");

    let args = Args::parse();
    if let Err(err) = run(args) {
        ui::exit_with(err);
    }
}

fn run(args: Args) -> Result<()> {
    let signal = match args.version() {
        Some(version) => classify_version(version).map(ReleaseSignal::Bump),
        None => match args.title.as_deref().filter(|t| !t.trim().is_empty()) {
            Some(title) => {
                let config =
                    config::load_config(args.config.as_deref()).context("Error loading config")?;
                classify_commit(title, args.body.as_deref(), &config.conventional)
            }
            None => None,
        },
    };

    match signal {
        Some(signal) => println!("{}", signal),
        None => println!("{}", NO_RELEASE),
    }
    Ok(())
}
