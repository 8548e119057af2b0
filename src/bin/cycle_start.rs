//! Print the tag that opens the current release cycle.

use anyhow::{Context, Result};
use clap::builder::FalseyValueParser;
use clap::{ArgAction, Parser};

use semver_release::analyzer::{cycle_edge, CycleEdge, History};
use semver_release::config;
use semver_release::domain::{ReleaseType, TagParser};
use semver_release::source::GitHubReleases;
use semver_release::ui;

#[derive(clap::Parser)]
#[command(
    name = "semver-cycle-start",
    about = "Print the tag at the start of the newest release's cycle"
)]
struct Args {
    #[arg(long = "repo", env = "GITHUB_REPOSITORY", help = "Repository as owner/name")]
    repository: String,

    #[arg(long = "type", env = "RELEASE_TYPE", value_enum, help = "Cycle granularity")]
    release_type: ReleaseType,

    #[arg(
        long,
        env = "FIRST_RELEASE",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new(),
        help = "Print the oldest release inside the cycle"
    )]
    first: bool,

    #[arg(
        long,
        env = "LAST_RELEASE",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new(),
        help = "Print the newest release"
    )]
    last: bool,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,
}

impl Args {
    fn edge(&self) -> CycleEdge {
        if self.last {
            CycleEdge::Last
        } else if self.first {
            CycleEdge::First
        } else {
            CycleEdge::Start
        }
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
    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;
    let parser = TagParser::new(config.alpha_marker()?)?;
    let source = GitHubReleases::from_config(&config.github)?;

    let history = History::from_source(&source, &args.repository, &parser)
        .with_context(|| format!("Failed to list releases of {}", args.repository))?;

    if let Some(release) = cycle_edge(&history, args.release_type, args.edge()) {
        let tag = release
            .tag()
            .map(str::to_string)
            .unwrap_or_else(|| release.to_string());
        println!("{}", tag);
    }
    Ok(())
}
