use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};

use semver_release::cli::{run_query, QueryMode, ReleaseQueryArgs, SaveMode};
use semver_release::config;
use semver_release::domain::{AlphaMarker, ReleaseType};
use semver_release::source::GitHubReleases;
use semver_release::ui;

#[derive(clap::Parser)]
#[command(
    name = "semver-release",
    about = "Answer semantic version questions about a repository's release history",
    args_conflicts_with_subcommands = true
)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    query: QueryArgs,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Restrict every query to the release cycle of the reference version
    Cycle(QueryArgs),
}

#[derive(clap::Args, Clone)]
#[command(group(ArgGroup::new("query").args(["first", "last", "next", "latest"])))]
struct QueryArgs {
    #[arg(long = "type", value_enum, help = "Release type to filter or bump by")]
    release_type: Option<ReleaseType>,

    #[arg(long, help = "Oldest matching release")]
    first: bool,

    #[arg(long, help = "Second newest matching release")]
    last: bool,

    #[arg(long, help = "Next version after the reference")]
    next: bool,

    #[arg(long, help = "Newest matching release")]
    latest: bool,

    #[arg(long, conflicts_with = "version", help = "Read the reference version from a version file")]
    file: Option<PathBuf>,

    #[arg(long, help = "Reference version (ie 1.2.3 or v1.2.3a1)")]
    version: Option<String>,

    #[arg(
        long,
        num_args = 0..=1,
        value_name = "PATH",
        help = "Save the answer when it is newer than the reference"
    )]
    save: Option<Option<PathBuf>>,

    #[arg(
        long,
        num_args = 0..=1,
        value_name = "PATH",
        help = "Save the answer unconditionally"
    )]
    fsave: Option<Option<PathBuf>>,

    #[arg(
        long = "alpha_marker",
        visible_alias = "alpha-marker",
        help = "Pre-release marker (default: a)"
    )]
    alpha_marker: Option<AlphaMarker>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long = "repo", help = "Repository as owner/name [default: $GITHUB_REPOSITORY]")]
    repository: Option<String>,
}

impl QueryArgs {
    fn mode(&self) -> QueryMode {
        if self.first {
            QueryMode::First
        } else if self.last {
            QueryMode::Last
        } else if self.next {
            QueryMode::Next
        } else if self.latest {
            QueryMode::Latest
        } else {
            QueryMode::Current
        }
    }

    fn save_mode(&self) -> SaveMode {
        match (&self.fsave, &self.save) {
            (Some(path), _) => SaveMode::Force(path.clone()),
            (None, Some(path)) => SaveMode::Save(path.clone()),
            (None, None) => SaveMode::Off,
        }
    }

    fn into_request(self, cycle: bool, alpha_marker: AlphaMarker) -> ReleaseQueryArgs {
        ReleaseQueryArgs {
            mode: self.mode(),
            save: self.save_mode(),
            repository: self
                .repository
                .or_else(|| env::var("GITHUB_REPOSITORY").ok())
                .filter(|repo| !repo.trim().is_empty()),
            cycle,
            release_type: self.release_type,
            file: self.file,
            version: self.version,
            alpha_marker,
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
    let (cycle, query) = match args.command {
        Some(Command::Cycle(query)) => (true, query),
        None => (false, args.query),
    };

    let config = config::load_config(query.config.as_deref()).context("Error loading config")?;
    let alpha_marker = match query.alpha_marker.clone() {
        Some(marker) => marker,
        None => config.alpha_marker()?,
    };

    let request = query.into_request(cycle, alpha_marker);
    let source = GitHubReleases::from_config(&config.github)?;
    let result = run_query(&request, &source)?;

    for warning in &result.warnings {
        ui::display_boundary_warning(warning);
    }
    println!("{}", result.output);
    Ok(())
}
