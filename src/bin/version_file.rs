//! Maintain the version block of a version file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use semver_release::store::{self, VersionBlock};
use semver_release::ui;

#[derive(clap::Parser)]
#[command(
    name = "semver-version-file",
    about = "Update the version block of a version file in place"
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[arg(long, global = true, env = "VERSION_FILE", help = "Version file to update")]
    file: Option<PathBuf>,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Increment VERSION_BUILD and reset VERSION_ALPHA
    BumpPatch,
    /// Reset VERSION_ALPHA, turning an alpha into a final release
    RemoveAlpha,
}

fn main() {
    ui::init_tracing("info");

    let args = Args::parse();
    if let Err(err) = run(args) {
        ui::exit_with(err);
    }
}

fn run(args: Args) -> Result<()> {
    let path = args
        .file
        .ok_or_else(|| semver_release::ReleaseError::usage("set VERSION_FILE or pass --file"))?;

    let update: fn(VersionBlock) -> semver_release::Result<VersionBlock> = match args.command {
        Command::BumpPatch => VersionBlock::bump_build,
        Command::RemoveAlpha => |block| Ok(block.finalize()),
    };

    let block = store::update_file(&path, update)
        .with_context(|| format!("Failed to update {}", path.display()))?;
    println!("{}.{}.{}", block.major, block.minor, block.build);
    Ok(())
}
