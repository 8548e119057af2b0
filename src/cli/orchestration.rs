//! Release query workflow
//!
//! Resolves the reference version, answers the requested query against the
//! release history and optionally persists the answer to a version file.
//! Kept apart from argument parsing so it can run with any tag source.

use std::path::PathBuf;

use crate::analyzer::History;
use crate::boundary::BoundaryWarning;
use crate::domain::{AlphaMarker, Release, ReleaseType, TagParser};
use crate::error::{ReleaseError, Result};
use crate::source::TagSource;
use crate::store;

/// Which version of the history to answer with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryMode {
    /// The resolved reference version itself
    #[default]
    Current,
    First,
    Last,
    Next,
    Latest,
}

/// Whether and how the answer is written to a version file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SaveMode {
    #[default]
    Off,
    /// Write only when the answer is newer than the reference
    Save(Option<PathBuf>),
    /// Write unconditionally
    Force(Option<PathBuf>),
}

impl SaveMode {
    pub fn is_requested(&self) -> bool {
        !matches!(self, SaveMode::Off)
    }

    fn flag(&self) -> &'static str {
        match self {
            SaveMode::Force(_) => "--fsave",
            _ => "--save",
        }
    }
}

/// Arguments for the release query workflow
///
/// Mirrors the CLI flags in a form that does not depend on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseQueryArgs {
    /// `owner/name` of the repository whose releases form the history
    pub repository: Option<String>,

    /// Restrict queries to the cycle of the reference version
    pub cycle: bool,

    pub release_type: Option<ReleaseType>,

    pub mode: QueryMode,

    /// Version file to read the reference version from
    pub file: Option<PathBuf>,

    /// Explicit reference version
    pub version: Option<String>,

    pub save: SaveMode,

    pub alpha_marker: AlphaMarker,
}

impl Default for ReleaseQueryArgs {
    fn default() -> Self {
        ReleaseQueryArgs {
            repository: None,
            cycle: false,
            release_type: None,
            mode: QueryMode::default(),
            file: None,
            version: None,
            save: SaveMode::default(),
            alpha_marker: AlphaMarker::default(),
        }
    }
}

impl ReleaseQueryArgs {
    /// Reject argument combinations that cannot produce an answer
    pub fn validate(&self) -> Result<()> {
        if self.file.is_some() && self.version.is_some() {
            return Err(ReleaseError::usage(
                "--file and --version cannot be used together",
            ));
        }
        if self.repository.is_none() && self.file.is_none() && self.version.is_none() {
            return Err(ReleaseError::usage(
                "either set up an environment variable `GITHUB_REPOSITORY` or pass --version or --file",
            ));
        }
        if self.save.is_requested() && self.file.is_none() && self.version.is_none() {
            return Err(ReleaseError::usage(format!(
                "{} needs a version source (ie --file /path/to/version.py or --version 1.2.3)",
                self.save.flag()
            )));
        }
        self.save_target()?;
        Ok(())
    }

    /// File to write and whether the write is forced
    fn save_target(&self) -> Result<Option<(PathBuf, bool)>> {
        let (path, force) = match &self.save {
            SaveMode::Off => return Ok(None),
            SaveMode::Save(path) => (path, false),
            SaveMode::Force(path) => (path, true),
        };

        match path.as_ref().or(self.file.as_ref()) {
            Some(path) => Ok(Some((path.clone(), force))),
            None => Err(ReleaseError::usage(format!(
                "No file specified to save the version to (ie {} /path/to/version.py)",
                self.save.flag()
            ))),
        }
    }
}

/// Result of a release query
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    /// Version the query was answered relative to
    pub reference: Release,

    /// The answer
    pub release: Release,

    /// The answer in compact packaging form, as printed
    pub output: String,

    /// Version file written, if any
    pub saved_to: Option<PathBuf>,

    /// Non-fatal conditions met on the way, for the caller to report
    pub warnings: Vec<BoundaryWarning>,
}

/// Run the release query workflow
pub fn run_query<S>(args: &ReleaseQueryArgs, source: &S) -> Result<QueryResult>
where
    S: TagSource + ?Sized,
{
    args.validate()?;
    let marker = &args.alpha_marker;
    let parser = TagParser::new(marker.clone())?;
    let mut warnings = Vec::new();

    let history = match &args.repository {
        Some(repo) => {
            let history = History::from_source(source, repo, &parser)?;
            if history.is_empty() {
                warnings.push(BoundaryWarning::EmptyHistory {
                    repository: repo.clone(),
                });
            }
            history
        }
        None => History::default(),
    };

    let reference = resolve_reference(args, &history, &parser)?;
    let query = history.query(&reference).in_cycle(args.cycle);
    let release = match args.mode {
        QueryMode::Current => reference.clone(),
        QueryMode::First => query.first(args.release_type)?,
        QueryMode::Last => query.last(args.release_type)?,
        QueryMode::Next => query.next(args.release_type, marker)?,
        QueryMode::Latest => query.latest(args.release_type),
    };

    let saved_to = match args.save_target()? {
        Some((path, force)) if force || release > reference => {
            store::write_release(&path, &release, marker)?;
            Some(path)
        }
        Some((path, _)) => {
            warnings.push(BoundaryWarning::DowngradeRefused {
                path: path.display().to_string(),
                version: release.to_package_string(),
                reference: reference.to_package_string(),
            });
            None
        }
        None => None,
    };

    Ok(QueryResult {
        output: release.to_package_string(),
        reference,
        release,
        saved_to,
        warnings,
    })
}

fn resolve_reference(args: &ReleaseQueryArgs, history: &History, parser: &TagParser) -> Result<Release> {
    if let Some(version) = &args.version {
        return Ok(history.resolve(parser.parse(version)?));
    }
    if let Some(file) = &args.file {
        return Ok(history.resolve(store::read_release(file, parser.marker())?));
    }

    let newest = history.default_reference();
    Ok(history.query(&newest).in_cycle(args.cycle).latest(None))
}
