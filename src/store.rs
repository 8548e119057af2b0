//! Version store codec
//!
//! A version file carries its version in a marker-delimited block:
//!
//! ```text
//! # START_VERSION_BLOCK
//! VERSION_MAJOR = 0
//! VERSION_MINOR = 4
//! VERSION_BUILD = 2
//! VERSION_ALPHA = 3
//! # END_VERSION_BLOCK
//! ```
//!
//! `VERSION_BUILD` is the semantic patch number and `VERSION_ALPHA` the alpha
//! count, where 0 means a final release. Prefix and build metadata cannot be
//! represented and are dropped on write.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use regex::Regex;
use tracing::info;

use crate::domain::{AlphaMarker, Release};
use crate::error::{ReleaseError, Result};

pub const START_MARKER: &str = "# START_VERSION_BLOCK";
pub const END_MARKER: &str = "# END_VERSION_BLOCK";

/// The four integers held by a version block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VersionBlock {
    pub major: u64,
    pub minor: u64,
    pub build: u64,
    pub alpha: u64,
}

impl VersionBlock {
    /// Extract the block from the text of a version file
    pub fn parse(text: &str) -> Result<Self> {
        let body = block_regex()?
            .captures(text)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| {
                ReleaseError::store(format!(
                    "No '{}' ... '{}' block found",
                    START_MARKER, END_MARKER
                ))
            })?;

        let assignment = Regex::new(r"(?m)^\s*VERSION_([A-Z]+)\s*=\s*(\d+)[ \t]*(?:#.*)?$")
            .map_err(|e| ReleaseError::store(format!("Invalid assignment pattern: {}", e)))?;

        let (mut major, mut minor, mut build, mut alpha) = (None, None, None, None);
        for captures in assignment.captures_iter(body) {
            let value: u64 = captures[2].parse().map_err(|_| {
                ReleaseError::store(format!("VERSION_{} is out of range", &captures[1]))
            })?;
            match &captures[1] {
                "MAJOR" => major = Some(value),
                "MINOR" => minor = Some(value),
                "BUILD" => build = Some(value),
                "ALPHA" => alpha = Some(value),
                _ => {}
            }
        }

        let require = |value: Option<u64>, name: &str| {
            value.ok_or_else(|| {
                ReleaseError::store(format!(
                    "VERSION_{} is missing from the version block",
                    name
                ))
            })
        };
        Ok(VersionBlock {
            major: require(major, "MAJOR")?,
            minor: require(minor, "MINOR")?,
            build: require(build, "BUILD")?,
            alpha: require(alpha, "ALPHA")?,
        })
    }

    /// Render the block exactly as it is stored, including both markers
    pub fn render(&self) -> String {
        format!(
            "{START_MARKER}\nVERSION_MAJOR = {}\nVERSION_MINOR = {}\nVERSION_BUILD = {}\nVERSION_ALPHA = {}\n{END_MARKER}\n",
            self.major, self.minor, self.build, self.alpha
        )
    }

    pub fn from_release(release: &Release, marker: &AlphaMarker) -> Result<Self> {
        let alpha = marker.count(&release.version().pre).ok_or_else(|| {
            ReleaseError::store(format!(
                "Pre-release '{}' has no '{}' alpha count",
                release.version().pre,
                marker
            ))
        })?;

        Ok(VersionBlock {
            major: release.major(),
            minor: release.minor(),
            build: release.patch(),
            alpha,
        })
    }

    pub fn to_release(&self, marker: &AlphaMarker) -> Result<Release> {
        Ok(Release::new(self.major, self.minor, self.build)
            .with_prerelease(marker.prerelease(self.alpha)?))
    }

    /// Next patch as a final release
    pub fn bump_build(self) -> Result<Self> {
        let build = self.build.checked_add(1).ok_or_else(|| {
            ReleaseError::store(format!("VERSION_BUILD {} cannot be incremented", self.build))
        })?;
        Ok(VersionBlock {
            build,
            alpha: 0,
            ..self
        })
    }

    /// Same version as a final release
    pub fn finalize(self) -> Self {
        VersionBlock { alpha: 0, ..self }
    }
}

fn block_regex() -> Result<Regex> {
    Regex::new(&format!(
        r"(?s){}(.*?){}",
        regex::escape(START_MARKER),
        regex::escape(END_MARKER)
    ))
    .map_err(|e| ReleaseError::store(format!("Invalid block pattern: {}", e)))
}

/// Decode the version held by a version file's text
pub fn decode(text: &str, marker: &AlphaMarker) -> Result<Release> {
    VersionBlock::parse(text)?.to_release(marker)
}

/// Encode a version as a version block
pub fn encode(release: &Release, marker: &AlphaMarker) -> Result<String> {
    Ok(VersionBlock::from_release(release, marker)?.render())
}

/// Replace the version block inside `existing` with `block`
///
/// Text around the block is kept. Without a block in `existing`, the result
/// is `block` alone.
pub fn splice(existing: &str, block: &str) -> Result<String> {
    let regex = block_regex()?;
    match regex.find(existing) {
        Some(found) => {
            let replacement = block.trim_end_matches('\n');
            Ok(format!(
                "{}{}{}",
                &existing[..found.start()],
                replacement,
                &existing[found.end()..]
            ))
        }
        None => Ok(block.to_string()),
    }
}

/// Read the version stored in the file at `path`
pub fn read_release(path: &Path, marker: &AlphaMarker) -> Result<Release> {
    let text = fs::read_to_string(path)?;
    decode(&text, marker)
}

/// Store `block` in the file at `path`, creating the file if needed
pub fn write_block(path: &Path, block: &VersionBlock) -> Result<()> {
    let existing = match fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => return Err(e.into()),
    };

    let rendered = block.render();
    let contents = match existing {
        Some(text) => splice(&text, &rendered)?,
        None => rendered,
    };
    fs::write(path, contents)?;

    info!(path = %path.display(), ?block, "wrote version block");
    Ok(())
}

/// Store `release` in the file at `path`
pub fn write_release(path: &Path, release: &Release, marker: &AlphaMarker) -> Result<()> {
    write_block(path, &VersionBlock::from_release(release, marker)?)
}

/// Rewrite the block of an existing version file through `update`
pub fn update_file<F>(path: &Path, update: F) -> Result<VersionBlock>
where
    F: FnOnce(VersionBlock) -> Result<VersionBlock>,
{
    if !path.is_file() {
        return Err(ReleaseError::store(format!(
            "Not a version file: {}",
            path.display()
        )));
    }
    let text = fs::read_to_string(path)?;
    let block = update(VersionBlock::parse(&text)?)?;
    write_block(path, &block)?;
    Ok(block)
}
