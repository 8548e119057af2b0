use crate::analyzer::history::History;
use crate::domain::{Release, ReleaseType};

/// Which edge of the current release cycle to report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CycleEdge {
    /// The release that closed the previous cycle
    #[default]
    Start,
    /// The oldest release inside the current cycle
    First,
    /// The newest release
    Last,
}

/// Whether `version` belongs to the cycle opened before `latest`
///
/// - patch: same patch, with minor and major not below the latest
/// - minor: same minor, with major not below the latest
/// - major: same major
///
/// Alpha releases never open a cycle.
pub fn opens_cycle(release_type: ReleaseType, version: &Release, latest: &Release) -> bool {
    match release_type {
        ReleaseType::Patch => {
            version.patch() == latest.patch()
                && version.minor() >= latest.minor()
                && version.major() >= latest.major()
        }
        ReleaseType::Minor => {
            version.minor() == latest.minor() && version.major() >= latest.major()
        }
        ReleaseType::Major => version.major() == latest.major(),
        ReleaseType::Alpha => false,
    }
}

/// Locate the requested edge of the newest release's cycle
///
/// Walks the history newest to oldest and keeps the oldest release that
/// still belongs to the cycle. `None` only for an empty history.
pub fn cycle_edge(history: &History, release_type: ReleaseType, edge: CycleEdge) -> Option<&Release> {
    let releases = history.releases();
    let latest = releases.first()?;
    if edge == CycleEdge::Last {
        return Some(latest);
    }

    let mut start = 0;
    for (index, release) in releases.iter().enumerate().skip(1) {
        if opens_cycle(release_type, release, latest) {
            start = index;
        }
    }

    if edge == CycleEdge::Start && start + 1 < releases.len() {
        start += 1;
    }
    releases.get(start)
}
