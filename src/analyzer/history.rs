use crate::boundary::BoundaryWarning;
use crate::domain::{AlphaMarker, Release, ReleaseType, TagParser};
use crate::error::{ReleaseError, Result};
use crate::source::TagSource;
use tracing::debug;

/// Ordered release history, newest first as supplied by the tag source
///
/// Built once per run and never re-sorted; queries sort their own output.
#[derive(Debug, Clone, Default)]
pub struct History {
    releases: Vec<Release>,
}

impl History {
    pub fn new(releases: Vec<Release>) -> Self {
        History { releases }
    }

    /// Build a history from raw tags, dropping the ones that do not parse
    pub fn from_tags<I, S>(tags: I, parser: &TagParser) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let releases = tags
            .into_iter()
            .filter_map(|tag| {
                let tag = tag.as_ref();
                let parsed = parser.try_parse(tag);
                if parsed.is_none() {
                    debug!("{}", unparsable(tag));
                }
                parsed
            })
            .collect();
        History { releases }
    }

    /// Build a history from the releases of `repo`, keeping each origin
    pub fn from_source<T>(source: &T, repo: &str, parser: &TagParser) -> Result<Self>
    where
        T: TagSource + ?Sized,
    {
        let releases = source
            .list_releases(repo)?
            .into_iter()
            .filter_map(|origin| match parser.parse(&origin.tag_name) {
                Ok(release) => Some(release.with_origin(origin)),
                Err(_) => {
                    debug!("{}", unparsable(&origin.tag_name));
                    None
                }
            })
            .collect();
        Ok(History { releases })
    }

    pub fn releases(&self) -> &[Release] {
        &self.releases
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    /// First entry of the history, normally the most recent release
    pub fn newest(&self) -> Option<&Release> {
        self.releases.first()
    }

    /// Version queries start from when nothing else is given
    ///
    /// The newest release, or the `0.0.0` sentinel for an empty history.
    pub fn default_reference(&self) -> Release {
        self.newest().cloned().unwrap_or_else(Release::sentinel)
    }

    /// History entry with exactly the same version as `candidate`
    ///
    /// Unlike `Release` equality, build metadata must match as well.
    pub fn find(&self, candidate: &Release) -> Option<&Release> {
        self.releases
            .iter()
            .find(|release| release.version() == candidate.version())
    }

    /// The matching history entry, or `candidate` itself if there is none
    pub fn resolve(&self, candidate: Release) -> Release {
        match self.find(&candidate) {
            Some(release) => release.clone(),
            None => candidate,
        }
    }

    /// Start a query relative to `reference`
    pub fn query<'h>(&'h self, reference: &'h Release) -> Query<'h> {
        Query {
            history: self,
            reference,
            cycle: false,
        }
    }
}

fn unparsable(tag: &str) -> BoundaryWarning {
    BoundaryWarning::UnparsableTag {
        tag: tag.to_string(),
    }
}

/// Questions about the history asked relative to a reference version
///
/// Only releases at or below the reference are ever considered.
#[derive(Debug, Clone, Copy)]
pub struct Query<'h> {
    history: &'h History,
    reference: &'h Release,
    cycle: bool,
}

impl<'h> Query<'h> {
    /// Restrict results to the release cycle of the reference
    ///
    /// major/minor: same major; patch: same major and minor;
    /// alpha: same major, minor and patch; untyped: same major.
    pub fn in_cycle(mut self, cycle: bool) -> Self {
        self.cycle = cycle;
        self
    }

    pub fn reference(&self) -> &'h Release {
        self.reference
    }

    /// Releases eligible for `release_type`, highest version first
    pub fn eligible(&self, release_type: Option<ReleaseType>) -> Vec<&'h Release> {
        let reference = self.reference.version();
        let mut eligible: Vec<&Release> = self
            .history
            .releases()
            .iter()
            .filter(|release| *release <= self.reference)
            .filter(|release| match release_type {
                Some(kind) => kind.matches(release.version()),
                None => true,
            })
            .filter(|release| {
                if !self.cycle {
                    return true;
                }
                match release_type {
                    Some(kind) => kind.in_cycle(release.version(), reference),
                    None => release.major() == reference.major,
                }
            })
            .collect();

        eligible.sort_by(|a, b| b.cmp(a));
        eligible
    }

    /// Highest eligible release
    ///
    /// Without a type and nothing eligible, the reference itself is the
    /// latest known version. With a type, an empty result is `0.0.0`.
    pub fn latest(&self, release_type: Option<ReleaseType>) -> Release {
        let eligible = self.eligible(release_type);
        match (eligible.first(), release_type) {
            (Some(latest), _) => (*latest).clone(),
            (None, None) => self.reference.clone(),
            (None, Some(_)) => Release::sentinel(),
        }
    }

    /// Lowest eligible release, `0.0.0` if none
    pub fn first(&self, release_type: Option<ReleaseType>) -> Result<Release> {
        self.require_history()?;
        Ok(self
            .eligible(release_type)
            .into_iter()
            .min()
            .cloned()
            .unwrap_or_else(Release::sentinel))
    }

    /// Eligible release right before the most recent one
    ///
    /// Falls back to the only eligible release when there is just one, and
    /// to `0.0.0` when there is none.
    pub fn last(&self, release_type: Option<ReleaseType>) -> Result<Release> {
        self.require_history()?;
        let eligible = self.eligible(release_type);
        let index = if eligible.len() > 1 { 1 } else { 0 };
        Ok(eligible
            .get(index)
            .map(|release| (*release).clone())
            .unwrap_or_else(Release::sentinel))
    }

    /// Next version after the reference; does not look at the history
    pub fn next(&self, release_type: Option<ReleaseType>, marker: &AlphaMarker) -> Result<Release> {
        self.reference.next(release_type, marker)
    }

    fn require_history(&self) -> Result<()> {
        if self.history.is_empty() {
            return Err(ReleaseError::EmptyHistory);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> TagParser {
        TagParser::new(AlphaMarker::default()).unwrap()
    }

    fn history(tags: &[&str]) -> History {
        History::from_tags(tags, &parser())
    }

    fn release(tag: &str) -> Release {
        parser().parse(tag).unwrap()
    }

    #[test]
    fn test_from_tags_skips_invalid_and_keeps_order() {
        let h = history(&["v2.0.0", "nightly", "v1.0.0", "1.5.0"]);
        let rendered: Vec<String> = h.releases().iter().map(|r| r.to_string()).collect();
        assert_eq!(rendered, vec!["v2.0.0", "v1.0.0", "1.5.0"]);
    }

    #[test]
    fn test_latest_minor_without_cycle() {
        let h = history(&["v2.0.0", "v1.5.0", "v1.4.2", "v1.4.1"]);
        let reference = release("2.0.0");
        let latest = h.query(&reference).latest(Some(ReleaseType::Minor));
        assert_eq!(latest, release("1.5.0"));
        assert_eq!(latest.prefix(), "v");
    }

    #[test]
    fn test_patch_queries_in_cycle() {
        let h = history(&["v2.0.0", "v1.5.0", "v1.4.2", "v1.4.1"]);
        let reference = release("1.4.2");
        let query = h.query(&reference).in_cycle(true);
        assert_eq!(query.latest(Some(ReleaseType::Patch)), release("1.4.2"));
        assert_eq!(query.last(Some(ReleaseType::Patch)).unwrap(), release("1.4.1"));
        assert_eq!(query.first(Some(ReleaseType::Patch)).unwrap(), release("1.4.1"));
    }

    #[test]
    fn test_never_considers_newer_versions() {
        let h = history(&["v2.0.0", "v1.5.0", "v1.4.2"]);
        let reference = release("1.4.2");
        let eligible = h.query(&reference).eligible(None);
        assert!(eligible.iter().all(|r| **r <= reference));
        assert_eq!(eligible.len(), 1);
    }

    #[test]
    fn test_cycle_restricts_major_line() {
        let h = history(&["1.2.0", "1.1.0", "0.9.0", "0.8.0"]);
        let reference = release("1.2.0");
        let all = h.query(&reference).eligible(Some(ReleaseType::Minor));
        assert_eq!(all.len(), 4);
        let cycle = h
            .query(&reference)
            .in_cycle(true)
            .eligible(Some(ReleaseType::Minor));
        assert_eq!(cycle.len(), 2);
        assert_eq!(
            h.query(&reference)
                .in_cycle(true)
                .first(Some(ReleaseType::Minor))
                .unwrap(),
            release("1.1.0")
        );
    }

    #[test]
    fn test_alpha_queries() {
        let h = history(&["0.2.0a3", "0.2.0a2", "0.1.1", "0.1.1a1", "0.2.0a1"]);
        let reference = release("0.2.0a3");
        let query = h.query(&reference).in_cycle(true);
        assert_eq!(query.latest(Some(ReleaseType::Alpha)), release("0.2.0a3"));
        assert_eq!(query.last(Some(ReleaseType::Alpha)).unwrap(), release("0.2.0a2"));
        assert_eq!(query.first(Some(ReleaseType::Alpha)).unwrap(), release("0.2.0a1"));

        let all = h.query(&reference).eligible(Some(ReleaseType::Alpha));
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_eligible_sorts_unordered_history() {
        let h = history(&["1.0.1", "1.0.3", "1.0.2"]);
        let reference = release("1.0.3");
        let eligible = h.query(&reference).eligible(Some(ReleaseType::Patch));
        let rendered: Vec<String> = eligible.iter().map(|r| r.to_string()).collect();
        assert_eq!(rendered, vec!["1.0.3", "1.0.2", "1.0.1"]);
        // the raw history stays as given
        assert_eq!(h.releases()[0], release("1.0.1"));
    }

    #[test]
    fn test_last_with_single_match() {
        let h = history(&["1.1.0", "1.0.0"]);
        let reference = release("1.1.0");
        let last = h.query(&reference).last(Some(ReleaseType::Minor)).unwrap();
        assert_eq!(last, release("1.1.0"));
    }

    #[test]
    fn test_sentinel_when_nothing_matches() {
        let h = history(&["1.0.1", "1.0.0"]);
        let reference = release("1.0.1");
        let query = h.query(&reference);
        assert_eq!(query.latest(Some(ReleaseType::Minor)), Release::sentinel());
        assert_eq!(query.first(Some(ReleaseType::Alpha)).unwrap(), Release::sentinel());
        assert_eq!(query.last(Some(ReleaseType::Minor)).unwrap(), Release::sentinel());
    }

    #[test]
    fn test_empty_history() {
        let h = History::default();
        let reference = release("1.2.3");
        let query = h.query(&reference);
        assert!(matches!(
            query.first(Some(ReleaseType::Major)),
            Err(ReleaseError::EmptyHistory)
        ));
        assert!(matches!(query.last(None), Err(ReleaseError::EmptyHistory)));
        assert_eq!(query.latest(None), reference);
        assert_eq!(query.latest(Some(ReleaseType::Major)), Release::sentinel());
    }

    #[test]
    fn test_latest_without_type_falls_back_to_reference() {
        let h = history(&["2.0.0"]);
        let reference = release("1.0.0");
        assert_eq!(h.query(&reference).latest(None), reference);
    }

    #[test]
    fn test_next_ignores_history() {
        let h = history(&["9.9.9"]);
        let reference = release("1.2.3");
        let marker = AlphaMarker::default();
        let next = h
            .query(&reference)
            .next(Some(ReleaseType::Minor), &marker)
            .unwrap();
        assert_eq!(next, release("1.3.0"));
    }

    #[test]
    fn test_resolve_prefers_history_entry() {
        let h = history(&["v1.2.3", "v1.2.2"]);
        let resolved = h.resolve(release("1.2.3"));
        assert_eq!(resolved.prefix(), "v");

        let unknown = h.resolve(release("1.9.0"));
        assert_eq!(unknown, release("1.9.0"));
        assert_eq!(unknown.prefix(), "");
    }

    #[test]
    fn test_resolve_matches_build_metadata() {
        let h = history(&["v1.2.3+ci.2", "r1.2.3+ci.1"]);
        assert_eq!(h.resolve(release("1.2.3+ci.1")).prefix(), "r");
        assert_eq!(h.resolve(release("1.2.3+ci.2")).prefix(), "v");
        assert_eq!(h.resolve(release("1.2.3")).prefix(), "");
    }

    #[test]
    fn test_build_metadata_does_not_affect_eligibility() {
        let h = history(&["v1.0.0+ci.7"]);
        let reference = release("1.0.0");
        let query = h.query(&reference);
        assert_eq!(query.eligible(None).len(), 1);
        assert_eq!(query.latest(None).build(), Some("ci.7"));
    }

    #[test]
    fn test_default_reference() {
        assert_eq!(History::default().default_reference(), Release::sentinel());
        assert_eq!(
            history(&["v3.0.0", "v2.0.0"]).default_reference(),
            release("3.0.0")
        );
    }

    #[test]
    fn test_from_source_keeps_origin() {
        use crate::source::MockTagSource;

        let source = MockTagSource::with_tags("o/r", &["v1.1.0", "junk", "v1.0.0"]);
        let h = History::from_source(&source, "o/r", &parser()).unwrap();
        assert_eq!(h.len(), 2);
        assert_eq!(h.releases()[0].tag(), Some("v1.1.0"));
        assert!(h.releases().iter().all(|r| r.released()));
    }

    #[test]
    fn test_from_source_propagates_failure() {
        use crate::source::MockTagSource;

        let source = MockTagSource::failing("boom");
        assert!(History::from_source(&source, "o/r", &parser()).is_err());
    }
}
