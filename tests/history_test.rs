use semver_release::analyzer::{cycle_edge, CycleEdge, History};
use semver_release::domain::{AlphaMarker, Release, ReleaseType, TagParser};
use semver_release::ReleaseError;

fn parser() -> TagParser {
    TagParser::new(AlphaMarker::default()).unwrap()
}

fn history(tags: &[&str]) -> History {
    History::from_tags(tags, &parser())
}

fn release(text: &str) -> Release {
    parser().parse(text).unwrap()
}

#[test]
fn test_final_release_outranks_its_alpha() {
    assert!(release("1.2.3") > release("1.2.3a1"));
    assert!(release("1.2.3a2") > release("1.2.3a1"));
    assert!(release("1.2.4a1") > release("1.2.3"));
}

#[test]
fn test_parsed_tags_print_back_compactly() {
    for tag in ["v2.1.0", "2.1.0a3", "release-1.0.0", "v/1.0.0a12"] {
        let parsed = release(tag);
        assert_eq!(release(&parsed.to_package_string()), parsed, "{}", tag);
        assert_eq!(parsed.to_package_string(), tag);
    }
}

#[test]
fn test_zero_alpha_count_is_final() {
    let parsed = release("1.0.0a0");
    assert!(!parsed.is_prerelease());
    assert_eq!(parsed.to_package_string(), "1.0.0");
}

#[test]
fn test_next_bumps() {
    let marker = AlphaMarker::new("alpha").unwrap();
    let base = Release::new(1, 2, 3);
    let next = |rtype| base.next(Some(rtype), &marker).unwrap().to_string();

    assert_eq!(next(ReleaseType::Patch), "1.2.4");
    assert_eq!(next(ReleaseType::Minor), "1.3.0");
    assert_eq!(next(ReleaseType::Major), "2.0.0");
    assert_eq!(next(ReleaseType::Alpha), "1.2.3-alpha.1");

    let alpha = base.next(Some(ReleaseType::Alpha), &marker).unwrap();
    assert_eq!(
        alpha.next(Some(ReleaseType::Alpha), &marker).unwrap().to_string(),
        "1.2.3-alpha.2"
    );
}

#[test]
fn test_queries_over_history() {
    let h = history(&["v2.0.0", "v1.5.0", "v1.4.2", "v1.4.1"]);

    let newest = release("2.0.0");
    assert_eq!(
        h.query(&newest).latest(Some(ReleaseType::Minor)).to_string(),
        "v1.5.0"
    );

    let reference = release("1.4.2");
    let cycle = h.query(&reference).in_cycle(true);
    assert_eq!(cycle.latest(Some(ReleaseType::Patch)).to_string(), "v1.4.2");
    assert_eq!(
        cycle.last(Some(ReleaseType::Patch)).unwrap().to_string(),
        "v1.4.1"
    );
    assert_eq!(
        cycle.first(Some(ReleaseType::Patch)).unwrap().to_string(),
        "v1.4.1"
    );
}

#[test]
fn test_empty_history_edges() {
    let h = History::default();
    let reference = release("1.0.0");
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
fn test_raw_history_order_is_kept() {
    let h = history(&["v1.4.3", "v2.0.0", "v1.4.2"]);
    let tags: Vec<String> = h.releases().iter().map(|r| r.to_string()).collect();
    assert_eq!(tags, vec!["v1.4.3", "v2.0.0", "v1.4.2"]);
}

#[test]
fn test_cycle_start_edges() {
    let h = history(&["v1.4.2", "v1.4.1", "v1.4.0", "v1.3.1", "v1.3.0"]);
    let edge = |e| {
        cycle_edge(&h, ReleaseType::Minor, e)
            .map(|r| r.to_string())
            .unwrap()
    };

    assert_eq!(edge(CycleEdge::First), "v1.4.0");
    assert_eq!(edge(CycleEdge::Start), "v1.3.1");
    assert_eq!(edge(CycleEdge::Last), "v1.4.2");
    assert!(cycle_edge(&History::default(), ReleaseType::Minor, CycleEdge::Start).is_none());
}
