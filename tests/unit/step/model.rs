use super::*;

#[test]
fn kind_tags_match_serde_names() {
    for kind in [
        StepKind::SearchProbe,
        StepKind::SortCompare,
        StepKind::SortSwap,
        StepKind::RecursionCall,
        StepKind::RecursionBaseCase,
        StepKind::RecursionReturn,
        StepKind::StructureMutate,
        StepKind::TraversalVisit,
    ] {
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, format!("\"{}\"", kind.as_str()));
    }
}

#[test]
fn kind_family_matches_prefix() {
    assert_eq!(StepKind::SearchMiss.family(), Family::Search);
    assert_eq!(StepKind::SortDivide.family(), Family::Sort);
    assert_eq!(StepKind::RecursionMove.family(), Family::Recursion);
    assert_eq!(StepKind::StructureInspect.family(), Family::Structure);
    assert_eq!(StepKind::TraversalComplete.family(), Family::Traversal);
}

#[test]
fn snapshot_is_tagged_by_family() {
    let snap = Snapshot::Search(SearchSnapshot {
        values: vec![1, 2, 3],
        target: 2,
        window: Some(SearchWindow { low: 0, high: 2 }),
        mid: None,
        current: None,
        found: None,
    });
    let v = serde_json::to_value(&snap).unwrap();
    assert_eq!(v["family"], "search");
    assert_eq!(v["window"]["high"], 2);
    assert!(v.get("found").is_none());
    let back: Snapshot = serde_json::from_value(v).unwrap();
    assert_eq!(back, snap);
}

#[test]
fn pegs_move_top_disk() {
    let mut pegs = Pegs::new(3);
    assert_eq!(pegs.rod(Peg::A), &[3, 2, 1]);
    assert_eq!(pegs.move_top(Peg::A, Peg::C), Some(1));
    assert_eq!(pegs.rod(Peg::C), &[1]);
    assert_eq!(pegs.move_top(Peg::B, Peg::C), None);
}

#[test]
fn traversal_rules_are_stable() {
    assert_eq!(TraversalOrder::InOrder.rule(), "(Left, Root, Right)");
    assert_eq!(TraversalOrder::LevelOrder.label(), "Level Order");
}
