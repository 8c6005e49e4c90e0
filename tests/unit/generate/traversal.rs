use super::*;

fn labels(seq: &StepSequence) -> Vec<String> {
    let last = seq.last().unwrap().snapshot().as_traversal().unwrap();
    last.visited_labels().into_iter().map(str::to_owned).collect()
}

fn order_of(order: TraversalOrder) -> String {
    labels(&generate(order, &BinaryTree::sample(), 15).unwrap()).concat()
}

#[test]
fn sample_tree_orders() {
    assert_eq!(order_of(TraversalOrder::InOrder), "ABCDEFGHI");
    assert_eq!(order_of(TraversalOrder::PreOrder), "FBADCEGIH");
    assert_eq!(order_of(TraversalOrder::PostOrder), "ACEDBHIGF");
    assert_eq!(order_of(TraversalOrder::LevelOrder), "FBGADICEH");
}

#[test]
fn one_visit_step_per_node_between_start_and_complete() {
    let seq = generate(TraversalOrder::InOrder, &BinaryTree::sample(), 15).unwrap();
    assert_eq!(seq.len(), 11);
    assert_eq!(seq[0].kind(), StepKind::TraversalStart);
    assert_eq!(seq[10].kind(), StepKind::TraversalComplete);
    assert!(seq[1..10].iter().all(|s| s.kind() == StepKind::TraversalVisit));
    assert_eq!(
        seq[0].narration(),
        "Starting In Order traversal (Left, Root, Right)."
    );
    assert_eq!(
        seq[10].narration(),
        "In Order traversal complete: A, B, C, D, E, F, G, H, I."
    );
}

#[test]
fn level_order_tracks_the_queue() {
    let seq = generate(TraversalOrder::LevelOrder, &BinaryTree::sample(), 15).unwrap();
    let first_visit = seq[1].snapshot().as_traversal().unwrap();
    // F visited; B and G queued.
    let queued: Vec<_> = first_visit
        .frontier
        .iter()
        .map(|id| first_visit.nodes[id.0 as usize].label.as_str())
        .collect();
    assert_eq!(queued, vec!["B", "G"]);
}

#[test]
fn flattened_nodes_keep_parent_and_side() {
    let seq = generate(TraversalOrder::PreOrder, &BinaryTree::sample(), 15).unwrap();
    let snap = seq[0].snapshot().as_traversal().unwrap();
    let g = snap.nodes.iter().find(|n| n.label == "G").unwrap();
    assert_eq!(g.parent, Some(NodeId(0)));
    assert_eq!(g.side, Some(TreeSide::Right));
    assert_eq!(g.depth, 1);
}

#[test]
fn too_many_nodes_is_rejected() {
    let err = generate(TraversalOrder::InOrder, &BinaryTree::sample(), 8).unwrap_err();
    assert!(matches!(err, VizError::LimitExceeded(_)));
}

#[test]
fn single_node_tree() {
    let seq = generate(TraversalOrder::PostOrder, &BinaryTree::leaf("Z"), 15).unwrap();
    assert_eq!(seq.len(), 3);
    assert_eq!(labels(&seq), vec!["Z".to_owned()]);
}

#[test]
fn blank_labels_are_invalid() {
    let tree = BinaryTree::node("A", Some(BinaryTree::leaf(" ")), None);
    let err = generate(TraversalOrder::InOrder, &tree, 15).unwrap_err();
    assert!(matches!(err, VizError::InvalidInput(_)));
}

#[test]
fn tree_parses_from_nested_json() {
    let tree: BinaryTree =
        serde_json::from_str(r#"{"value":"A","right":{"value":"B"}}"#).unwrap();
    assert_eq!(tree.len(), 2);
    assert!(tree.left.is_none());
}
