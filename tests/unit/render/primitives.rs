use super::*;
use crate::generate::recursion::{self, RecursionAlgorithm};
use crate::generate::search::{self, SearchAlgorithm};
use crate::generate::sort::{self, SortAlgorithm};
use crate::generate::structure::{Structure, StructureOp, apply};
use crate::generate::traversal::{self, BinaryTree};
use crate::step::model::{StepKind, TraversalOrder};

fn bars_of(frame: &VisualFrame) -> &[Bar] {
    match &frame.body {
        FrameBody::Bars { bars, .. } => bars,
        other => panic!("expected bars, got {other:?}"),
    }
}

#[test]
fn caption_is_the_narration() {
    let seq = sort::generate(SortAlgorithm::Bubble, &[2, 1], 15).unwrap();
    let frame = to_visual(&seq[0]);
    assert_eq!(frame.caption, seq[0].narration());
}

#[test]
fn sort_swap_and_sorted_highlights() {
    let seq = sort::generate(SortAlgorithm::Bubble, &[3, 1, 2], 15).unwrap();
    let swap = to_visual(&seq[1]);
    let bars = bars_of(&swap);
    assert_eq!(bars[0].highlight, Highlight::Swap);
    assert_eq!(bars[1].highlight, Highlight::Swap);

    let done = to_visual(seq.last().unwrap());
    assert!(bars_of(&done).iter().all(|b| b.highlight == Highlight::Sorted));
}

fn merge_runs_of(frame: &VisualFrame) -> &MergeRuns {
    match &frame.body {
        FrameBody::Bars {
            merge: Some(runs), ..
        } => runs,
        other => panic!("expected merge runs, got {other:?}"),
    }
}

#[test]
fn merge_compare_highlights_both_run_heads() {
    let seq = sort::generate(SortAlgorithm::Merge, &[2, 1], 15).unwrap();
    let compares: Vec<_> = seq
        .iter()
        .filter(|s| s.kind() == StepKind::SortCompare)
        .collect();
    assert_eq!(compares.len(), 1);

    let frame = to_visual(compares[0]);
    let runs = merge_runs_of(&frame);
    assert_eq!(runs.left[0].value, 2);
    assert_eq!(runs.left[0].highlight, Highlight::Compare);
    assert_eq!(runs.right[0].value, 1);
    assert_eq!(runs.right[0].highlight, Highlight::Compare);
}

#[test]
fn merge_placement_dims_consumed_elements() {
    let seq = sort::generate(SortAlgorithm::Merge, &[2, 1], 15).unwrap();
    let placed = seq
        .iter()
        .find(|s| s.kind() == StepKind::SortOverwrite)
        .unwrap();
    let frame = to_visual(placed);
    let runs = merge_runs_of(&frame);
    assert_eq!(runs.right[0].highlight, Highlight::Dimmed);
    assert_eq!(runs.left[0].highlight, Highlight::None);
    assert_eq!(bars_of(&frame)[0].highlight, Highlight::Placed);
}

#[test]
fn non_merge_sorts_have_no_runs() {
    let seq = sort::generate(SortAlgorithm::Quick, &[3, 1, 2], 15).unwrap();
    assert!(seq.iter().all(|s| matches!(
        to_visual(s).body,
        FrameBody::Bars { merge: None, .. }
    )));
}

#[test]
fn bar_heights_are_normalized() {
    let seq = sort::generate(SortAlgorithm::Bubble, &[-5, 5, 0], 15).unwrap();
    let frame = to_visual(&seq[0]);
    let bars = bars_of(&frame);
    assert!((bars[0].height - 0.1).abs() < 1e-6);
    assert!((bars[1].height - 1.0).abs() < 1e-6);
    assert!(bars.iter().all(|b| (0.1..=1.0).contains(&b.height)));
}

#[test]
fn equal_values_render_full_height() {
    let seq = sort::generate(SortAlgorithm::Bubble, &[4, 4], 15).unwrap();
    let frame = to_visual(&seq[0]);
    assert!(bars_of(&frame).iter().all(|b| b.height == 1.0));
}

#[test]
fn binary_search_dims_discarded_half() {
    let seq = search::generate(
        SearchAlgorithm::Binary,
        &[11, 23, 35, 42, 51, 66, 73, 89, 97],
        66,
        15,
    )
    .unwrap();
    let discard = seq
        .iter()
        .find(|s| s.kind() == StepKind::SearchDiscard)
        .unwrap();
    let frame = to_visual(discard);
    let bars = bars_of(&frame);
    assert_eq!(bars[0].highlight, Highlight::Dimmed);
    assert_eq!(bars[4].highlight, Highlight::Compare);
    assert_eq!(bars[6].highlight, Highlight::None);

    let found = to_visual(seq.last().unwrap());
    assert_eq!(bars_of(&found)[5].highlight, Highlight::Found);
}

#[test]
fn call_tree_labels_carry_results() {
    let seq = recursion::generate(RecursionAlgorithm::Factorial, 3, 12).unwrap();
    let frame = to_visual(seq.last().unwrap());
    let FrameBody::Tree { nodes, edges, .. } = &frame.body else {
        panic!("expected tree");
    };
    assert_eq!(nodes[0].label, "f(3) = 6");
    assert_eq!(edges, &vec![(0, 1), (1, 2)]);
    assert!(nodes.iter().all(|n| n.highlight == Highlight::Done));
}

#[test]
fn traversal_tree_marks_current_and_visited() {
    let seq = traversal::generate(TraversalOrder::PreOrder, &BinaryTree::sample(), 15).unwrap();
    let frame = to_visual(&seq[2]);
    let FrameBody::Tree { nodes, .. } = &frame.body else {
        panic!("expected tree");
    };
    assert_eq!(nodes[0].highlight, Highlight::Done);
    assert_eq!(nodes[1].highlight, Highlight::Active);
    assert_eq!(nodes[2].highlight, Highlight::None);
    // Root is centered above its subtrees, one level above its children.
    assert_eq!(nodes[0].pos.y, 0.0);
    assert!(nodes[1].pos.x < nodes[0].pos.x);
}

#[test]
fn structure_cells_carry_markers() {
    let list = Structure::with_values(
        StructureKind::Queue,
        vec!["a".to_owned(), "b".to_owned()],
        8,
    )
    .unwrap();
    let out = apply(&list, &StructureOp::Front).unwrap();
    let frame = to_visual(&out.steps[0]);
    let FrameBody::Cells { cells, .. } = &frame.body else {
        panic!("expected cells");
    };
    assert!(cells[0].head && !cells[0].tail);
    assert!(cells[1].tail);
    assert_eq!(cells[0].highlight, Highlight::Active);
}
