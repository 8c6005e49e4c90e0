use super::*;
use crate::step::model::{SortSnapshot, IndexRoles};

fn sort_snap(values: Vec<i64>) -> Snapshot {
    Snapshot::Sort(SortSnapshot {
        values,
        roles: IndexRoles::default(),
        merge: None,
    })
}

#[test]
fn recorder_fills_blank_narration() {
    let mut rec = StepRecorder::new();
    rec.push(StepKind::SortComplete, sort_snap(vec![1]), "   ");
    let seq = rec.finish();
    assert_eq!(seq.len(), 1);
    assert_eq!(seq[0].narration(), "Sorting complete!");
}

#[test]
fn recorded_snapshots_are_independent_copies() {
    let mut working = vec![3, 1];
    let mut rec = StepRecorder::new();
    rec.push(StepKind::SortCompare, sort_snap(working.clone()), "before");
    working.swap(0, 1);
    rec.push(StepKind::SortSwap, sort_snap(working.clone()), "after");
    let seq = rec.finish();
    assert_eq!(seq[0].snapshot().as_sort().unwrap().values, vec![3, 1]);
    assert_eq!(seq[1].snapshot().as_sort().unwrap().values, vec![1, 3]);
}

#[test]
fn json_round_trip_and_validation() {
    let mut rec = StepRecorder::new();
    rec.push(StepKind::SortCompare, sort_snap(vec![2, 1]), "Comparing 2 and 1.");
    let seq = rec.finish();
    let json = seq.to_json_pretty().unwrap();
    assert_eq!(StepSequence::from_json_str(&json).unwrap(), seq);

    let blank = json.replace("Comparing 2 and 1.", " ");
    assert!(StepSequence::from_json_str(&blank).is_err());

    let foreign = json.replace("sort-compare", "search-probe");
    assert!(StepSequence::from_json_str(&foreign).is_err());
}
