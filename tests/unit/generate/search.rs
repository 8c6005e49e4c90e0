use super::*;

const SORTED: [i64; 9] = [11, 23, 35, 42, 51, 66, 73, 89, 97];

fn search(s: &crate::step::model::Step) -> &SearchSnapshot {
    s.snapshot().as_search().expect("search snapshot")
}

#[test]
fn binary_search_finds_66_after_discarding_left_half() {
    let seq = generate(SearchAlgorithm::Binary, &SORTED, 66, 15).unwrap();

    let first = search(&seq[0]);
    assert_eq!(seq[0].kind(), StepKind::SearchStart);
    assert_eq!(first.window, Some(SearchWindow { low: 0, high: 8 }));

    let probe = seq
        .iter()
        .find(|s| s.kind() == StepKind::SearchProbe)
        .unwrap();
    assert_eq!(search(probe).mid, Some(4));
    assert_eq!(probe.narration(), "Mid index: 4. Checking value: 51.");

    let discard = seq
        .iter()
        .find(|s| s.kind() == StepKind::SearchDiscard)
        .unwrap();
    assert_eq!(search(discard).mid, Some(4));
    assert!(discard.narration().starts_with("51 < 66. Discarding left half."));
    assert_eq!(search(discard).window, Some(SearchWindow { low: 5, high: 8 }));

    let last = seq.last().unwrap();
    assert_eq!(last.kind(), StepKind::SearchFound);
    assert_eq!(search(last).found, Some(5));
    assert_eq!(last.narration(), "Target found at index 5!");
}

#[test]
fn found_is_only_set_on_the_terminal_step() {
    let seq = generate(SearchAlgorithm::Binary, &SORTED, 11, 15).unwrap();
    let (last, rest) = seq.split_last().unwrap();
    assert_eq!(search(last).found, Some(0));
    assert!(rest.iter().all(|s| search(s).found.is_none()));
}

#[test]
fn binary_search_miss_ends_without_found() {
    let seq = generate(SearchAlgorithm::Binary, &SORTED, 40, 15).unwrap();
    let last = seq.last().unwrap();
    assert_eq!(last.kind(), StepKind::SearchMiss);
    assert_eq!(search(last).found, None);
    assert_eq!(last.narration(), "Target 40 not found.");
    assert!(seq.iter().all(|s| search(s).found.is_none()));
}

#[test]
fn binary_search_below_minimum_does_not_underflow() {
    let seq = generate(SearchAlgorithm::Binary, &SORTED, 1, 15).unwrap();
    assert_eq!(seq.last().unwrap().kind(), StepKind::SearchMiss);
    let probes: Vec<_> = seq
        .iter()
        .filter(|s| s.kind() == StepKind::SearchProbe)
        .map(|s| search(s).mid.unwrap())
        .collect();
    assert_eq!(probes, vec![4, 1, 0]);
}

#[test]
fn binary_search_uses_lower_midpoint() {
    let seq = generate(SearchAlgorithm::Binary, &[1, 2, 3, 4], 4, 15).unwrap();
    let probe = seq
        .iter()
        .find(|s| s.kind() == StepKind::SearchProbe)
        .unwrap();
    assert_eq!(search(probe).mid, Some(1));
}

#[test]
fn binary_search_on_empty_array_is_a_miss() {
    let seq = generate(SearchAlgorithm::Binary, &[], 3, 15).unwrap();
    let kinds: Vec<_> = seq.iter().map(|s| s.kind()).collect();
    assert_eq!(kinds, vec![StepKind::SearchStart, StepKind::SearchMiss]);
    assert_eq!(search(&seq[0]).window, None);
}

#[test]
fn binary_search_rejects_unsorted_input() {
    let err = generate(SearchAlgorithm::Binary, &[3, 1, 2], 1, 15).unwrap_err();
    assert!(matches!(err, VizError::InvalidInput(_)));
}

#[test]
fn oversized_input_is_rejected_before_generation() {
    let values: Vec<i64> = (0..16).collect();
    let err = generate(SearchAlgorithm::Linear, &values, 3, 15).unwrap_err();
    assert!(matches!(err, VizError::LimitExceeded(_)));
}

#[test]
fn linear_search_probes_until_match() {
    let seq = generate(SearchAlgorithm::Linear, &[7, 3, 9, 3], 3, 15).unwrap();
    let probes: Vec<_> = seq
        .iter()
        .filter(|s| s.kind() == StepKind::SearchProbe)
        .map(|s| search(s).current.unwrap())
        .collect();
    assert_eq!(probes, vec![0, 1]);
    assert_eq!(search(seq.last().unwrap()).found, Some(1));
}

#[test]
fn linear_search_accepts_unsorted_and_reports_miss() {
    let seq = generate(SearchAlgorithm::Linear, &[5, 2, 8], 4, 15).unwrap();
    assert_eq!(seq.len(), 5);
    let last = seq.last().unwrap();
    assert_eq!(last.kind(), StepKind::SearchMiss);
    assert_eq!(
        last.narration(),
        "Target 4 not found after checking all elements."
    );
}
