use super::*;

#[test]
fn leaves_are_spaced_and_parent_centered() {
    // 0 -> {1, 2}
    let pos = tidy(&[None, Some(0), Some(0)]);
    assert_eq!(pos[1], Point { x: 0.0, y: LEVEL_GAP });
    assert_eq!(pos[2], Point { x: LEAF_GAP, y: LEVEL_GAP });
    assert_eq!(pos[0], Point { x: LEAF_GAP / 2.0, y: 0.0 });
}

#[test]
fn chain_stacks_vertically() {
    let pos = tidy(&[None, Some(0), Some(1)]);
    assert!(pos.iter().all(|p| p.x == 0.0));
    assert_eq!(pos[2].y, 2.0 * LEVEL_GAP);
}

#[test]
fn layout_is_deterministic_and_nonoverlapping_for_leaves() {
    let parents = [None, Some(0), Some(1), Some(1), Some(0), Some(4)];
    let a = tidy(&parents);
    assert_eq!(a, tidy(&parents));
    let leaves = [2, 3, 5];
    for w in leaves.windows(2) {
        assert!(a[w[0]].x < a[w[1]].x);
    }
}

#[test]
fn forward_parent_is_treated_as_root() {
    let pos = tidy(&[Some(1), None]);
    assert_eq!(pos.len(), 2);
    assert_eq!(pos[0].y, 0.0);
}

#[test]
fn empty_input() {
    assert!(tidy(&[]).is_empty());
}
