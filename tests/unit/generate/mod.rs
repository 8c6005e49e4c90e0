use super::*;
use crate::config::VisualizerSettings;
use crate::step::model::StepKind;

#[test]
fn algorithm_names_round_trip_through_from_str() {
    for &a in Algorithm::ALL {
        assert_eq!(a.as_str().parse::<Algorithm>().unwrap(), a);
    }
    assert!("bogo-sort".parse::<Algorithm>().is_err());
}

#[test]
fn request_json_uses_algorithm_tag() {
    let req = GenerateRequest::from_json_str(
        r#"{"algorithm":"binary-search","array":[1,3,5],"target":3}"#,
    )
    .unwrap();
    assert_eq!(req.algorithm(), Algorithm::BinarySearch);
    let seq = generate(&req, &VizConfig::default()).unwrap();
    assert_eq!(seq.last().unwrap().kind(), StepKind::SearchFound);
}

#[test]
fn traversal_without_tree_uses_the_sample() {
    let req = GenerateRequest::TreeTraversal {
        order: TraversalOrder::InOrder,
        tree: None,
    };
    let seq = generate(&req, &VizConfig::default()).unwrap();
    assert_eq!(seq.len(), 11);
}

#[test]
fn limits_come_from_config() {
    let mut cfg = VizConfig::default();
    cfg.set(
        Algorithm::BubbleSort,
        VisualizerSettings {
            max_input: 3,
            speed_ms: 400,
        },
    );
    let ok = GenerateRequest::BubbleSort {
        array: vec![3, 2, 1],
    };
    let too_big = GenerateRequest::BubbleSort {
        array: vec![4, 3, 2, 1],
    };
    assert!(generate(&ok, &cfg).is_ok());
    assert!(matches!(
        generate(&too_big, &cfg).unwrap_err(),
        VizError::LimitExceeded(_)
    ));
}

#[test]
fn default_limits_reject_large_recursion() {
    let req = GenerateRequest::Fibonacci { n: 10 };
    assert!(generate(&req, &VizConfig::default()).is_err());
}

#[test]
fn structures_take_their_capacity_from_config() {
    let s = new_structure(StructureKind::LinkedList, &VizConfig::default()).unwrap();
    assert_eq!(s.capacity(), 9);
    assert!(s.is_empty());
}

#[test]
fn every_algorithm_maps_to_a_family() {
    assert_eq!(Algorithm::TowerOfHanoi.family(), Family::Recursion);
    assert_eq!(Algorithm::for_structure(StructureKind::Queue), Algorithm::Queue);
}
