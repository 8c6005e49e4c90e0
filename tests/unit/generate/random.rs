use super::*;
use crate::config::VisualizerSettings;
use crate::generate::generate;

#[test]
fn same_seed_same_request() {
    let cfg = VizConfig::default();
    for &algorithm in Algorithm::ALL {
        let a = random_request(algorithm, &cfg, 42);
        let b = random_request(algorithm, &cfg, 42);
        match (a, b) {
            (Ok(a), Ok(b)) => assert_eq!(a, b, "{algorithm}"),
            (Err(_), Err(_)) => {}
            _ => panic!("{algorithm}: seeded runs disagree"),
        }
    }
}

#[test]
fn seeds_vary_the_array() {
    let cfg = VizConfig::default();
    let arrays: Vec<_> = (0..8)
        .map(|seed| random_request(Algorithm::BubbleSort, &cfg, seed).unwrap())
        .collect();
    assert!(arrays.windows(2).any(|w| w[0] != w[1]));
}

#[test]
fn binary_search_array_is_sorted_and_holds_the_target() {
    let cfg = VizConfig::default();
    for seed in 0..20 {
        let GenerateRequest::BinarySearch { array, target } =
            random_request(Algorithm::BinarySearch, &cfg, seed).unwrap()
        else {
            panic!("wrong request variant");
        };
        assert_eq!(array.len(), 15);
        assert!(array.windows(2).all(|w| w[0] <= w[1]));
        assert!(array.contains(&target));
        assert!(array.iter().all(|v| (1..=100).contains(v)));
    }
}

#[test]
fn respects_configured_ceilings() {
    let mut cfg = VizConfig::default();
    let small = VisualizerSettings {
        max_input: 4,
        speed_ms: 100,
    };
    cfg.set(Algorithm::QuickSort, small);
    cfg.set(Algorithm::Fibonacci, small);
    for seed in 0..20 {
        let GenerateRequest::QuickSort { array } =
            random_request(Algorithm::QuickSort, &cfg, seed).unwrap()
        else {
            panic!("wrong request variant");
        };
        assert_eq!(array.len(), 4);

        let GenerateRequest::Fibonacci { n } =
            random_request(Algorithm::Fibonacci, &cfg, seed).unwrap()
        else {
            panic!("wrong request variant");
        };
        assert!((2..=4).contains(&n));
    }
}

#[test]
fn every_random_request_generates() {
    let cfg = VizConfig::default();
    for &algorithm in Algorithm::ALL {
        if algorithm.family() == crate::step::model::Family::Structure {
            assert!(random_request(algorithm, &cfg, 7).is_err());
            continue;
        }
        let req = random_request(algorithm, &cfg, 7).unwrap();
        assert!(!generate(&req, &cfg).unwrap().is_empty(), "{algorithm}");
    }
}
