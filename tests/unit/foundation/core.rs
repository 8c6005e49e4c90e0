use super::*;

#[test]
fn speed_rejects_zero() {
    assert!(SpeedMs::new(0).is_err());
    assert_eq!(SpeedMs::new(250).unwrap().get(), 250);
}

#[test]
fn speed_deserialization_validates() {
    assert!(serde_json::from_str::<SpeedMs>("0").is_err());
    let s: SpeedMs = serde_json::from_str("400").unwrap();
    assert_eq!(s.get(), 400);
    assert_eq!(serde_json::to_string(&s).unwrap(), "400");
}

#[test]
fn index_range_normalizes_and_contains() {
    let r = IndexRange::new(5, 2);
    assert_eq!(r, IndexRange { lo: 2, hi: 5 });
    assert!(r.contains(2));
    assert!(r.contains(5));
    assert!(!r.contains(6));
    assert_eq!(r.span(), 4);
}
