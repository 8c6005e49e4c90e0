use super::*;

#[test]
fn virtual_clock_clones_share_time() {
    let a = VirtualClock::new();
    let b = a.clone();
    a.advance(250);
    assert_eq!(b.now_ms(), 250);
}

#[test]
fn virtual_clock_is_monotonic() {
    let c = VirtualClock::new();
    c.set(100);
    c.set(40);
    assert_eq!(c.now_ms(), 100);
}

#[test]
fn system_clock_starts_near_zero() {
    let c = SystemClock::new();
    assert!(c.now_ms() < 1_000);
}
