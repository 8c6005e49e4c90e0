use super::*;

#[test]
fn rearm_invalidates_previous_token() {
    let mut t = TickTimer::default();
    let first = t.arm(100);
    let second = t.arm(100);
    assert_ne!(first, second);
    assert!(!t.is_live(first));
    assert!(t.is_live(second));
}

#[test]
fn cancelled_token_cannot_be_taken() {
    let mut t = TickTimer::default();
    let tok = t.arm(50);
    t.cancel();
    assert!(!t.take(tok));
    assert_eq!(t.deadline(), None);
}

#[test]
fn due_respects_deadline() {
    let mut t = TickTimer::default();
    let tok = t.arm(300);
    assert_eq!(t.due(299), None);
    assert_eq!(t.due(300), Some(tok));
    assert!(t.take(tok));
    assert_eq!(t.live(), None);
}
