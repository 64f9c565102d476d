use super::*;

#[test]
fn scans_clockwise_before_anticlockwise_in_edge_order() {
    let mut ledger = EdgeDirectionLedger::new(2);
    assert_eq!(
        ledger.find_next_unconsumed(),
        Some((EdgeIdx(0), Direction::Clockwise))
    );

    ledger.mark(EdgeIdx(0), Direction::Clockwise).unwrap();
    assert_eq!(
        ledger.find_next_unconsumed(),
        Some((EdgeIdx(0), Direction::Anticlockwise))
    );

    ledger.mark(EdgeIdx(0), Direction::Anticlockwise).unwrap();
    ledger.mark(EdgeIdx(1), Direction::Anticlockwise).unwrap();
    assert_eq!(
        ledger.find_next_unconsumed(),
        Some((EdgeIdx(1), Direction::Clockwise))
    );

    ledger.mark(EdgeIdx(1), Direction::Clockwise).unwrap();
    assert_eq!(ledger.find_next_unconsumed(), None);
    assert!(ledger.is_complete());
    assert_eq!(ledger.consumed_count(), 4);
}

#[test]
fn double_mark_is_internal_error() {
    let mut ledger = EdgeDirectionLedger::new(1);
    ledger.mark(EdgeIdx(0), Direction::Clockwise).unwrap();
    assert!(ledger.is_consumed(EdgeIdx(0), Direction::Clockwise));
    assert!(!ledger.is_consumed(EdgeIdx(0), Direction::Anticlockwise));
    let err = ledger.mark(EdgeIdx(0), Direction::Clockwise).unwrap_err();
    assert!(matches!(err, CelticError::InternalConsistency(_)));
}

#[test]
fn out_of_range_edge() {
    let mut ledger = EdgeDirectionLedger::new(1);
    assert!(ledger.mark(EdgeIdx(3), Direction::Clockwise).is_err());
    assert!(!ledger.is_consumed(EdgeIdx(3), Direction::Clockwise));
}

#[test]
fn empty_ledger_is_complete() {
    let ledger = EdgeDirectionLedger::new(0);
    assert!(ledger.is_complete());
    assert_eq!(ledger.find_next_unconsumed(), None);
}
