use super::*;

#[test]
fn test_display_matches_as_str() {
    for code in ErrorCode::ALL {
        assert_eq!(code.to_string(), code.as_str());
    }
}

#[test]
fn test_parse_round_trip_case_insensitive() {
    assert_eq!("E2001".parse::<ErrorCode>(), Ok(ErrorCode::E2001));
    assert_eq!("e6004".parse::<ErrorCode>(), Ok(ErrorCode::E6004));
    assert_eq!("E9999".parse::<ErrorCode>(), Err(()));
}

#[test]
fn test_phase_ranges() {
    assert!(ErrorCode::E2002.is_static());
    assert!(!ErrorCode::E2002.is_runtime());
    assert!(ErrorCode::E6005.is_runtime());
    assert!(!ErrorCode::E6005.is_static());
}
