//! Session identifier tests
//!
//! The two option flags are carried inside the identifier itself and must
//! round-trip without corrupting the rest of the UUID.

use std::collections::HashSet;

use etchdb::{SessionOptions, Sid};

/// Round trip for all four flag combinations.
#[test]
fn test_all_option_combinations_roundtrip() {
    for transacted in [false, true] {
        for causally_consistent in [false, true] {
            let options = SessionOptions::new(transacted, causally_consistent);
            let sid = Sid::with_options(options);
            assert_eq!(sid.session_options(), options);
        }
    }
}

/// Plain random identifiers decode whatever the RNG happened to put in the
/// flag positions; decoding never fails.
#[test]
fn test_plain_random_identifiers_decode() {
    let mut seen_transacted = [false; 2];
    let mut seen_consistent = [false; 2];
    for _ in 0..10_000 {
        let options = Sid::random().session_options();
        seen_transacted[options.transacted as usize] = true;
        seen_consistent[options.causally_consistent as usize] = true;
    }
    // both states of both flags appear across a large random sample
    assert_eq!(seen_transacted, [true, true]);
    assert_eq!(seen_consistent, [true, true]);
}

/// Flagged generation stays a valid v4 UUID and keeps its entropy.
#[test]
fn test_flagged_identifiers_remain_unique_v4() {
    let mut seen = HashSet::new();
    for _ in 0..10_000 {
        let sid = Sid::with_options(SessionOptions::new(true, true));
        assert_eq!(sid.uuid().get_version_num(), 4);
        assert!(seen.insert(sid));
    }
}
