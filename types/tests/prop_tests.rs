use proptest::prelude::*;

use tally_types::{Identity, Timestamp, WorkflowStatus};

proptest! {
    /// Identity::is_null is true only for all-zero bytes.
    #[test]
    fn identity_is_null_correct(bytes in prop::array::uniform32(0u8..)) {
        let id = Identity::new(bytes);
        prop_assert_eq!(id.is_null(), bytes == [0u8; 32]);
    }

    /// Identity ordering follows byte ordering.
    #[test]
    fn identity_ordering(
        a in prop::array::uniform32(0u8..),
        b in prop::array::uniform32(0u8..),
    ) {
        prop_assert_eq!(Identity::new(a) < Identity::new(b), a < b);
        prop_assert_eq!(Identity::new(a) == Identity::new(b), a == b);
    }

    /// Hex display of an identity always parses back to the same identity.
    #[test]
    fn identity_hex_display_parses(bytes in prop::array::uniform32(0u8..)) {
        let id = Identity::new(bytes);
        let parsed: Identity = id.to_string().parse().unwrap();
        prop_assert_eq!(parsed, id);
    }

    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// is_within agrees with the closed-interval definition.
    #[test]
    fn timestamp_is_within_closed_window(
        start in 0u64..1_000_000,
        len in 0u64..1_000_000,
        probe in 0u64..3_000_000,
    ) {
        let (s, e, p) = (Timestamp::new(start), Timestamp::new(start + len), Timestamp::new(probe));
        prop_assert_eq!(p.is_within(s, e), start <= probe && probe <= start + len);
    }

    /// Timestamp elapsed_since saturates to 0 when now < self.
    #[test]
    fn timestamp_elapsed_since_saturates(
        base in 1u64..1_000_000,
        deficit in 1u64..1_000_000,
    ) {
        let later = Timestamp::new(base + deficit);
        let earlier = Timestamp::new(base);
        prop_assert_eq!(later.elapsed_since(earlier), 0);
        prop_assert_eq!(earlier.elapsed_since(later), deficit);
    }

    /// The successor of any non-terminal workflow state is strictly greater.
    #[test]
    fn workflow_successor_is_strictly_forward(index in 0usize..6) {
        let status = WorkflowStatus::ALL[index];
        match status.successor() {
            Some(next) => {
                prop_assert!(next > status);
                prop_assert_eq!(next, WorkflowStatus::ALL[index + 1]);
            }
            None => prop_assert_eq!(status, WorkflowStatus::VotesTallied),
        }
    }
}
