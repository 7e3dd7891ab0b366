use proptest::prelude::*;

use dnn_types::{ArticleId, ArticleStatus, ContentHash, Timestamp, TokenAmount};

fn status_strategy() -> impl Strategy<Value = ArticleStatus> {
    prop_oneof![
        Just(ArticleStatus::None),
        Just(ArticleStatus::WaitingForVoters),
        Just(ArticleStatus::Voting),
        Just(ArticleStatus::Done),
    ]
}

proptest! {
    /// ContentHash bincode serialization roundtrip.
    #[test]
    fn content_hash_bincode_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let hash = ContentHash::new(bytes);
        let encoded = bincode::serialize(&hash).unwrap();
        let decoded: ContentHash = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded.as_bytes(), hash.as_bytes());
    }

    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// A deadline shifted by `period` is past exactly when more than `period` seconds elapsed.
    #[test]
    fn deadline_passes_strictly_after_period(start in 0u64..1u64 << 40, period in 0u64..1u64 << 20, now in 0u64..1u64 << 41) {
        let deadline = Timestamp::new(start).plus_secs(period);
        prop_assert_eq!(Timestamp::new(now).is_past(deadline), now > start + period);
    }

    /// Every legal transition strictly increases the status.
    #[test]
    fn legal_transitions_move_forward(from in status_strategy(), to in status_strategy()) {
        if from.can_transition_to(to) {
            prop_assert!(to > from);
        }
    }

    /// Article ids are strictly increasing under `next`.
    #[test]
    fn article_id_next_increases(raw in 0u64..u64::MAX) {
        let id = ArticleId::new(raw);
        prop_assert!(id.next() > id);
    }

    /// checked_add agrees with u128 arithmetic.
    #[test]
    fn token_amount_checked_add(a in any::<u128>(), b in any::<u128>()) {
        let sum = TokenAmount::new(a).checked_add(TokenAmount::new(b));
        prop_assert_eq!(sum.map(|s| s.raw()), a.checked_add(b));
    }
}
