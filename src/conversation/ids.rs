use uuid::Uuid;

use super::MessageId;

/// Source of message ids. Every id handed out must differ from every earlier one.
pub trait IdSource {
    fn next_id(&mut self) -> MessageId;
}

/// Time-ordered v7 UUIDs. The `uuid` crate keeps these monotonic within a
/// process, so back-to-back calls in the same millisecond still differ.
#[derive(Debug, Default, Clone)]
pub struct UuidV7Ids;

impl IdSource for UuidV7Ids {
    fn next_id(&mut self) -> MessageId {
        MessageId(Uuid::now_v7())
    }
}

/// Counter-backed ids, `1, 2, 3, ...` packed into a UUID.
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    next: u128,
}

impl SequentialIds {
    pub fn starting_at(next: u128) -> Self {
        Self { next }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> MessageId {
        self.next += 1;
        MessageId(Uuid::from_u128(self.next))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn uuid_ids_do_not_collide_under_rapid_calls() {
        let mut ids = UuidV7Ids;
        let seen: HashSet<_> = (0..10_000).map(|_| ids.next_id()).collect();
        assert_eq!(seen.len(), 10_000);
    }

    #[test]
    fn sequential_ids_count_up() {
        let mut ids = SequentialIds::default();
        assert_eq!(ids.next_id(), MessageId(Uuid::from_u128(1)));
        assert_eq!(ids.next_id(), MessageId(Uuid::from_u128(2)));

        let mut ids = SequentialIds::starting_at(41);
        assert_eq!(ids.next_id(), MessageId(Uuid::from_u128(42)));
    }
}
