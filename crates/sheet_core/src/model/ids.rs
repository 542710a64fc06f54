//! Identifier generation for sheet entities.
//!
//! # Invariants
//! - Generated ids are random v4 uuids and never nil.
//! - Ids carry no ordering meaning.

use uuid::Uuid;

/// Opaque identifier shared by all sheet entities.
pub type EntityId = Uuid;

/// Identifier of a root-level topic.
pub type TopicId = EntityId;

/// Identifier of a sub-topic within one topic.
pub type SubTopicId = EntityId;

/// Identifier of a question within one sub-topic.
pub type QuestionId = EntityId;

/// Returns a fresh identifier for a newly created entity.
pub fn generate_id() -> EntityId {
    Uuid::new_v4()
}

#[cfg(test)]
mod tests {
    use super::generate_id;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_are_not_nil() {
        assert!(!generate_id().is_nil());
    }

    #[test]
    fn generated_ids_do_not_collide_for_realistic_counts() {
        let ids = (0..5_000).map(|_| generate_id()).collect::<HashSet<_>>();
        assert_eq!(ids.len(), 5_000);
    }
}
