//! Participants and the group roster.
//!
//! Participants are supplied by the caller; the engine never creates or
//! deletes them. The [`Roster`] preserves the order participants were
//! supplied in, and that order is the deterministic tie-break everywhere the
//! engine sorts or iterates.
//!
//! Legacy records key their split maps by **1-based position** (`person1`,
//! `person2`) instead of a stable id. [`Roster::normalize_shares`] converts
//! such maps into id-keyed maps at the boundary so the evaluator only ever
//! sees one representation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// A person sharing expenses within one group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: Uuid,
    pub display_name: String,
    /// 1-based slot within the group, used as a fallback key when a record
    /// predates stable ids.
    pub position: u8,
}

impl Participant {
    pub fn new(display_name: impl Into<String>, position: u8) -> Self {
        Self {
            id: Uuid::new_v4(),
            display_name: display_name.into(),
            position,
        }
    }
}

/// The active participant set, in caller-supplied order.
///
/// Non-empty by construction: [`Roster::new`] rejects an empty list, so the
/// rest of the engine never has to re-check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    pub fn new(participants: Vec<Participant>) -> ResultEngine<Self> {
        if participants.is_empty() {
            return Err(EngineError::NoParticipants);
        }
        Ok(Self { participants })
    }

    /// Number of participants in the group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Always `false`: `new` refuses empty rosters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Iterates participants in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    /// Returns `true` if the id belongs to a participant of this roster.
    #[must_use]
    pub fn contains(&self, id: Uuid) -> bool {
        self.participants.iter().any(|p| p.id == id)
    }

    /// Looks a participant up by stable id.
    #[must_use]
    pub fn by_id(&self, id: Uuid) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// Looks a participant up by 1-based position.
    #[must_use]
    pub fn by_position(&self, position: u8) -> Option<&Participant> {
        self.participants.iter().find(|p| p.position == position)
    }

    /// Converts a split map keyed by [`ShareKey`] into one keyed by stable
    /// participant id.
    ///
    /// This is the boundary step for legacy `person1`/`person2` records:
    /// position keys are resolved against the roster, id keys pass through.
    /// A position with no roster match is a caller error; ids are *not*
    /// checked here because the evaluator already tolerates entries for
    /// participants that have left the group.
    pub fn normalize_shares<T: Copy>(
        &self,
        shares: &HashMap<ShareKey, T>,
    ) -> ResultEngine<HashMap<Uuid, T>> {
        let mut by_id = HashMap::with_capacity(shares.len());
        for (key, value) in shares {
            let id = match *key {
                ShareKey::Id(id) => id,
                ShareKey::Position(position) => self
                    .by_position(position)
                    .map(|p| p.id)
                    .ok_or_else(|| {
                        EngineError::UnknownParticipant(format!("person{position}"))
                    })?,
            };
            by_id.insert(id, *value);
        }
        Ok(by_id)
    }
}

/// How a legacy or current record addresses a participant in a split map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareKey {
    /// Stable participant id (current records).
    Id(Uuid),
    /// 1-based slot (`person1`, `person2`, …) from partially-migrated
    /// records.
    Position(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster_of_two() -> Roster {
        Roster::new(vec![Participant::new("Ana", 1), Participant::new("Beto", 2)]).unwrap()
    }

    #[test]
    fn empty_roster_is_rejected() {
        assert_eq!(Roster::new(vec![]).unwrap_err(), EngineError::NoParticipants);
    }

    #[test]
    fn lookup_by_id_and_position() {
        let roster = roster_of_two();
        let ana = roster.by_position(1).unwrap().clone();
        assert_eq!(roster.by_id(ana.id), Some(&ana));
        assert_eq!(roster.by_position(3), None);
    }

    #[test]
    fn normalize_resolves_positions_to_ids() {
        let roster = roster_of_two();
        let beto_id = roster.by_position(2).unwrap().id;

        let mut legacy = HashMap::new();
        legacy.insert(ShareKey::Position(2), 70.0);
        legacy.insert(ShareKey::Id(beto_id), 30.0);

        let normalized = roster.normalize_shares(&legacy).unwrap();
        // Both keys resolve to the same participant; last write wins is
        // irrelevant here, presence is what matters.
        assert_eq!(normalized.len(), 1);
        assert!(normalized.contains_key(&beto_id));
    }

    #[test]
    fn normalize_rejects_unknown_position() {
        let roster = roster_of_two();
        let mut legacy = HashMap::new();
        legacy.insert(ShareKey::Position(5), 50.0);

        assert_eq!(
            roster.normalize_shares(&legacy).unwrap_err(),
            EngineError::UnknownParticipant("person5".to_string())
        );
    }
}
