//! Participant identification and per-participant data storage.
//!
//! ## ParticipantId
//!
//! Type-safe participant identifier. Participant 0 is always the human;
//! participants 1.. are computer-controlled.
//!
//! ## ParticipantMap
//!
//! Per-participant data storage backed by `Vec` for O(1) access.
//! Supports iteration and indexing by `ParticipantId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Participant identifier.
///
/// Indices are 0-based and double as the contribution order within a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(pub u8);

impl ParticipantId {
    /// The single human participant.
    pub const HUMAN: ParticipantId = ParticipantId(0);

    /// Create a new participant ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw participant index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Is this the human participant?
    #[must_use]
    pub const fn is_human(self) -> bool {
        self.0 == 0
    }

    /// Iterate over all participant IDs for a game with `count` participants.
    ///
    /// ```
    /// use marker_race::core::ParticipantId;
    ///
    /// let ids: Vec<_> = ParticipantId::all(4).collect();
    /// assert_eq!(ids.len(), 4);
    /// assert_eq!(ids[0], ParticipantId::HUMAN);
    /// assert_eq!(ids[3], ParticipantId::new(3));
    /// ```
    pub fn all(count: usize) -> impl Iterator<Item = ParticipantId> {
        (0..count as u8).map(ParticipantId)
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_human() {
            write!(f, "You")
        } else {
            write!(f, "COM {}", self.0)
        }
    }
}

/// Per-participant data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use marker_race::core::{ParticipantId, ParticipantMap};
///
/// let mut cards: ParticipantMap<usize> = ParticipantMap::new(4, |_| 3);
/// assert_eq!(cards[ParticipantId::new(2)], 3);
///
/// cards[ParticipantId::new(1)] = 2;
/// assert_eq!(cards[ParticipantId::new(1)], 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticipantMap<T> {
    data: Vec<T>,
}

impl<T> ParticipantMap<T> {
    /// Create a new map with values from a factory function.
    pub fn new(count: usize, factory: impl FnMut(ParticipantId) -> T) -> Self {
        assert!(count > 0, "Must have at least 1 participant");
        assert!(count <= u8::MAX as usize, "Too many participants");

        let data = (0..count as u8).map(ParticipantId).map(factory).collect();

        Self { data }
    }

    /// Get the number of participants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: a map holds at least one participant.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a reference to a participant's data, if the id is in range.
    #[must_use]
    pub fn get(&self, id: ParticipantId) -> Option<&T> {
        self.data.get(id.index())
    }

    /// Get a mutable reference to a participant's data, if the id is in range.
    pub fn get_mut(&mut self, id: ParticipantId) -> Option<&mut T> {
        self.data.get_mut(id.index())
    }

    /// Iterate over (ParticipantId, &T) pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (ParticipantId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (ParticipantId(i as u8), v))
    }

    /// Iterate over (ParticipantId, &mut T) pairs in id order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ParticipantId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (ParticipantId(i as u8), v))
    }

    /// Iterate over values in id order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Iterate over all participant IDs.
    pub fn ids(&self) -> impl Iterator<Item = ParticipantId> {
        (0..self.data.len() as u8).map(ParticipantId)
    }
}

impl<T> Index<ParticipantId> for ParticipantMap<T> {
    type Output = T;

    fn index(&self, id: ParticipantId) -> &Self::Output {
        &self.data[id.index()]
    }
}

impl<T> IndexMut<ParticipantId> for ParticipantMap<T> {
    fn index_mut(&mut self, id: ParticipantId) -> &mut Self::Output {
        &mut self.data[id.index()]
    }
}
