//! Match (game), Slot, Side, and the edit submitted for a single match.

use crate::models::participant::ParticipantId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a match, unique within a bracket. Assigned in creation order starting at 1.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub u32);

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Errors raised by the bracket engine.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BracketError {
    /// A bracket needs at least one participant.
    NoParticipants,
    /// No match with this id exists in the bracket. The caller's matches are left as they were.
    MatchNotFound(MatchId),
}

impl fmt::Display for BracketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BracketError::NoParticipants => write!(f, "Need at least 1 participant to build a bracket"),
            BracketError::MatchNotFound(id) => write!(f, "Match {} not found", id),
        }
    }
}

impl std::error::Error for BracketError {}

/// One of the two positions in a match.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    A,
    B,
}

impl Side {
    /// Slot of the successor fed by the match at `position` in its round: even feeds A, odd feeds B.
    pub fn for_position(position: u32) -> Self {
        if position % 2 == 0 {
            Side::A
        } else {
            Side::B
        }
    }

    pub fn other(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Occupancy of one side of a match.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "ref", rename_all = "snake_case")]
pub enum Slot {
    /// Nobody will ever play here (bracket padding).
    #[default]
    Empty,
    /// Will hold the winner of the given match once it is decided.
    Awaiting(MatchId),
    /// A concrete participant.
    Filled(ParticipantId),
}

impl Slot {
    pub fn participant(&self) -> Option<ParticipantId> {
        match self {
            Slot::Filled(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Slot::Filled(_))
    }
}

/// Where a match's winner goes next.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Successor {
    pub match_id: MatchId,
    /// Which slot of the successor this match fills.
    pub slot: Side,
}

/// A single bracket match between the occupants of slot A and slot B.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    /// 1-based; the highest round is the final.
    pub round: u32,
    /// 0-based position within the round.
    pub position: u32,
    pub slot_a: Slot,
    pub slot_b: Slot,
    pub score_a: Option<u32>,
    pub score_b: Option<u32>,
    /// None until decided (by selection, scores, or a bye).
    pub winner: Option<ParticipantId>,
    /// None for the final.
    pub successor: Option<Successor>,
}

impl GameMatch {
    pub fn new(id: MatchId, round: u32, position: u32, slot_a: Slot, slot_b: Slot) -> Self {
        Self {
            id,
            round,
            position,
            slot_a,
            slot_b,
            score_a: None,
            score_b: None,
            winner: None,
            successor: None,
        }
    }

    pub fn slot(&self, side: Side) -> &Slot {
        match side {
            Side::A => &self.slot_a,
            Side::B => &self.slot_b,
        }
    }

    pub fn slot_mut(&mut self, side: Side) -> &mut Slot {
        match side {
            Side::A => &mut self.slot_a,
            Side::B => &mut self.slot_b,
        }
    }

    pub fn score(&self, side: Side) -> Option<u32> {
        match side {
            Side::A => self.score_a,
            Side::B => self.score_b,
        }
    }

    /// True if `participant` occupies one of the two slots.
    pub fn has_participant(&self, participant: ParticipantId) -> bool {
        self.slot_a.participant() == Some(participant) || self.slot_b.participant() == Some(participant)
    }

    /// Side occupied by `participant`, if any.
    pub fn side_of(&self, participant: ParticipantId) -> Option<Side> {
        if self.slot_a.participant() == Some(participant) {
            Some(Side::A)
        } else if self.slot_b.participant() == Some(participant) {
            Some(Side::B)
        } else {
            None
        }
    }

    /// The sole occupant when the other slot is permanently empty.
    pub fn bye_winner(&self) -> Option<ParticipantId> {
        match (self.slot_a, self.slot_b) {
            (Slot::Filled(p), Slot::Empty) | (Slot::Empty, Slot::Filled(p)) => Some(p),
            _ => None,
        }
    }

    pub fn is_bye(&self) -> bool {
        self.bye_winner().is_some()
    }

    /// Both slots permanently empty: the match never takes place.
    pub fn is_void(&self) -> bool {
        self.slot_a.is_empty() && self.slot_b.is_empty()
    }

    /// Both slots hold a participant, so the result has to be played out.
    pub fn is_contested(&self) -> bool {
        self.slot_a.is_filled() && self.slot_b.is_filled()
    }

    /// Both scores recorded.
    pub fn is_scored(&self) -> bool {
        self.score_a.is_some() && self.score_b.is_some()
    }

    /// Occupant with the strictly higher score. None on a tie, a missing score, or an unfilled slot.
    pub fn score_leader(&self) -> Option<ParticipantId> {
        let (Slot::Filled(a), Slot::Filled(b)) = (self.slot_a, self.slot_b) else {
            return None;
        };
        let (score_a, score_b) = (self.score_a?, self.score_b?);
        if score_a > score_b {
            Some(a)
        } else if score_b > score_a {
            Some(b)
        } else {
            None
        }
    }

    /// Occupant that did not win. Only defined for decided contested matches.
    pub fn loser(&self) -> Option<ParticipantId> {
        let winner = self.winner?;
        let side = self.side_of(winner)?;
        self.slot(side.other()).participant()
    }

    /// Sum of both scores when both are recorded.
    pub fn total_score(&self) -> Option<u32> {
        Some(self.score_a?.saturating_add(self.score_b?))
    }
}

/// An edit to one match: new scores and/or an explicitly selected winner.
///
/// The scores replace the stored ones. `winner` is only honoured when it names one of the
/// match's occupants; otherwise the winner is derived from the scores.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchUpdate {
    pub match_id: MatchId,
    #[serde(default)]
    pub score_a: Option<u32>,
    #[serde(default)]
    pub score_b: Option<u32>,
    #[serde(default)]
    pub winner: Option<ParticipantId>,
}

impl MatchUpdate {
    /// Record a score; the winner follows from the comparison.
    pub fn scores(match_id: MatchId, score_a: u32, score_b: u32) -> Self {
        Self {
            match_id,
            score_a: Some(score_a),
            score_b: Some(score_b),
            winner: None,
        }
    }

    /// Select a winner by hand, without scores.
    pub fn winner(match_id: MatchId, winner: ParticipantId) -> Self {
        Self {
            match_id,
            score_a: None,
            score_b: None,
            winner: Some(winner),
        }
    }

    /// Remove any recorded result.
    pub fn cleared(match_id: MatchId) -> Self {
        Self {
            match_id,
            score_a: None,
            score_b: None,
            winner: None,
        }
    }
}
