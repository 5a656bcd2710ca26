//! Data structures for the bracket: participants, matches, tournament document, change log.

mod game;
mod history;
mod participant;
mod tournament;

pub use game::{BracketError, GameMatch, MatchId, MatchUpdate, Side, Slot, Successor};
pub use history::{LogEntry, LogKind};
pub use participant::{Participant, ParticipantId};
pub use tournament::{
    Tournament, TournamentConfig, TournamentError, TournamentId, TournamentKind, TournamentStatus,
};
