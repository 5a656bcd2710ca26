//! Single-elimination tournament bracket web app: library with models, bracket engine, and REST API.

pub mod api;
pub mod config;
pub mod logic;
pub mod models;

pub use config::ServerConfig;
pub use logic::{
    build_bracket, format_participant_name, new_participants, parse_participant_names, rounds_for,
    shuffle_seeding, update_bracket, HighestScore, ParticipantStats, Propagation, TournamentStats,
};
pub use models::{
    BracketError, GameMatch, LogEntry, LogKind, MatchId, MatchUpdate, Participant, ParticipantId,
    Side, Slot, Successor, Tournament, TournamentConfig, TournamentError, TournamentId,
    TournamentKind, TournamentStatus,
};
