//! Bracket engine and tournament logic: building, propagation, intake, statistics.

mod builder;
mod propagation;
mod setup;
mod stats;

pub use builder::{build_bracket, rounds_for};
pub use propagation::{update_bracket, Propagation};
pub use setup::{format_participant_name, new_participants, parse_participant_names, shuffle_seeding};
pub use stats::{HighestScore, ParticipantStats, TournamentStats};
