//! Tournament document: participants, bracket, config, status, and change log.

use crate::logic::{build_bracket, update_bracket};
use crate::models::game::{BracketError, GameMatch, MatchId, MatchUpdate};
use crate::models::history::{LogEntry, LogKind};
use crate::models::participant::{Participant, ParticipantId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Tournament name is blank.
    EmptyName,
    /// A participant name is blank.
    EmptyParticipantName,
    /// Two participants share a name (names are unique, case-insensitive).
    DuplicateParticipantName(String),
    /// The same participant was entered twice.
    DuplicateParticipantId(ParticipantId),
    /// Pasted participant list could not be read.
    InvalidParticipantList(String),
    /// Error from the bracket engine.
    Bracket(BracketError),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::EmptyName => write!(f, "Tournament name is required"),
            TournamentError::EmptyParticipantName => write!(f, "Participant names cannot be empty"),
            TournamentError::DuplicateParticipantName(name) => {
                write!(f, "A participant named \"{}\" already exists", name)
            }
            TournamentError::DuplicateParticipantId(id) => {
                write!(f, "Participant {} was entered more than once", id)
            }
            TournamentError::InvalidParticipantList(reason) => {
                write!(f, "Could not read participant list: {}", reason)
            }
            TournamentError::Bracket(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for TournamentError {}

impl From<BracketError> for TournamentError {
    fn from(e: BracketError) -> Self {
        TournamentError::Bracket(e)
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Whether participants are single players or teams.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentKind {
    #[default]
    Individual,
    Team,
}

/// Progress of the tournament, derived from its matches.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Bracket built, no match played yet.
    #[default]
    Created,
    /// At least one contested match has a winner.
    InProgress,
    /// The final has a winner.
    Finished,
}

impl TournamentStatus {
    /// Byes do not count as play.
    pub fn of(matches: &[GameMatch]) -> Self {
        let final_decided = matches
            .iter()
            .find(|m| m.successor.is_none())
            .is_some_and(|m| m.winner.is_some());
        if final_decided {
            TournamentStatus::Finished
        } else if matches.iter().any(|m| m.winner.is_some() && !m.is_bye()) {
            TournamentStatus::InProgress
        } else {
            TournamentStatus::Created
        }
    }
}

/// Scoring policy read by the statistics fold. The bracket itself never ends in a draw.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    pub allow_draws: bool,
    pub points_per_win: u32,
    pub points_per_draw: u32,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            allow_draws: false,
            points_per_win: 3,
            points_per_draw: 1,
        }
    }
}

/// Full tournament state: participants, bracket matches, config and history.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub kind: TournamentKind,
    /// Seeding order used to build the bracket.
    pub participants: Vec<Participant>,
    /// Bracket matches in creation order (round 1 first, final last).
    pub matches: Vec<GameMatch>,
    pub config: TournamentConfig,
    pub status: TournamentStatus,
    /// Newest first.
    pub log: Vec<LogEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a tournament and build its bracket. Participant names must be non-blank and unique
    /// (case-insensitive); their order is the seeding order.
    pub fn create(
        name: impl Into<String>,
        kind: TournamentKind,
        participants: Vec<Participant>,
        config: TournamentConfig,
    ) -> Result<Self, TournamentError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyName);
        }

        let mut seen = HashSet::new();
        let mut seen_ids = HashSet::new();
        for p in &participants {
            if p.name.trim().is_empty() {
                return Err(TournamentError::EmptyParticipantName);
            }
            if !seen_ids.insert(p.id) {
                return Err(TournamentError::DuplicateParticipantId(p.id));
            }
            if !seen.insert(p.name.trim().to_lowercase()) {
                return Err(TournamentError::DuplicateParticipantName(p.name.clone()));
            }
        }

        let matches = build_bracket(&participants)?;
        let now = Utc::now();
        let mut tournament = Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            kind,
            participants,
            status: TournamentStatus::of(&matches),
            matches,
            config,
            log: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        let description = format!(
            "Tournament \"{}\" created with {} participants",
            tournament.name,
            tournament.participants.len()
        );
        tournament.record(LogKind::Created, description, None);
        Ok(tournament)
    }

    /// Apply a match edit and propagate it. Returns the ids of every match that changed.
    ///
    /// On `MatchNotFound` the tournament is left untouched.
    pub fn apply_update(&mut self, update: &MatchUpdate) -> Result<Vec<MatchId>, TournamentError> {
        let propagation = update_bracket(&self.matches, update)?;
        self.matches = propagation.matches;
        self.status = TournamentStatus::of(&self.matches);
        self.updated_at = Utc::now();

        let entry = self.match_by_id(update.match_id).map(|m| {
            let score = format!("{} x {}", format_score(m.score_a), format_score(m.score_b));
            match m.winner {
                Some(winner) => (
                    LogKind::Winner,
                    format!("{} won match {} ({})", self.participant_name(winner), m.id, score),
                ),
                None if m.score_a.is_some() || m.score_b.is_some() => {
                    (LogKind::Score, format!("Score updated on match {}: {}", m.id, score))
                }
                None => (LogKind::Edited, format!("Result cleared on match {}", m.id)),
            }
        });
        if let Some((kind, description)) = entry {
            self.record(kind, description, Some(update.match_id));
        }
        Ok(propagation.touched)
    }

    /// Replace the scoring config.
    pub fn set_config(&mut self, config: TournamentConfig) {
        self.config = config;
        self.updated_at = Utc::now();
        self.record(LogKind::Edited, "Tournament settings updated", None);
    }

    pub fn match_by_id(&self, id: MatchId) -> Option<&GameMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// Display name for a participant id, `?` if unknown.
    pub fn participant_name(&self, id: ParticipantId) -> &str {
        self.participant(id).map_or("?", |p| p.name.as_str())
    }

    /// Number of rounds in the bracket.
    pub fn rounds(&self) -> u32 {
        self.matches.iter().map(|m| m.round).max().unwrap_or(0)
    }

    /// Matches of one round, by position.
    pub fn matches_in_round(&self, round: u32) -> impl Iterator<Item = &GameMatch> {
        self.matches.iter().filter(move |m| m.round == round)
    }

    /// The match with no successor.
    pub fn final_match(&self) -> Option<&GameMatch> {
        self.matches.iter().find(|m| m.successor.is_none())
    }

    /// Winner of the final, once decided.
    pub fn champion(&self) -> Option<&Participant> {
        self.final_match()
            .and_then(|m| m.winner)
            .and_then(|id| self.participant(id))
    }

    fn record(&mut self, kind: LogKind, description: impl Into<String>, match_id: Option<MatchId>) {
        self.log.insert(0, LogEntry::new(kind, description, match_id));
    }
}

fn format_score(score: Option<u32>) -> String {
    score.map_or_else(|| "-".to_string(), |s| s.to_string())
}
