//! Change history entries kept on a tournament.

use crate::models::game::MatchId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What kind of change a log entry records.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    Created,
    Edited,
    Score,
    Winner,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: Uuid,
    pub at: DateTime<Utc>,
    pub kind: LogKind,
    pub description: String,
    /// Set for score and winner changes.
    pub match_id: Option<MatchId>,
}

impl LogEntry {
    pub fn new(kind: LogKind, description: impl Into<String>, match_id: Option<MatchId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            at: Utc::now(),
            kind,
            description: description.into(),
            match_id,
        }
    }
}
