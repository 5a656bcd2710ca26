//! Read-only statistics over a tournament's matches.

use crate::models::{GameMatch, MatchId, ParticipantId, Tournament, TournamentConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-participant totals. Byes are not counted as wins.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ParticipantStats {
    pub participant_id: ParticipantId,
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub points: u32,
}

/// The fully scored match with the largest combined score.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct HighestScore {
    pub match_id: MatchId,
    pub total: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentStats {
    pub total_participants: usize,
    pub total_matches: usize,
    /// Matches with a winner, byes included.
    pub completed_matches: usize,
    /// Mean combined score over fully scored matches; 0.0 when none.
    pub average_score: f64,
    pub most_wins: Option<ParticipantId>,
    pub most_points: Option<ParticipantId>,
    pub highest_score: Option<HighestScore>,
    /// In seeding order.
    pub participants: Vec<ParticipantStats>,
}

impl TournamentStats {
    pub fn from_tournament(tournament: &Tournament) -> Self {
        let matches = &tournament.matches;
        let mut by_id: HashMap<ParticipantId, ParticipantStats> = tournament
            .participants
            .iter()
            .map(|p| {
                let stats = ParticipantStats {
                    participant_id: p.id,
                    name: p.name.clone(),
                    ..Default::default()
                };
                (p.id, stats)
            })
            .collect();

        for m in matches.iter().filter(|m| m.is_contested()) {
            tally_match(m, &tournament.config, &mut by_id);
        }

        let participants: Vec<ParticipantStats> = tournament
            .participants
            .iter()
            .filter_map(|p| by_id.remove(&p.id))
            .collect();

        let scored: Vec<&GameMatch> = matches.iter().filter(|m| m.is_scored()).collect();
        let average_score = if scored.is_empty() {
            0.0
        } else {
            let total: u64 = scored.iter().filter_map(|m| m.total_score()).map(u64::from).sum();
            total as f64 / scored.len() as f64
        };

        Self {
            total_participants: tournament.participants.len(),
            total_matches: matches.len(),
            completed_matches: matches.iter().filter(|m| m.winner.is_some()).count(),
            average_score,
            most_wins: leader(&participants, |s| s.wins),
            most_points: leader(&participants, |s| s.points),
            highest_score: highest_score(matches),
            participants,
        }
    }
}

fn tally_match(m: &GameMatch, config: &TournamentConfig, by_id: &mut HashMap<ParticipantId, ParticipantStats>) {
    if let (Some(winner), Some(loser)) = (m.winner, m.loser()) {
        if let Some(s) = by_id.get_mut(&winner) {
            s.wins += 1;
            s.points += config.points_per_win;
        }
        if let Some(s) = by_id.get_mut(&loser) {
            s.losses += 1;
        }
        return;
    }
    let tied = m.is_scored() && m.score_a == m.score_b;
    if config.allow_draws && tied {
        for id in [m.slot_a.participant(), m.slot_b.participant()].into_iter().flatten() {
            if let Some(s) = by_id.get_mut(&id) {
                s.draws += 1;
                s.points += config.points_per_draw;
            }
        }
    }
}

/// First participant with the strictly highest non-zero value.
fn leader(participants: &[ParticipantStats], value: impl Fn(&ParticipantStats) -> u32) -> Option<ParticipantId> {
    let mut best: Option<(&ParticipantStats, u32)> = None;
    for s in participants {
        let v = value(s);
        if v > 0 && best.map_or(true, |(_, b)| v > b) {
            best = Some((s, v));
        }
    }
    best.map(|(s, _)| s.participant_id)
}

fn highest_score(matches: &[GameMatch]) -> Option<HighestScore> {
    let mut best: Option<HighestScore> = None;
    for m in matches {
        let Some(total) = m.total_score() else { continue };
        if total > best.map_or(0, |b| b.total) {
            best = Some(HighestScore { match_id: m.id, total });
        }
    }
    best
}
