//! Result propagation: apply one match edit and carry the consequences up the successor chain.

use crate::models::{BracketError, GameMatch, MatchId, MatchUpdate, ParticipantId, Slot};
use std::collections::HashMap;

/// Outcome of [`update_bracket`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Propagation {
    /// The full bracket after the edit, in the same order as the input.
    pub matches: Vec<GameMatch>,
    /// The edited match followed by every match whose slots changed because of it.
    pub touched: Vec<MatchId>,
}

/// Apply `update` to its match and propagate the resulting winner change.
///
/// The edited match takes the new scores when both of its slots are filled, then its winner is derived (valid explicit selection,
/// else bye, else strictly higher score). If that winner differs from the stored one, the
/// successor slot it feeds is rewritten: the new winner, or back to awaiting on retraction.
/// A successor whose occupant changed loses its scores and winner, and the walk continues
/// from it while winners keep changing.
///
/// Returns `MatchNotFound` when no match has `update.match_id`; `matches` is not modified.
pub fn update_bracket(matches: &[GameMatch], update: &MatchUpdate) -> Result<Propagation, BracketError> {
    let index: HashMap<MatchId, usize> = matches.iter().enumerate().map(|(i, m)| (m.id, i)).collect();
    let start = *index
        .get(&update.match_id)
        .ok_or(BracketError::MatchNotFound(update.match_id))?;

    let mut matches = matches.to_vec();
    let mut touched = vec![update.match_id];

    let edited = &mut matches[start];
    let mut previous_winner = edited.winner;
    // Scores only stand for two real occupants; byes and pending pairings keep none.
    if edited.is_contested() {
        edited.score_a = update.score_a;
        edited.score_b = update.score_b;
    } else if update.score_a.is_some() || update.score_b.is_some() {
        log::warn!("Ignoring scores for match {}: it does not have two participants yet", edited.id);
    }
    edited.winner = decide_winner(edited, update.winner);

    let mut current = start;
    // Successor links are acyclic; the bound only guards against a corrupted, reloaded bracket.
    for _ in 0..matches.len() {
        let m = &matches[current];
        if m.winner == previous_winner {
            break;
        }
        let Some(successor) = m.successor else {
            break;
        };
        let Some(&next) = index.get(&successor.match_id) else {
            log::warn!("Match {} points at missing successor {}", m.id, successor.match_id);
            break;
        };
        let carried = match m.winner {
            Some(winner) => Slot::Filled(winner),
            None => Slot::Awaiting(m.id),
        };
        log::debug!("Match {}: {:?} -> match {} slot {:?}", m.id, carried, successor.match_id, successor.slot);

        let target = &mut matches[next];
        previous_winner = target.winner;
        if *target.slot(successor.slot) != carried {
            *target.slot_mut(successor.slot) = carried;
            target.score_a = None;
            target.score_b = None;
            target.winner = target.bye_winner();
            touched.push(target.id);
        }
        current = next;
    }

    Ok(Propagation { matches, touched })
}

/// Winner of `m` given an optional hand-picked winner.
///
/// A pick that is not one of the occupants is dropped so the match never names an outsider.
fn decide_winner(m: &GameMatch, explicit: Option<ParticipantId>) -> Option<ParticipantId> {
    if let Some(pick) = explicit {
        if m.has_participant(pick) {
            return Some(pick);
        }
        log::warn!("Ignoring winner {} for match {}: not a participant of that match", pick, m.id);
    }
    m.bye_winner().or_else(|| m.score_leader())
}
