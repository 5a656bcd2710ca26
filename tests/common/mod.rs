//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use tournament_bracket_web::{GameMatch, MatchId, Participant, Slot};

pub fn participants(n: usize) -> Vec<Participant> {
    (1..=n).map(|i| Participant::new(format!("P{i}"))).collect()
}

pub fn by_id(matches: &[GameMatch], id: u32) -> &GameMatch {
    matches.iter().find(|m| m.id == MatchId(id)).unwrap()
}

/// Check the structural and result invariants of a bracket.
pub fn assert_consistent(matches: &[GameMatch]) {
    let index: HashMap<MatchId, &GameMatch> = matches.iter().map(|m| (m.id, m)).collect();
    assert_eq!(index.len(), matches.len(), "duplicate match ids");

    let roots: Vec<_> = matches.iter().filter(|m| m.successor.is_none()).collect();
    assert_eq!(roots.len(), 1, "exactly one final");
    let top = matches.iter().map(|m| m.round).max().unwrap();
    assert_eq!(roots[0].round, top);

    let mut feeders: HashMap<MatchId, usize> = HashMap::new();
    for m in matches {
        if let Some(w) = m.winner {
            assert!(m.has_participant(w), "match {} winner is not an occupant", m.id);
        }
        if let Some(w) = m.bye_winner() {
            assert_eq!(m.winner, Some(w), "bye {} not resolved", m.id);
        }
        if let Some(next) = m.successor {
            let target = index[&next.match_id];
            assert_eq!(target.round, m.round + 1);
            *feeders.entry(target.id).or_default() += 1;
            let expected = match m.winner {
                Some(w) => Slot::Filled(w),
                None if m.is_void() => Slot::Empty,
                None => Slot::Awaiting(m.id),
            };
            assert_eq!(*target.slot(next.slot), expected, "match {} not carried into {}", m.id, target.id);
        }
    }
    for m in matches.iter().filter(|m| m.round > 1) {
        assert_eq!(feeders.get(&m.id).copied(), Some(2), "match {} feeders", m.id);
    }
}
