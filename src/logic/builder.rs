//! Bracket construction: round-one pairings, byes, and successor wiring for every later round.

use crate::models::{BracketError, GameMatch, MatchId, Participant, Side, Slot, Successor};

/// Number of rounds needed for `participant_count` entrants: `ceil(log2(max(n, 2)))`.
pub fn rounds_for(participant_count: usize) -> u32 {
    let n = participant_count.max(2);
    usize::BITS - (n - 1).leading_zeros()
}

/// Build the full single-elimination bracket for `participants`, in seeding order.
///
/// 1. Pad the field up to the next power of two, one empty slot after each of the last
///    `bracket_size - n` entries, so every padded pair is a bye rather than an empty match.
/// 2. Round 1 pairs consecutive entries; a lone entry is a bye and wins immediately.
/// 3. Match `i` of round `r` is fed by matches `2i` (slot A) and `2i + 1` (slot B) of round `r - 1`.
///    Winners already known are copied forward, so byes cascade through as many rounds as needed.
///
/// Matches are returned in creation order: round 1 by position, then round 2, and so on.
/// The result always holds `2^rounds - 1` matches and its last entry is the final.
pub fn build_bracket(participants: &[Participant]) -> Result<Vec<GameMatch>, BracketError> {
    if participants.is_empty() {
        return Err(BracketError::NoParticipants);
    }

    let rounds = rounds_for(participants.len());
    let bracket_size = 1usize << rounds;
    let mut matches: Vec<GameMatch> = Vec::with_capacity(bracket_size - 1);
    let mut next_id = 1u32;

    // The first `contested` pairs are full; every later pair is one entrant plus padding.
    let contested = participants.len() - bracket_size / 2;
    let entrant = |index: usize| participants.get(index).map_or(Slot::Empty, |p| Slot::Filled(p.id));

    for position in 0..bracket_size / 2 {
        let (slot_a, slot_b) = if position < contested {
            (entrant(2 * position), entrant(2 * position + 1))
        } else {
            (entrant(contested + position), Slot::Empty)
        };
        let mut m = GameMatch::new(MatchId(next_id), 1, position as u32, slot_a, slot_b);
        m.winner = m.bye_winner();
        matches.push(m);
        next_id += 1;
    }

    let mut previous_start = 0;
    for round in 2..=rounds {
        let round_start = matches.len();
        for position in 0..bracket_size >> round {
            let id = MatchId(next_id);
            let feeder = previous_start + 2 * position;
            let slot_a = link_to_successor(&mut matches[feeder], id);
            let slot_b = link_to_successor(&mut matches[feeder + 1], id);

            let mut m = GameMatch::new(id, round, position as u32, slot_a, slot_b);
            m.winner = m.bye_winner();
            matches.push(m);
            next_id += 1;
        }
        previous_start = round_start;
    }

    log::debug!(
        "Built bracket: {} participants, {} rounds, {} matches",
        participants.len(),
        rounds,
        matches.len()
    );
    Ok(matches)
}

/// Point `feeder` at `successor` and return what the successor's slot holds right now.
fn link_to_successor(feeder: &mut GameMatch, successor: MatchId) -> Slot {
    let slot = Side::for_position(feeder.position);
    feeder.successor = Some(Successor {
        match_id: successor,
        slot,
    });
    match feeder.winner {
        Some(winner) => Slot::Filled(winner),
        None if feeder.is_void() => Slot::Empty,
        None => Slot::Awaiting(feeder.id),
    }
}
