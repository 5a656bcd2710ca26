//! Participant intake: pasted lists, display-name formatting, optional seeding shuffle.

use crate::models::{Participant, TournamentError, TournamentKind};
use rand::seq::SliceRandom;

/// Longest surname part kept in an individual's display name before it is abbreviated.
const MAX_SURNAME_LEN: usize = 6;

/// Split pasted text into names. Entries are separated by newlines or commas; quoted
/// fields may contain commas. Blank entries are dropped.
pub fn parse_participant_names(text: &str) -> Result<Vec<String>, TournamentError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut names = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| TournamentError::InvalidParticipantList(e.to_string()))?;
        names.extend(record.iter().filter(|field| !field.is_empty()).map(str::to_string));
    }
    Ok(names)
}

/// Display name for an entrant. Individuals keep their first name and a surname cut to
/// six characters (`"Ana Beatriz Souza"` becomes `"Ana Beatri."`); team names are kept as typed.
pub fn format_participant_name(name: &str, kind: TournamentKind) -> String {
    let name = name.trim();
    if kind == TournamentKind::Team {
        return name.to_string();
    }
    let mut parts = name.split_whitespace();
    let Some(first) = parts.next() else {
        return String::new();
    };
    let surnames = parts.collect::<Vec<_>>().join(" ");
    if surnames.is_empty() {
        first.to_string()
    } else if surnames.chars().count() > MAX_SURNAME_LEN {
        let short: String = surnames.chars().take(MAX_SURNAME_LEN).collect();
        format!("{} {}.", first, short)
    } else {
        format!("{} {}", first, surnames)
    }
}

/// Turn names into participants in the given order, formatting each and skipping blanks.
pub fn new_participants<I, S>(names: I, kind: TournamentKind) -> Vec<Participant>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|n| format_participant_name(n.as_ref(), kind))
        .filter(|n| !n.is_empty())
        .map(Participant::new)
        .collect()
}

/// Randomize seeding order. The bracket builder itself never reorders.
pub fn shuffle_seeding(participants: &mut [Participant]) {
    participants.shuffle(&mut rand::thread_rng());
}
