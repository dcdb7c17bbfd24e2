//! Round robin: every unique pair exactly once. No match depends on another
//! outcome, so the whole schedule lives in round 1.

use super::{Bracket, MatchSlot, Rounds};
use crate::domain::CompetitorId;

pub(super) fn generate(participants: &[CompetitorId]) -> Bracket {
    let slots = all_pairs(participants, 1, |n| format!("M{n}"));
    let total_matches = slots.len();

    let mut rounds = Rounds::new();
    rounds.insert(1, slots);

    Bracket::RoundRobin {
        total_matches,
        rounds,
    }
}

/// Enumerate every unordered pair (i < j) in list order. Shared with the
/// group stage of group+knockout brackets, which labels matches per group.
pub(super) fn all_pairs(
    participants: &[CompetitorId],
    round: u32,
    mut label: impl FnMut(usize) -> String,
) -> Vec<MatchSlot> {
    let mut slots = Vec::with_capacity(participants.len() * participants.len().saturating_sub(1) / 2);
    let mut match_no = 0;

    for (i, &p1) in participants.iter().enumerate() {
        for &p2 in &participants[i + 1..] {
            match_no += 1;
            slots.push(MatchSlot::pending(label(match_no), round, Some(p1), Some(p2)));
        }
    }

    slots
}
