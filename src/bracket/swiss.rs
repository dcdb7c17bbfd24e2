//! Swiss pairing: fold the standings so similar records meet each round.

use std::cmp::Reverse;
use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::{Bracket, MatchSlot, Rounds};
use crate::domain::CompetitorId;

/// Win/loss record used for pairing order.
pub type RecordMap = HashMap<CompetitorId, (u32, u32)>;

/// All `swiss_rounds` rounds are laid out up front from the initial
/// (all-zero) standings; a caller doing true adaptive pairing re-runs
/// [`pair_round`] with real records between rounds.
pub(super) fn generate(
    participants: &[CompetitorId],
    swiss_rounds: u32,
    rng: &mut StdRng,
) -> Bracket {
    let mut order = participants.to_vec();
    order.shuffle(rng);

    let records: RecordMap = order.iter().map(|&id| (id, (0, 0))).collect();

    let mut rounds = Rounds::new();
    for round in 1..=swiss_rounds {
        rounds.insert(round, pair_round(&order, &records, round));
    }

    Bracket::Swiss {
        total_rounds: swiss_rounds,
        rounds,
    }
}

/// Fold pairing over one round: sort by (wins desc, losses asc) and pair rank
/// i against rank n-1-i. The sort is stable, so ties keep the caller's order.
/// With an odd field the middle-ranked competitor gets an auto-win bye.
pub fn pair_round(order: &[CompetitorId], records: &RecordMap, round: u32) -> Vec<MatchSlot> {
    let mut sorted = order.to_vec();
    sorted.sort_by_key(|id| {
        let (wins, losses) = records.get(id).copied().unwrap_or((0, 0));
        (Reverse(wins), losses)
    });

    let n = sorted.len();
    let mut slots = Vec::with_capacity(n / 2 + 1);
    for i in 0..n / 2 {
        slots.push(MatchSlot::pending(
            format!("R{}M{}", round, i + 1),
            round,
            Some(sorted[i]),
            Some(sorted[n - 1 - i]),
        ));
    }

    if n % 2 == 1 {
        slots.push(MatchSlot::bye(
            format!("R{}M{}", round, n / 2 + 1),
            round,
            sorted[n / 2],
        ));
    }

    slots
}
