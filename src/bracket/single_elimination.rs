//! Single elimination: seeded round one, later rounds pre-allocated and
//! filled in as winners are recorded.

use super::{Bracket, MatchSlot, Rounds};
use crate::domain::CompetitorId;

pub(super) fn generate(participants: &[CompetitorId], best_of: u32) -> Bracket {
    let (total_rounds, rounds) = build_rounds(participants);
    Bracket::SingleElimination {
        total_rounds,
        best_of,
        rounds,
    }
}

/// Build the full elimination tree. Shared with the knockout stage of
/// group+knockout brackets.
pub(super) fn build_rounds(participants: &[CompetitorId]) -> (u32, Rounds) {
    let total_slots = participants.len().next_power_of_two();
    let total_rounds = total_slots.trailing_zeros();
    let seeded = seed_slots(participants, total_slots);

    let mut rounds = Rounds::new();

    // Round 1: adjacent seeded slots pair off; a lone competitor is a bye.
    let first: Vec<MatchSlot> = seeded
        .chunks(2)
        .enumerate()
        .map(|(idx, pair)| {
            MatchSlot::pending(
                format!("R1M{}", idx + 1),
                1,
                pair[0],
                pair.get(1).copied().flatten(),
            )
        })
        .collect();
    rounds.insert(1, first);

    // Later rounds hold empty slots awaiting the previous round's winners.
    for round in 2..=total_rounds {
        let matches_in_round = total_slots >> round;
        let slots = (0..matches_in_round)
            .map(|idx| MatchSlot::pending(format!("R{}M{}", round, idx + 1), round, None, None))
            .collect();
        rounds.insert(round, slots);
    }

    (total_rounds, rounds)
}

/// Balanced alternating seeding: even-indexed participants fill from the low
/// end of the slot array, odd-indexed from the high end, spreading top seeds
/// so they cannot meet before the late rounds. Unfilled slots stay None.
fn seed_slots(participants: &[CompetitorId], total_slots: usize) -> Vec<Option<CompetitorId>> {
    let mut seeded = vec![None; total_slots];
    let mut low = 0;
    let mut high = total_slots.saturating_sub(1);

    for (idx, &competitor_id) in participants.iter().enumerate() {
        if idx % 2 == 0 {
            seeded[low] = Some(competitor_id);
            low += 1;
        } else {
            seeded[high] = Some(competitor_id);
            high -= 1;
        }
    }

    seeded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::SlotStatus;

    #[test]
    fn test_five_participants_need_three_rounds() {
        let (total_rounds, rounds) = build_rounds(&[1, 2, 3, 4, 5]);
        assert_eq!(total_rounds, 3);
        assert_eq!(rounds[&1].len(), 4);
        assert_eq!(rounds[&2].len(), 2);
        assert_eq!(rounds[&3].len(), 1);

        // One slot in round 1 is a bye (single competitor, no opponent).
        let byes = rounds[&1]
            .iter()
            .filter(|s| s.p1_id.is_some() != s.p2_id.is_some())
            .count();
        assert_eq!(byes, 1);
    }

    #[test]
    fn test_power_of_two_field_has_no_byes() {
        let (total_rounds, rounds) = build_rounds(&[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(total_rounds, 3);
        assert!(
            rounds[&1]
                .iter()
                .all(|s| s.p1_id.is_some() && s.p2_id.is_some())
        );
    }

    #[test]
    fn test_seeding_spreads_early_participants() {
        // First and second listed land at opposite ends of the draw.
        let seeded = seed_slots(&[1, 2, 3, 4], 4);
        assert_eq!(seeded, vec![Some(1), Some(3), Some(4), Some(2)]);
    }

    #[test]
    fn test_later_rounds_start_empty_and_pending() {
        let (_, rounds) = build_rounds(&[1, 2, 3, 4, 5, 6]);
        for slot in &rounds[&2] {
            assert_eq!(slot.p1_id, None);
            assert_eq!(slot.p2_id, None);
            assert_eq!(slot.status, SlotStatus::Pending);
        }
    }

    #[test]
    fn test_match_ids_are_stable() {
        let (_, rounds) = build_rounds(&[1, 2, 3, 4]);
        assert_eq!(rounds[&1][0].match_id, "R1M1");
        assert_eq!(rounds[&1][1].match_id, "R1M2");
        assert_eq!(rounds[&2][0].match_id, "R2M1");
    }

    #[test]
    fn test_two_participants_single_final() {
        let (total_rounds, rounds) = build_rounds(&[10, 20]);
        assert_eq!(total_rounds, 1);
        assert_eq!(rounds.len(), 1);
        assert_eq!(rounds[&1].len(), 1);
        assert_eq!(rounds[&1][0].p1_id, Some(10));
        assert_eq!(rounds[&1][0].p2_id, Some(20));
    }
}
