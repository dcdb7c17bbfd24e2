//! Group stage plus knockout: shuffle into groups, round robin inside each
//! group, then a single-elimination stage seeded with one representative per
//! group.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::{Bracket, GroupStage, KnockoutStage, round_robin, single_elimination};
use crate::domain::CompetitorId;

pub(super) fn generate(
    participants: &[CompetitorId],
    num_groups: u32,
    rng: &mut StdRng,
) -> Bracket {
    let mut shuffled = participants.to_vec();
    shuffled.shuffle(rng);

    let per_group = shuffled.len().div_ceil(num_groups as usize);

    let mut groups = BTreeMap::new();
    let mut group_rounds = BTreeMap::new();
    for (idx, members) in shuffled.chunks(per_group).enumerate() {
        let name = group_name(idx);
        let slots = round_robin::all_pairs(members, 1, |n| format!("{name}_M{n}"));
        groups.insert(name.clone(), members.to_vec());
        group_rounds.insert(name, slots);
    }

    // Knockout seeded with the first-listed competitor of each group.
    // Promoting actual group winners instead is the caller's job once group
    // play has results to rank by.
    let representatives: Vec<CompetitorId> = groups
        .values()
        .filter_map(|members| members.first().copied())
        .collect();
    let (_, knockout_rounds) = single_elimination::build_rounds(&representatives);

    Bracket::GroupKnockout {
        num_groups,
        group_stage: GroupStage {
            groups,
            rounds: group_rounds,
        },
        knockout_stage: KnockoutStage {
            rounds: knockout_rounds,
        },
    }
}

/// Group_A, Group_B, ... in assignment order.
fn group_name(idx: usize) -> String {
    format!("Group_{}", (b'A' + idx as u8) as char)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn generate_seeded(ids: &[CompetitorId], num_groups: u32, seed: u64) -> Bracket {
        let mut rng = StdRng::seed_from_u64(seed);
        generate(ids, num_groups, &mut rng)
    }

    #[test]
    fn test_eight_participants_two_groups() {
        let ids: Vec<_> = (1..=8).collect();
        let Bracket::GroupKnockout {
            num_groups,
            group_stage,
            knockout_stage,
        } = generate_seeded(&ids, 2, 5)
        else {
            panic!("expected group+knockout bracket");
        };

        assert_eq!(num_groups, 2);
        assert_eq!(group_stage.groups.len(), 2);
        for (name, members) in &group_stage.groups {
            assert_eq!(members.len(), 4);
            // Full round robin inside the group: 4 * 3 / 2 matches.
            assert_eq!(group_stage.rounds[name].len(), 6);
        }

        // One representative per group feeds a two-player knockout.
        assert_eq!(knockout_stage.rounds[&1].len(), 1);
        let final_slot = &knockout_stage.rounds[&1][0];
        assert!(final_slot.p1_id.is_some() && final_slot.p2_id.is_some());
    }

    #[test]
    fn test_groups_partition_the_field() {
        let ids: Vec<_> = (1..=10).collect();
        let Bracket::GroupKnockout { group_stage, .. } = generate_seeded(&ids, 2, 17) else {
            panic!("expected group+knockout bracket");
        };

        let mut all: Vec<_> = group_stage.groups.values().flatten().copied().collect();
        all.sort_unstable();
        assert_eq!(all, ids);
    }

    #[test]
    fn test_group_match_ids_carry_group_name() {
        let ids: Vec<_> = (1..=8).collect();
        let Bracket::GroupKnockout { group_stage, .. } = generate_seeded(&ids, 2, 1) else {
            panic!("expected group+knockout bracket");
        };

        for (name, slots) in &group_stage.rounds {
            assert!(slots.iter().all(|s| s.match_id.starts_with(name)));
        }
        assert!(group_stage.rounds.contains_key("Group_A"));
        assert!(group_stage.rounds.contains_key("Group_B"));
    }

    #[test]
    fn test_uneven_field_leaves_last_group_smaller() {
        let ids: Vec<_> = (1..=7).collect();
        let Bracket::GroupKnockout { group_stage, .. } = generate_seeded(&ids, 3, 2) else {
            panic!("expected group+knockout bracket");
        };

        let sizes: Vec<_> = group_stage.groups.values().map(Vec::len).collect();
        assert_eq!(sizes, vec![3, 3, 1]);
        // A one-member group plays no group matches but still sends its
        // representative to the knockout.
        assert_eq!(group_stage.rounds["Group_C"].len(), 0);
    }
}
