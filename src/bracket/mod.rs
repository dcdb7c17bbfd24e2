//! Bracket generation for the four tournament formats.
//!
//! A bracket is computed fully in memory from the participant list and the
//! tournament configuration, then handed back as a value; generation never
//! touches tournament state, so a failure leaves the caller unchanged.

pub mod group_knockout;
pub mod round_robin;
pub mod single_elimination;
pub mod swiss;

use std::collections::BTreeMap;

use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::domain::{CompetitorId, TournamentConfig, TournamentType};
use crate::errors::TournamentError;

/// Round number -> ordered match slots. BTreeMap keeps rounds in play order
/// and serializes to the `{ "1": [...], "2": [...] }` wire shape.
pub type Rounds = BTreeMap<u32, Vec<MatchSlot>>;

/// Round numbers travel as string keys, the JSON-object form the bracket is
/// persisted in. The tagged [`Bracket`] enum buffers content while looking
/// for its tag, so the keys must be strings on both directions.
mod round_map {
    use std::collections::BTreeMap;

    use serde::de::Error as _;
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{MatchSlot, Rounds};

    pub fn serialize<S: Serializer>(rounds: &Rounds, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(rounds.len()))?;
        for (round, slots) in rounds {
            map.serialize_entry(&round.to_string(), slots)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Rounds, D::Error> {
        let raw = BTreeMap::<String, Vec<MatchSlot>>::deserialize(deserializer)?;
        raw.into_iter()
            .map(|(key, slots)| {
                key.parse::<u32>()
                    .map(|round| (round, slots))
                    .map_err(|_| D::Error::custom(format!("invalid round number: {key}")))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotStatus {
    Pending,
    Completed,
}

/// One scheduled pairing. Competitor ids are optional: a missing side is a
/// bye in round one, or a slot awaiting an earlier winner in later rounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSlot {
    pub match_id: String,
    pub round: u32,
    pub p1_id: Option<CompetitorId>,
    pub p2_id: Option<CompetitorId>,
    pub winner_id: Option<CompetitorId>,
    pub status: SlotStatus,
}

impl MatchSlot {
    pub fn pending(
        match_id: String,
        round: u32,
        p1_id: Option<CompetitorId>,
        p2_id: Option<CompetitorId>,
    ) -> Self {
        Self {
            match_id,
            round,
            p1_id,
            p2_id,
            winner_id: None,
            status: SlotStatus::Pending,
        }
    }

    /// An unpaired competitor credited with an automatic win.
    pub fn bye(match_id: String, round: u32, competitor_id: CompetitorId) -> Self {
        Self {
            match_id,
            round,
            p1_id: Some(competitor_id),
            p2_id: None,
            winner_id: Some(competitor_id),
            status: SlotStatus::Completed,
        }
    }
}

/// Group-stage half of a group+knockout bracket: named groups and a full
/// round robin within each group, keyed by group name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStage {
    pub groups: BTreeMap<String, Vec<CompetitorId>>,
    pub rounds: BTreeMap<String, Vec<MatchSlot>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnockoutStage {
    #[serde(with = "round_map")]
    pub rounds: Rounds,
}

/// The generated schedule for one tournament, tagged by format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Bracket {
    #[serde(rename = "SINGLE_ELIMINATION", rename_all = "camelCase")]
    SingleElimination {
        total_rounds: u32,
        best_of: u32,
        #[serde(with = "round_map")]
        rounds: Rounds,
    },
    #[serde(rename = "SWISS", rename_all = "camelCase")]
    Swiss {
        total_rounds: u32,
        #[serde(with = "round_map")]
        rounds: Rounds,
    },
    #[serde(rename = "GROUP_KNOCKOUT", rename_all = "camelCase")]
    GroupKnockout {
        num_groups: u32,
        group_stage: GroupStage,
        knockout_stage: KnockoutStage,
    },
    #[serde(rename = "ROUND_ROBIN", rename_all = "camelCase")]
    RoundRobin {
        total_matches: usize,
        #[serde(with = "round_map")]
        rounds: Rounds,
    },
}

impl Bracket {
    /// Flat rounds mapping for the formats that have one; the group+knockout
    /// bracket exposes its knockout rounds here.
    pub fn rounds(&self) -> &Rounds {
        match self {
            Bracket::SingleElimination { rounds, .. }
            | Bracket::Swiss { rounds, .. }
            | Bracket::RoundRobin { rounds, .. } => rounds,
            Bracket::GroupKnockout { knockout_stage, .. } => &knockout_stage.rounds,
        }
    }

    /// JSON form matching the persistence/wire shape, for callers storing the
    /// bracket as a JSON column.
    pub fn wire_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// Generate a bracket for `tournament_type` over `participant_ids`.
///
/// `seed` makes the Swiss and group-assignment shuffles reproducible; None
/// draws entropy from the OS.
pub fn generate(
    tournament_type: TournamentType,
    participant_ids: &[CompetitorId],
    config: &TournamentConfig,
    seed: Option<u64>,
) -> Result<Bracket, TournamentError> {
    let required = tournament_type.min_participants(config);
    if participant_ids.len() < required {
        return Err(TournamentError::InsufficientParticipants {
            tournament_type,
            required,
            actual: participant_ids.len(),
        });
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    info!(
        "Generating {} bracket for {} participants",
        tournament_type,
        participant_ids.len()
    );

    let bracket = match tournament_type {
        TournamentType::SingleElimination => {
            single_elimination::generate(participant_ids, config.best_of)
        }
        TournamentType::Swiss => swiss::generate(participant_ids, config.swiss_rounds, &mut rng),
        TournamentType::GroupKnockout => {
            group_knockout::generate(participant_ids, config.num_groups, &mut rng)
        }
        TournamentType::RoundRobin => round_robin::generate(participant_ids),
    };

    Ok(bracket)
}

/// Total matches a format will produce for `n` participants. For Swiss this is
/// an estimate; the exact count depends on byes per round.
pub fn expected_match_count(
    n: usize,
    tournament_type: TournamentType,
    config: &TournamentConfig,
) -> usize {
    match tournament_type {
        TournamentType::SingleElimination => n.saturating_sub(1),
        TournamentType::Swiss => n * 3 / 2,
        TournamentType::GroupKnockout => {
            let num_groups = config.num_groups as usize;
            let group_size = n.div_ceil(num_groups);
            let group_matches = num_groups * (group_size * group_size.saturating_sub(1) / 2);
            group_matches + num_groups.saturating_sub(1)
        }
        TournamentType::RoundRobin => n * n.saturating_sub(1) / 2,
    }
}
