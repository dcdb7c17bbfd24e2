//! Aggregates match records into a ranked leaderboard.

use std::cmp::Reverse;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{CompetitorId, MatchRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingRow {
    pub competitor_id: CompetitorId,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub rank: u32,
}

/// Tally wins, losses and (when the format allows them) draws for each listed
/// participant, then rank by wins with draws as the tie-break.
///
/// The sort is stable, so competitors with identical records rank in list
/// order; no rank merging. Matches referencing competitors outside
/// `participants` contribute nothing.
pub fn compute_standings(
    participants: &[CompetitorId],
    matches: &[MatchRecord],
    allow_draws: bool,
) -> Vec<StandingRow> {
    let mut rows: Vec<StandingRow> = participants
        .iter()
        .map(|&competitor_id| StandingRow {
            competitor_id,
            wins: 0,
            losses: 0,
            draws: 0,
            rank: 0,
        })
        .collect();

    let index: HashMap<CompetitorId, usize> = participants
        .iter()
        .enumerate()
        .map(|(idx, &id)| (id, idx))
        .collect();

    for record in matches {
        match record.winner_id {
            Some(winner_id) => {
                if let Some(&i) = index.get(&winner_id) {
                    rows[i].wins += 1;
                }
                if let Some(loser_id) = record.loser_id()
                    && let Some(&i) = index.get(&loser_id)
                {
                    rows[i].losses += 1;
                }
            }
            None if record.finished && allow_draws => {
                for player_id in [record.player1_id, record.player2_id] {
                    if let Some(&i) = index.get(&player_id) {
                        rows[i].draws += 1;
                    }
                }
            }
            None => {}
        }
    }

    rows.sort_by_key(|row| Reverse((row.wins, row.draws)));
    for (idx, row) in rows.iter_mut().enumerate() {
        row.rank = idx as u32 + 1;
    }

    rows
}
