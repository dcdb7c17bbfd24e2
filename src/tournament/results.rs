//! Result reporting: the one path from a played match to updated ratings.
//!
//! Eligibility is checked through the [`MembershipGate`] before anything is
//! written, and an already-decided match is refused outright, so the Elo
//! update for a match can never be applied twice.

use log::info;

use crate::config::settings::RatingSettings;
use crate::domain::{Competitor, CompetitorId, MatchRecord};
use crate::errors::TournamentError;
use crate::membership::MembershipGate;
use crate::rating::{MatchOutcome, apply_outcome};

/// Per-game score detail accompanying a reported result.
#[derive(Debug, Clone, Default)]
pub struct ScoreLine {
    pub player1_games: u32,
    pub player2_games: u32,
    /// e.g. "11-9,10-12,11-8". Opaque to the engine.
    pub games_score: Option<String>,
}

/// Record a decisive result: validate the winner, gate both players through
/// membership, apply the Elo update to both competitors and finalize the
/// record. Both competitor mutations happen inside this call, with no
/// observable intermediate state.
pub fn report_result(
    gate: &dyn MembershipGate,
    record: &mut MatchRecord,
    winner_id: CompetitorId,
    score: Option<ScoreLine>,
    player1: &mut Competitor,
    player2: &mut Competitor,
    settings: &RatingSettings,
) -> Result<MatchOutcome, TournamentError> {
    check_not_decided(record)?;
    if !record.involves(winner_id) {
        return Err(TournamentError::WinnerNotInMatch {
            match_id: record.id,
            competitor_id: winner_id,
        });
    }
    check_eligibility(gate, record)?;

    let winner_is_p1 = winner_id == record.player1_id;
    let outcome = apply_outcome(player1, player2, winner_is_p1, settings);

    record.winner_id = Some(winner_id);
    apply_score(record, score);
    record.finished = true;

    info!(
        "Match {} decided: winner {} ({:+.1} / {:+.1})",
        record.id, winner_id, outcome.delta_a, outcome.delta_b
    );
    Ok(outcome)
}

/// Record a draw: the match finishes with no winner and ratings stay
/// untouched. Draws only affect standings, in formats that allow them.
pub fn report_draw(
    gate: &dyn MembershipGate,
    record: &mut MatchRecord,
    score: Option<ScoreLine>,
) -> Result<(), TournamentError> {
    check_not_decided(record)?;
    check_eligibility(gate, record)?;

    apply_score(record, score);
    record.finished = true;

    info!("Match {} finished drawn", record.id);
    Ok(())
}

fn check_not_decided(record: &MatchRecord) -> Result<(), TournamentError> {
    if record.finished || record.winner_id.is_some() {
        return Err(TournamentError::ResultAlreadyRecorded {
            match_id: record.id,
        });
    }
    Ok(())
}

fn check_eligibility(
    gate: &dyn MembershipGate,
    record: &MatchRecord,
) -> Result<(), TournamentError> {
    for competitor_id in [record.player1_id, record.player2_id] {
        if !gate.can_play(record.event_id, competitor_id) {
            return Err(TournamentError::IneligibleCompetitor {
                event_id: record.event_id,
                competitor_id,
            });
        }
    }
    Ok(())
}

fn apply_score(record: &mut MatchRecord, score: Option<ScoreLine>) {
    if let Some(score) = score {
        record.player1_games = score.player1_games;
        record.player2_games = score.player2_games;
        record.games_score = score.games_score;
    }
}
