use thiserror::Error;

use crate::domain::{CompetitorId, EventId, MatchId, TournamentId, TournamentStatus, TournamentType};

/// Everything that can go wrong inside the engine. All variants are
/// precondition violations reported synchronously to the caller; nothing here
/// is transient or retryable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TournamentError {
    #[error("need at least {required} participants for {tournament_type} (have {actual})")]
    InsufficientParticipants {
        tournament_type: TournamentType,
        required: usize,
        actual: usize,
    },

    #[error("tournament {tournament_id} is full (max: {max_participants})")]
    CapacityExceeded {
        tournament_id: TournamentId,
        max_participants: u32,
    },

    #[error("competitor {competitor_id} is already in tournament {tournament_id}")]
    ParticipantAlreadyPresent {
        tournament_id: TournamentId,
        competitor_id: CompetitorId,
    },

    #[error("competitor {competitor_id} is not in tournament {tournament_id}")]
    ParticipantNotFound {
        tournament_id: TournamentId,
        competitor_id: CompetitorId,
    },

    #[error("unknown tournament type: {0}")]
    UnknownTournamentType(String),

    #[error("cannot {operation} tournament {tournament_id} in {status} status")]
    InvalidStateTransition {
        tournament_id: TournamentId,
        operation: &'static str,
        status: TournamentStatus,
    },

    #[error("{unresolved} match(es) still unresolved in round {round} of tournament {tournament_id}")]
    IncompleteRound {
        tournament_id: TournamentId,
        round: u32,
        unresolved: usize,
    },

    #[error("competitor {competitor_id} is not an active member of event {event_id}")]
    IneligibleCompetitor {
        event_id: EventId,
        competitor_id: CompetitorId,
    },

    #[error("match {match_id} already has a recorded result")]
    ResultAlreadyRecorded { match_id: MatchId },

    #[error("competitor {competitor_id} is not a player in match {match_id}")]
    WinnerNotInMatch {
        match_id: MatchId,
        competitor_id: CompetitorId,
    },
}
