//! Tournament lifecycle: CREATED -> STARTING -> IN_PROGRESS -> FINISHED, with
//! CANCELLED reachable from any non-terminal state.
//!
//! All operations are synchronous and mutate only the tournament passed in;
//! callers serialize mutations per tournament and persist the new value.

pub mod results;

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::bracket::{self, Bracket};
use crate::domain::{
    CompetitorId, EventId, MatchRecord, TournamentConfig, TournamentId, TournamentStatus,
    TournamentType,
};
use crate::errors::TournamentError;
use crate::standings::{StandingRow, compute_standings};

pub use results::{ScoreLine, report_draw, report_result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub event_id: EventId,
    pub name: String,
    pub tournament_type: TournamentType,
    pub status: TournamentStatus,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    /// None means unlimited.
    pub max_participants: Option<u32>,
    pub config: TournamentConfig,
    /// 0 until the tournament starts, then monotonically increasing.
    pub current_round: u32,
    /// Ordered, duplicate-free.
    pub participants: Vec<CompetitorId>,
    /// Present exactly from STARTING onwards.
    pub bracket: Option<Bracket>,
}

impl Tournament {
    pub fn new(
        id: TournamentId,
        event_id: EventId,
        name: impl Into<String>,
        tournament_type: TournamentType,
        config: TournamentConfig,
    ) -> Self {
        Self {
            id,
            event_id,
            name: name.into(),
            tournament_type,
            status: TournamentStatus::Created,
            created_at: Utc::now(),
            started_at: None,
            finished_at: None,
            max_participants: None,
            config,
            current_round: 0,
            participants: Vec::new(),
            bracket: None,
        }
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn has_participant(&self, competitor_id: CompetitorId) -> bool {
        self.participants.contains(&competitor_id)
    }

    pub fn is_full(&self) -> bool {
        self.max_participants
            .is_some_and(|max| self.participant_count() >= max as usize)
    }

    pub fn is_active(&self) -> bool {
        self.status == TournamentStatus::InProgress
    }

    pub fn can_start(&self) -> bool {
        self.status == TournamentStatus::Created
            && self.participant_count() >= self.tournament_type.min_participants(&self.config)
    }

    /// Only while CREATED; fails on duplicates and on a full field.
    pub fn add_participant(&mut self, competitor_id: CompetitorId) -> Result<(), TournamentError> {
        self.require_status(TournamentStatus::Created, "add participant to")?;

        if self.has_participant(competitor_id) {
            return Err(TournamentError::ParticipantAlreadyPresent {
                tournament_id: self.id,
                competitor_id,
            });
        }
        if self.is_full() {
            return Err(TournamentError::CapacityExceeded {
                tournament_id: self.id,
                max_participants: self.max_participants.unwrap_or_default(),
            });
        }

        self.participants.push(competitor_id);
        Ok(())
    }

    /// Only while CREATED.
    pub fn remove_participant(
        &mut self,
        competitor_id: CompetitorId,
    ) -> Result<(), TournamentError> {
        self.require_status(TournamentStatus::Created, "remove participant from")?;

        let position = self
            .participants
            .iter()
            .position(|&id| id == competitor_id)
            .ok_or(TournamentError::ParticipantNotFound {
                tournament_id: self.id,
                competitor_id,
            })?;
        self.participants.remove(position);
        Ok(())
    }

    /// Rename or re-cap the tournament; only while CREATED.
    pub fn update_settings(
        &mut self,
        name: Option<String>,
        max_participants: Option<u32>,
    ) -> Result<(), TournamentError> {
        self.require_status(TournamentStatus::Created, "update")?;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(max) = max_participants {
            self.max_participants = Some(max);
        }
        Ok(())
    }

    /// Generate the bracket and move CREATED -> STARTING -> IN_PROGRESS.
    ///
    /// The bracket is built before any field is touched, so a generation
    /// failure leaves the tournament exactly as it was.
    pub fn start(&mut self, seed: Option<u64>) -> Result<(), TournamentError> {
        self.require_status(TournamentStatus::Created, "start")?;

        let required = self.tournament_type.min_participants(&self.config);
        if self.participant_count() < required {
            return Err(TournamentError::InsufficientParticipants {
                tournament_type: self.tournament_type,
                required,
                actual: self.participant_count(),
            });
        }

        let generated = bracket::generate(
            self.tournament_type,
            &self.participants,
            &self.config,
            seed,
        )?;

        self.status = TournamentStatus::Starting;
        self.started_at = Some(Utc::now());
        self.current_round = 1;
        self.bracket = Some(generated);
        self.status = TournamentStatus::InProgress;

        info!(
            "Tournament {} ({}) started with {} participants",
            self.id,
            self.tournament_type,
            self.participant_count()
        );
        Ok(())
    }

    /// Move to the next round once every current-round match is decided.
    pub fn advance_round(&mut self, matches: &[MatchRecord]) -> Result<(), TournamentError> {
        self.require_status(TournamentStatus::InProgress, "advance round of")?;
        self.require_round_complete(matches)?;

        self.current_round += 1;
        info!(
            "Tournament {} advanced to round {}",
            self.id, self.current_round
        );
        Ok(())
    }

    /// Finish once the current (final) round is fully decided. STARTING is
    /// accepted as well, in case a caller observes the intermediate state.
    pub fn finish(&mut self, matches: &[MatchRecord]) -> Result<(), TournamentError> {
        if !matches!(
            self.status,
            TournamentStatus::InProgress | TournamentStatus::Starting
        ) {
            return Err(TournamentError::InvalidStateTransition {
                tournament_id: self.id,
                operation: "finish",
                status: self.status,
            });
        }
        self.require_round_complete(matches)?;

        self.status = TournamentStatus::Finished;
        self.finished_at = Some(Utc::now());
        info!("Tournament {} finished", self.id);
        Ok(())
    }

    /// Terminal and irreversible; allowed from any non-terminal state.
    pub fn cancel(&mut self) -> Result<(), TournamentError> {
        if !self.status.can_transition_to(TournamentStatus::Cancelled) {
            return Err(TournamentError::InvalidStateTransition {
                tournament_id: self.id,
                operation: "cancel",
                status: self.status,
            });
        }
        self.status = TournamentStatus::Cancelled;
        info!("Tournament {} cancelled", self.id);
        Ok(())
    }

    /// Live leaderboard over the supplied match records.
    pub fn standings(&self, matches: &[MatchRecord]) -> Vec<StandingRow> {
        compute_standings(&self.participants, matches, self.config.allow_draws)
    }

    fn require_status(
        &self,
        expected: TournamentStatus,
        operation: &'static str,
    ) -> Result<(), TournamentError> {
        if self.status != expected {
            return Err(TournamentError::InvalidStateTransition {
                tournament_id: self.id,
                operation,
                status: self.status,
            });
        }
        Ok(())
    }

    fn require_round_complete(&self, matches: &[MatchRecord]) -> Result<(), TournamentError> {
        let unresolved = unresolved_in_round(matches, self.id, self.current_round);
        if unresolved > 0 {
            return Err(TournamentError::IncompleteRound {
                tournament_id: self.id,
                round: self.current_round,
                unresolved,
            });
        }
        Ok(())
    }
}

/// The round-completeness precondition, checkable against any match set
/// without a storage dependency.
pub fn round_is_complete(
    matches: &[MatchRecord],
    tournament_id: TournamentId,
    round: u32,
) -> bool {
    unresolved_in_round(matches, tournament_id, round) == 0
}

fn unresolved_in_round(matches: &[MatchRecord], tournament_id: TournamentId, round: u32) -> usize {
    matches
        .iter()
        .filter(|record| {
            record.tournament_id == Some(tournament_id)
                && record.round == round
                && record.winner_id.is_none()
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swiss_tournament() -> Tournament {
        Tournament::new(
            1,
            1,
            "Copa Novembro",
            TournamentType::Swiss,
            TournamentConfig::default(),
        )
    }

    fn decided_match(
        id: i64,
        tournament_id: TournamentId,
        round: u32,
        p1: CompetitorId,
        p2: CompetitorId,
        winner: CompetitorId,
    ) -> MatchRecord {
        let mut record = MatchRecord::new(id, 1, p1, p2).in_tournament(tournament_id, round);
        record.winner_id = Some(winner);
        record.finished = true;
        record
    }

    #[test]
    fn test_new_tournament_is_created_at_round_zero() {
        let tournament = swiss_tournament();
        assert_eq!(tournament.status, TournamentStatus::Created);
        assert_eq!(tournament.current_round, 0);
        assert!(tournament.bracket.is_none());
    }

    #[test]
    fn test_add_participant_rejects_duplicates_and_overflow() {
        let mut tournament = swiss_tournament();
        tournament.max_participants = Some(2);

        tournament.add_participant(10).unwrap();
        assert_eq!(
            tournament.add_participant(10),
            Err(TournamentError::ParticipantAlreadyPresent {
                tournament_id: 1,
                competitor_id: 10,
            })
        );

        tournament.add_participant(20).unwrap();
        assert_eq!(
            tournament.add_participant(30),
            Err(TournamentError::CapacityExceeded {
                tournament_id: 1,
                max_participants: 2,
            })
        );
    }

    #[test]
    fn test_remove_participant() {
        let mut tournament = swiss_tournament();
        tournament.add_participant(10).unwrap();

        assert_eq!(
            tournament.remove_participant(99),
            Err(TournamentError::ParticipantNotFound {
                tournament_id: 1,
                competitor_id: 99,
            })
        );

        tournament.remove_participant(10).unwrap();
        assert_eq!(tournament.participant_count(), 0);
    }

    #[test]
    fn test_swiss_needs_three_participants_to_start() {
        let mut tournament = swiss_tournament();
        tournament.add_participant(10).unwrap();
        tournament.add_participant(20).unwrap();

        assert_eq!(
            tournament.start(Some(1)),
            Err(TournamentError::InsufficientParticipants {
                tournament_type: TournamentType::Swiss,
                required: 3,
                actual: 2,
            })
        );
        // Failed start leaves everything untouched.
        assert_eq!(tournament.status, TournamentStatus::Created);
        assert_eq!(tournament.current_round, 0);
        assert!(tournament.bracket.is_none());

        tournament.add_participant(30).unwrap();
        tournament.start(Some(1)).unwrap();
        assert_eq!(tournament.status, TournamentStatus::InProgress);
        assert_eq!(tournament.current_round, 1);
        assert!(tournament.started_at.is_some());
        assert!(tournament.bracket.is_some());
    }

    #[test]
    fn test_participants_frozen_after_start() {
        let mut tournament = swiss_tournament();
        for id in [10, 20, 30] {
            tournament.add_participant(id).unwrap();
        }
        tournament.start(Some(1)).unwrap();

        assert!(matches!(
            tournament.add_participant(40),
            Err(TournamentError::InvalidStateTransition {
                status: TournamentStatus::InProgress,
                ..
            })
        ));
        assert!(matches!(
            tournament.remove_participant(10),
            Err(TournamentError::InvalidStateTransition { .. })
        ));
    }

    #[test]
    fn test_advance_round_requires_all_matches_decided() {
        let mut tournament = swiss_tournament();
        for id in [10, 20, 30, 40] {
            tournament.add_participant(id).unwrap();
        }
        tournament.start(Some(1)).unwrap();

        let mut matches = vec![
            decided_match(1, 1, 1, 10, 20, 10),
            MatchRecord::new(2, 1, 30, 40).in_tournament(1, 1),
        ];

        assert_eq!(
            tournament.advance_round(&matches),
            Err(TournamentError::IncompleteRound {
                tournament_id: 1,
                round: 1,
                unresolved: 1,
            })
        );
        assert_eq!(tournament.current_round, 1);

        matches[1].winner_id = Some(40);
        matches[1].finished = true;
        tournament.advance_round(&matches).unwrap();
        assert_eq!(tournament.current_round, 2);
    }

    #[test]
    fn test_matches_outside_the_round_do_not_block() {
        let mut tournament = swiss_tournament();
        for id in [10, 20, 30] {
            tournament.add_participant(id).unwrap();
        }
        tournament.start(Some(1)).unwrap();

        // Unfinished matches from another tournament and another round.
        let matches = vec![
            MatchRecord::new(1, 1, 10, 20).in_tournament(99, 1),
            MatchRecord::new(2, 1, 10, 20).in_tournament(1, 2),
            MatchRecord::new(3, 1, 10, 20),
        ];
        assert!(round_is_complete(&matches, 1, 1));
        tournament.advance_round(&matches).unwrap();
    }

    #[test]
    fn test_finish_stamps_and_terminates() {
        let mut tournament = swiss_tournament();
        for id in [10, 20, 30] {
            tournament.add_participant(id).unwrap();
        }
        tournament.start(Some(1)).unwrap();

        let matches = vec![
            decided_match(1, 1, 1, 10, 20, 10),
            decided_match(2, 1, 1, 30, 10, 30),
        ];
        tournament.finish(&matches).unwrap();
        assert_eq!(tournament.status, TournamentStatus::Finished);
        assert!(tournament.finished_at.is_some());

        // Terminal: nothing moves it again.
        assert!(tournament.cancel().is_err());
        assert!(tournament.finish(&matches).is_err());
    }

    #[test]
    fn test_cancel_from_created_and_in_progress() {
        let mut tournament = swiss_tournament();
        tournament.cancel().unwrap();
        assert_eq!(tournament.status, TournamentStatus::Cancelled);
        assert!(tournament.cancel().is_err());

        let mut tournament = swiss_tournament();
        for id in [10, 20, 30] {
            tournament.add_participant(id).unwrap();
        }
        tournament.start(Some(1)).unwrap();
        tournament.cancel().unwrap();
        assert_eq!(tournament.status, TournamentStatus::Cancelled);
    }

    #[test]
    fn test_standings_use_tournament_draw_policy() {
        let mut tournament = Tournament::new(
            7,
            1,
            "Liga",
            TournamentType::RoundRobin,
            TournamentConfig {
                allow_draws: true,
                ..TournamentConfig::default()
            },
        );
        for id in [10, 20] {
            tournament.add_participant(id).unwrap();
        }

        let mut drawn = MatchRecord::new(1, 1, 10, 20).in_tournament(7, 1);
        drawn.finished = true;

        let standings = tournament.standings(&[drawn]);
        assert_eq!(standings[0].draws, 1);
        assert_eq!(standings[1].draws, 1);
    }
}
