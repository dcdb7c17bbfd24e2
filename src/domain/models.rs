use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::settings::RatingSettings;
use crate::errors::TournamentError;

pub type CompetitorId = i64;
pub type EventId = i64;
pub type MatchId = i64;
pub type TournamentId = i64;

/// A ladder competitor. Identity is immutable; `rating`, `matches_played` and
/// `wins` change only when a decided match is applied by the rating engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Competitor {
    pub id: CompetitorId,
    pub event_id: EventId,
    pub name: String,
    pub rating: f64,
    pub matches_played: u32,
    pub wins: u32,
    /// Soft-delete flag; inactive competitors keep their history.
    pub active: bool,
}

impl Competitor {
    pub fn new(id: CompetitorId, event_id: EventId, name: impl Into<String>) -> Self {
        Self {
            id,
            event_id,
            name: name.into(),
            rating: RatingSettings::default().initial_rating,
            matches_played: 0,
            wins: 0,
            active: true,
        }
    }
}

/// A head-to-head match. May exist outside any tournament (`tournament_id`
/// None); tournament matches carry the round they belong to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: MatchId,
    pub event_id: EventId,
    pub tournament_id: Option<TournamentId>,
    pub round: u32,
    pub player1_id: CompetitorId,
    pub player2_id: CompetitorId,
    /// One of the two players, or None while undecided (or drawn).
    pub winner_id: Option<CompetitorId>,
    pub best_of: u32,
    pub player1_games: u32,
    pub player2_games: u32,
    /// Detailed per-game score, e.g. "11-9,10-12,11-8". Opaque to the engine.
    pub games_score: Option<String>,
    pub finished: bool,
}

impl MatchRecord {
    pub fn new(
        id: MatchId,
        event_id: EventId,
        player1_id: CompetitorId,
        player2_id: CompetitorId,
    ) -> Self {
        Self {
            id,
            event_id,
            tournament_id: None,
            round: 0,
            player1_id,
            player2_id,
            winner_id: None,
            best_of: 5,
            player1_games: 0,
            player2_games: 0,
            games_score: None,
            finished: false,
        }
    }

    pub fn in_tournament(mut self, tournament_id: TournamentId, round: u32) -> Self {
        self.tournament_id = Some(tournament_id);
        self.round = round;
        self
    }

    pub fn with_best_of(mut self, best_of: u32) -> Self {
        self.best_of = best_of;
        self
    }

    pub fn involves(&self, competitor_id: CompetitorId) -> bool {
        self.player1_id == competitor_id || self.player2_id == competitor_id
    }

    pub fn is_decided(&self) -> bool {
        self.winner_id.is_some()
    }

    /// The player who did not win, once a winner is set.
    pub fn loser_id(&self) -> Option<CompetitorId> {
        match self.winner_id {
            Some(w) if w == self.player1_id => Some(self.player2_id),
            Some(w) if w == self.player2_id => Some(self.player1_id),
            _ => None,
        }
    }
}

/// The four supported bracket formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TournamentType {
    SingleElimination,
    Swiss,
    GroupKnockout,
    RoundRobin,
}

impl TournamentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TournamentType::SingleElimination => "SINGLE_ELIMINATION",
            TournamentType::Swiss => "SWISS",
            TournamentType::GroupKnockout => "GROUP_KNOCKOUT",
            TournamentType::RoundRobin => "ROUND_ROBIN",
        }
    }

    /// Minimum participant count before a bracket can be generated.
    pub fn min_participants(&self, config: &TournamentConfig) -> usize {
        match self {
            TournamentType::SingleElimination => 2,
            TournamentType::Swiss => 3,
            TournamentType::GroupKnockout => 2 * config.num_groups as usize,
            TournamentType::RoundRobin => 2,
        }
    }
}

impl fmt::Display for TournamentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TournamentType {
    type Err = TournamentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SINGLE_ELIMINATION" => Ok(TournamentType::SingleElimination),
            "SWISS" => Ok(TournamentType::Swiss),
            "GROUP_KNOCKOUT" => Ok(TournamentType::GroupKnockout),
            "ROUND_ROBIN" => Ok(TournamentType::RoundRobin),
            other => Err(TournamentError::UnknownTournamentType(other.to_string())),
        }
    }
}

/// Tournament lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TournamentStatus {
    Created,
    Starting,
    InProgress,
    Finished,
    Cancelled,
}

impl TournamentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TournamentStatus::Created => "CREATED",
            TournamentStatus::Starting => "STARTING",
            TournamentStatus::InProgress => "IN_PROGRESS",
            TournamentStatus::Finished => "FINISHED",
            TournamentStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TournamentStatus::Finished | TournamentStatus::Cancelled)
    }

    /// The authoritative transition table. Every state change in the engine
    /// goes through this check; nothing leaves FINISHED or CANCELLED.
    pub fn can_transition_to(self, next: TournamentStatus) -> bool {
        use TournamentStatus::*;
        matches!(
            (self, next),
            (Created, Starting)
                | (Created, Cancelled)
                | (Starting, InProgress)
                | (Starting, Finished)
                | (Starting, Cancelled)
                | (InProgress, Finished)
                | (InProgress, Cancelled)
        )
    }
}

impl fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-type tournament configuration. Only the field matching the tournament's
/// type is consulted during bracket generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentConfig {
    /// SINGLE_ELIMINATION: games per match, odd (1, 3, 5 or 7).
    pub best_of: u32,
    /// GROUP_KNOCKOUT: number of groups in the group stage.
    pub num_groups: u32,
    /// SWISS: number of rounds to schedule.
    pub swiss_rounds: u32,
    /// ROUND_ROBIN: whether finished matches without a winner count as draws.
    pub allow_draws: bool,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            best_of: 1,
            num_groups: 2,
            swiss_rounds: 3,
            allow_draws: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tournament_type_round_trips_through_str() {
        for tag in [
            "SINGLE_ELIMINATION",
            "SWISS",
            "GROUP_KNOCKOUT",
            "ROUND_ROBIN",
        ] {
            let parsed: TournamentType = tag.parse().unwrap();
            assert_eq!(parsed.as_str(), tag);
        }
    }

    #[test]
    fn test_unknown_tournament_type_is_rejected() {
        let err = "DOUBLE_ELIMINATION".parse::<TournamentType>().unwrap_err();
        assert_eq!(
            err,
            TournamentError::UnknownTournamentType("DOUBLE_ELIMINATION".to_string())
        );
    }

    #[test]
    fn test_transition_table() {
        use TournamentStatus::*;
        assert!(Created.can_transition_to(Starting));
        assert!(Created.can_transition_to(Cancelled));
        assert!(Starting.can_transition_to(InProgress));
        assert!(InProgress.can_transition_to(Finished));
        assert!(InProgress.can_transition_to(Cancelled));
        assert!(!Finished.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(InProgress));
        assert!(!Created.can_transition_to(InProgress));
    }

    #[test]
    fn test_min_participants_per_type() {
        let config = TournamentConfig {
            num_groups: 4,
            ..TournamentConfig::default()
        };
        assert_eq!(TournamentType::SingleElimination.min_participants(&config), 2);
        assert_eq!(TournamentType::Swiss.min_participants(&config), 3);
        assert_eq!(TournamentType::GroupKnockout.min_participants(&config), 8);
        assert_eq!(TournamentType::RoundRobin.min_participants(&config), 2);
    }

    #[test]
    fn test_loser_id_requires_a_winner() {
        let mut record = MatchRecord::new(1, 1, 10, 20);
        assert_eq!(record.loser_id(), None);
        record.winner_id = Some(20);
        assert_eq!(record.loser_id(), Some(10));
    }
}
