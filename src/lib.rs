//! Tournament engine for a racket-sport ladder.
//!
//! Tracks an Elo-style rating per competitor, builds brackets for four
//! tournament formats (single elimination, Swiss, group+knockout, round
//! robin) and drives a tournament through its lifecycle. The engine is
//! synchronous, holds no global state and performs no I/O; persistence,
//! transport and authentication belong to the surrounding application.

pub mod bracket;
pub mod config;
pub mod domain;
pub mod errors;
pub mod membership;
pub mod rating;
pub mod standings;
pub mod tournament;

pub use bracket::{Bracket, MatchSlot, SlotStatus};
pub use config::settings::{EngineConfig, RatingSettings};
pub use domain::{
    Competitor, CompetitorId, EventId, MatchId, MatchRecord, TournamentConfig, TournamentId,
    TournamentStatus, TournamentType,
};
pub use errors::TournamentError;
pub use membership::{Membership, MembershipGate, MembershipRoster, MembershipStatus};
pub use rating::MatchOutcome;
pub use standings::{StandingRow, compute_standings};
pub use tournament::{ScoreLine, Tournament, report_draw, report_result, round_is_complete};
