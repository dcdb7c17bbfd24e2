pub mod models;

pub use models::{
    Competitor, CompetitorId, EventId, MatchId, MatchRecord, TournamentConfig, TournamentId,
    TournamentStatus, TournamentType,
};
