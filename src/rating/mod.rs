pub mod elo;

pub use elo::{
    MatchOutcome, apply_outcome, k_factor, match_outcome, new_rating, rating_change,
    win_probability,
};
