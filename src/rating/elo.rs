//! Elo rating calculation with per-player volatility tiers.
//!
//! Reference: https://en.wikipedia.org/wiki/Elo_rating_system

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::settings::RatingSettings;
use crate::domain::Competitor;

/// Result of applying an Elo update to both sides of a decided match.
///
/// Each side is updated with its own K-factor, so `delta_a + delta_b` is only
/// zero when both K-factors match. That asymmetry is deliberate: a novice's
/// rating moves more than a master's even in the same match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub new_rating_a: f64,
    pub new_rating_b: f64,
    pub delta_a: f64,
    pub delta_b: f64,
    pub k_a: i32,
    pub k_b: i32,
}

/// Win probabilities for both players.
///
/// P(A wins) = 1 / (1 + 10^((rating_b - rating_a) / scale)); P(B) = 1 - P(A).
pub fn win_probability(rating_a: f64, rating_b: f64, settings: &RatingSettings) -> (f64, f64) {
    let expected_a = 1.0 / (1.0 + 10f64.powf((rating_b - rating_a) / settings.rating_scale));
    (expected_a, 1.0 - expected_a)
}

/// K-factor tiers:
/// - novice (fewer than 5 matches): 32, ratings swing hard while unproven
/// - master (rating 2200+): 16, stable regardless of match count
/// - everyone else: 24
pub fn k_factor(rating: f64, matches_played: u32, settings: &RatingSettings) -> i32 {
    if matches_played < settings.novice_match_threshold {
        settings.novice_k
    } else if rating >= settings.master_rating_threshold {
        settings.master_k
    } else {
        settings.intermediate_k
    }
}

/// New rating after one game: current + K * (result - expected).
/// `result` is 1.0 for a win, 0.0 for a loss.
pub fn new_rating(current: f64, expected: f64, result: f64, k: i32) -> f64 {
    current + f64::from(k) * (result - expected)
}

/// Rounded single-player rating change, for display.
pub fn rating_change(
    current: f64,
    opponent: f64,
    result: f64,
    k: i32,
    settings: &RatingSettings,
) -> i64 {
    let (expected, _) = win_probability(current, opponent, settings);
    (f64::from(k) * (result - expected)).round() as i64
}

/// Compute both sides of a decided match, each with its own K-factor.
pub fn match_outcome(
    rating_a: f64,
    rating_b: f64,
    winner_is_a: bool,
    k_a: i32,
    k_b: i32,
    settings: &RatingSettings,
) -> MatchOutcome {
    let (expected_a, expected_b) = win_probability(rating_a, rating_b, settings);
    let (result_a, result_b) = if winner_is_a { (1.0, 0.0) } else { (0.0, 1.0) };

    let new_rating_a = new_rating(rating_a, expected_a, result_a, k_a);
    let new_rating_b = new_rating(rating_b, expected_b, result_b, k_b);

    MatchOutcome {
        new_rating_a,
        new_rating_b,
        delta_a: new_rating_a - rating_a,
        delta_b: new_rating_b - rating_b,
        k_a,
        k_b,
    }
}

/// The single mutation point for competitor statistics: updates both ratings,
/// bumps `matches_played` on both sides and `wins` on the winner.
///
/// Callers must apply this exactly once per decided match; both competitors
/// are borrowed mutably so the pair of writes cannot be interleaved with
/// another update to either player.
pub fn apply_outcome(
    player1: &mut Competitor,
    player2: &mut Competitor,
    winner_is_p1: bool,
    settings: &RatingSettings,
) -> MatchOutcome {
    let k1 = k_factor(player1.rating, player1.matches_played, settings);
    let k2 = k_factor(player2.rating, player2.matches_played, settings);
    let outcome = match_outcome(player1.rating, player2.rating, winner_is_p1, k1, k2, settings);

    debug!(
        "Elo update: competitor {} {:+.1} (K={}), competitor {} {:+.1} (K={})",
        player1.id, outcome.delta_a, k1, player2.id, outcome.delta_b, k2
    );

    player1.rating = outcome.new_rating_a;
    player2.rating = outcome.new_rating_b;
    player1.matches_played += 1;
    player2.matches_played += 1;
    if winner_is_p1 {
        player1.wins += 1;
    } else {
        player2.wins += 1;
    }

    outcome
}
