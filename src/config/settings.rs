/// Numeric policy for the Elo engine.
///
/// Passed explicitly (dependency injection) rather than read from globals,
/// so alternative ladders can tune volatility without recompiling.
#[derive(Debug, Clone)]
pub struct RatingSettings {
    pub initial_rating: f64,
    pub rating_scale: f64,
    pub novice_k: i32,
    pub intermediate_k: i32,
    pub master_k: i32,
    pub novice_match_threshold: u32,
    pub master_rating_threshold: f64,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            initial_rating: 1200.0,
            rating_scale: 400.0,
            novice_k: 32,
            intermediate_k: 24,
            master_k: 16,
            novice_match_threshold: 5,
            master_rating_threshold: 2200.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub rating: RatingSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self {
            rating: RatingSettings::default(),
        }
    }
}
