pub mod settings;

pub use settings::{EngineConfig, RatingSettings};
