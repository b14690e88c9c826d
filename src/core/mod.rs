// Core algorithm exports
pub mod recommender;
pub mod scoring;

pub use recommender::{Recommender, RecommendResult, DEFAULT_MIN_SCORE};
pub use scoring::calculate_score;
