//! Shiksha Match - school recommendation and assistant service
//!
//! This library provides the scoring core used by the Shiksha app's school
//! finder: schools fetched from the realtime database are ranked against a
//! family's preference profile, and an assistant endpoint forwards the
//! school data to a hosted completion API for free-text questions.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{calculate_score, Recommender, DEFAULT_MIN_SCORE};
pub use crate::models::{SchoolRecord, ScoreWeights, ScoredSchool, StudentProfile};
