use crate::core::scoring::calculate_score;
use crate::models::{SchoolRecord, ScoreWeights, ScoredSchool, StudentProfile};

/// Minimum score a school must reach to appear in recommendations.
/// Lowered from earlier experiments; kept configurable via `[scoring]`.
pub const DEFAULT_MIN_SCORE: u32 = 30;

/// Result of a recommendation run
#[derive(Debug)]
pub struct RecommendResult {
    pub schools: Vec<ScoredSchool>,
    pub total_considered: usize,
}

/// Recommendation orchestrator: scores every school against one profile,
/// drops everything under the threshold and ranks the rest.
#[derive(Debug, Clone)]
pub struct Recommender {
    weights: ScoreWeights,
    min_score: u32,
}

impl Recommender {
    pub fn new(weights: ScoreWeights, min_score: u32) -> Self {
        Self { weights, min_score }
    }

    pub fn with_defaults() -> Self {
        Self {
            weights: ScoreWeights::default(),
            min_score: DEFAULT_MIN_SCORE,
        }
    }

    /// Score, filter and rank a school list for one profile.
    ///
    /// Schools scoring below the threshold are dropped; the rest are sorted
    /// by score descending. Tie order between equal scores is unspecified.
    pub fn recommend(
        &self,
        profile: &StudentProfile,
        schools: Vec<SchoolRecord>,
    ) -> RecommendResult {
        let total_considered = schools.len();

        let mut scored: Vec<ScoredSchool> = schools
            .into_iter()
            .filter_map(|school| {
                let score = calculate_score(&school, profile, &self.weights);
                (score >= self.min_score).then(|| ScoredSchool { school, score })
            })
            .collect();

        scored.sort_by(|a, b| b.score.cmp(&a.score));

        RecommendResult {
            schools: scored,
            total_considered,
        }
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::with_defaults()
    }
}
