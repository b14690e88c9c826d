// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{ClassList, FeePreference, SchoolRecord, ScoreWeights, ScoredSchool, StudentProfile};
pub use requests::ChatRequest;
pub use responses::{ChatResponse, ErrorResponse, HealthResponse, UploadResponse};
