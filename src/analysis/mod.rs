pub mod engine;
pub mod errors;
pub mod extract;
pub mod recommend;
pub mod summarize;
pub mod tags;
pub mod taxonomy;
pub mod text;

pub use engine::Engine;
pub use errors::{AnalysisError, AnalysisResult};
pub use extract::{ExtractedPage, PageExtractor};
pub use recommend::{ContentProfile, SimilarityCandidate, SimilarityRecommender};
pub use summarize::{SummaryGenerator, SummaryResult};
pub use tags::{TagContext, TagSuggester, TagSuggestion};
