pub mod aggregator;
pub mod normalizer;
pub mod pipeline;
pub mod tagger;

pub use aggregator::Aggregator;
pub use normalizer::TextNormalizer;
pub use pipeline::{AnalysisPipeline, AnalysisReport};
pub use tagger::{KeywordTagger, Tags};
