pub mod config;
pub mod error;
pub mod models;
pub mod youtube;
pub mod classifier;
pub mod analysis;
pub mod report;

pub use config::{Config, PipelineConfig};
pub use error::{Error, Result};
pub use youtube::YouTubeClient;
pub use classifier::{ClassifierService, TextClassifier};
pub use analysis::{AnalysisPipeline, AnalysisReport, KeywordTagger};
pub use report::SpreadsheetReport;
