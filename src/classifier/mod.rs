pub mod provider;
pub mod huggingface;
pub mod lexicon;
pub mod parser;
pub mod service;

pub use provider::{LabelScore, TextClassifier};
pub use huggingface::HuggingFaceClassifier;
pub use lexicon::{SentimentLexicon, ToxicityLexicon};
pub use service::{Classification, ClassifierService};

use crate::config::{ClassifierBackend, Config};
use crate::error::Result;

/// Builds the classifier service the config asks for.
pub fn build_service(config: &Config) -> Result<ClassifierService> {
    let backend = config.effective_backend();
    let service = match backend {
        ClassifierBackend::HuggingFace => {
            let token = config.hf_api_token.clone().unwrap_or_default();
            let mut service = ClassifierService::new(HuggingFaceClassifier::new(
                token.clone(),
                config.sentiment_model.clone(),
            )?);
            if config.enable_toxicity {
                service = service.with_toxicity(
                    HuggingFaceClassifier::new(token, config.toxicity_model.clone())?,
                    config.toxicity_threshold,
                );
            }
            service
        }
        _ => {
            let mut service = ClassifierService::new(SentimentLexicon::new());
            if config.enable_toxicity {
                service = service.with_toxicity(ToxicityLexicon::new(), config.toxicity_threshold);
            }
            service
        }
    };

    tracing::info!("Using classifier: {}", service.describe());
    Ok(service)
}
