use std::sync::Arc;

use crate::classifier::parser::{map_sentiment_label, top_label, toxicity_from_scores};
use crate::classifier::provider::TextClassifier;
use crate::models::{Sentiment, Toxicity};

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub sentiment: Sentiment,
    pub confidence: f32,
    pub toxicity: Option<Toxicity>,
}

impl Classification {
    fn fallback() -> Self {
        Self {
            sentiment: Sentiment::Neutral,
            confidence: 0.0,
            toxicity: None,
        }
    }
}

/// Owns the sentiment model and, optionally, a toxicity model. Built once by
/// the caller and handed to the pipeline.
#[derive(Clone)]
pub struct ClassifierService {
    sentiment: Arc<dyn TextClassifier>,
    toxicity: Option<Arc<dyn TextClassifier>>,
    toxicity_threshold: f32,
}

impl ClassifierService {
    pub fn new(sentiment: impl TextClassifier + 'static) -> Self {
        Self {
            sentiment: Arc::new(sentiment),
            toxicity: None,
            toxicity_threshold: 0.5,
        }
    }

    pub fn with_toxicity(mut self, toxicity: impl TextClassifier + 'static, threshold: f32) -> Self {
        self.toxicity = Some(Arc::new(toxicity));
        self.toxicity_threshold = threshold;
        self
    }

    pub fn has_toxicity(&self) -> bool {
        self.toxicity.is_some()
    }

    pub fn describe(&self) -> String {
        match &self.toxicity {
            Some(tox) => format!("{} + {}", self.sentiment.name(), tox.name()),
            None => self.sentiment.name().to_string(),
        }
    }

    /// Classifies one comment. Model failures are logged and fall back to
    /// neutral, they never fail the caller.
    pub async fn classify(&self, text: &str) -> Classification {
        if text.trim().is_empty() {
            tracing::debug!("Skipping classification of empty comment");
            return Classification::fallback();
        }

        let (sentiment, confidence) = match self.sentiment.classify(text).await {
            Ok(scores) => match top_label(&scores) {
                Some(top) => (
                    map_sentiment_label(&top.label).unwrap_or(Sentiment::Neutral),
                    top.score,
                ),
                None => (Sentiment::Neutral, 0.0),
            },
            Err(e) => {
                tracing::warn!("Sentiment classification failed, using neutral: {}", e);
                (Sentiment::Neutral, 0.0)
            }
        };

        let toxicity = match &self.toxicity {
            Some(model) => match model.classify(text).await {
                Ok(scores) => Some(toxicity_from_scores(&scores, self.toxicity_threshold)),
                Err(e) => {
                    tracing::warn!("Toxicity classification failed: {}", e);
                    None
                }
            },
            None => None,
        };

        Classification {
            sentiment,
            confidence,
            toxicity,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::classifier::provider::LabelScore;
    use crate::error::{Error, Result};
    use async_trait::async_trait;

    /// Returns a fixed answer per keyword; fails on comments containing "boom".
    pub(crate) struct ScriptedClassifier {
        pub rules: Vec<(&'static str, &'static str, f32)>,
    }

    #[async_trait]
    impl TextClassifier for ScriptedClassifier {
        async fn classify(&self, text: &str) -> Result<Vec<LabelScore>> {
            if text.contains("boom") {
                return Err(Error::Classifier("model unavailable".to_string()));
            }
            Ok(self
                .rules
                .iter()
                .find(|(needle, _, _)| text.contains(needle))
                .map(|(_, label, score)| vec![LabelScore::new(*label, *score)])
                .unwrap_or_else(|| vec![LabelScore::new("NEU", 0.6)]))
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn service() -> ClassifierService {
        ClassifierService::new(ScriptedClassifier {
            rules: vec![("love", "POS", 0.9), ("hate", "NEG", 0.8), ("stars", "5 stars", 0.7)],
        })
    }

    #[tokio::test]
    async fn test_maps_top_label() {
        let result = service().classify("i love it").await;
        assert_eq!(result.sentiment, Sentiment::Positive);
        assert_eq!(result.confidence, 0.9);
        assert_eq!(result.toxicity, None);
    }

    #[tokio::test]
    async fn test_unmapped_label_is_neutral() {
        let result = service().classify("five stars").await;
        assert_eq!(result.sentiment, Sentiment::Neutral);
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_neutral() {
        let result = service().classify("boom").await;
        assert_eq!(result, Classification::fallback());
    }

    #[tokio::test]
    async fn test_empty_text_skips_model() {
        let result = service().classify("   ").await;
        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert_eq!(result.confidence, 0.0);
    }

    #[tokio::test]
    async fn test_toxicity_flag() {
        let service = service().with_toxicity(
            ScriptedClassifier {
                rules: vec![("hate", "hateful", 0.9)],
            },
            0.5,
        );
        assert!(service.has_toxicity());
        assert_eq!(
            service.classify("i hate you").await.toxicity,
            Some(Toxicity::Flagged)
        );
        assert_eq!(service.classify("i love it").await.toxicity, Some(Toxicity::Safe));
        assert_eq!(service.classify("boom").await.toxicity, None);
    }
}
