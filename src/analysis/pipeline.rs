use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::analysis::aggregator::Aggregator;
use crate::analysis::normalizer::TextNormalizer;
use crate::analysis::tagger::KeywordTagger;
use crate::classifier::ClassifierService;
use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::models::{AnalysisResult, AnnotatedComment, Annotation, Comment, Summary};
use crate::youtube::{extract_video_id, Collection, CommentCollector, CommentSource};

/// Everything one run produces.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub video_id: String,
    pub requested: u32,
    pub partial: bool,
    pub analyzed_at: DateTime<Utc>,
    pub summary: Summary,
    #[serde(skip)]
    pub result: AnalysisResult,
}

pub struct AnalysisPipeline {
    source: Box<dyn CommentSource>,
    classifier: ClassifierService,
    normalizer: TextNormalizer,
    tagger: KeywordTagger,
    aggregator: Aggregator,
    config: PipelineConfig,
}

impl AnalysisPipeline {
    pub fn new(
        source: impl CommentSource + 'static,
        classifier: ClassifierService,
        tagger: KeywordTagger,
        config: PipelineConfig,
    ) -> Self {
        Self {
            source: Box::new(source),
            classifier,
            normalizer: TextNormalizer::new(),
            tagger,
            aggregator: Aggregator::new(config.top_n),
            config,
        }
    }

    /// Collects, annotates and summarizes up to `count` comments of the
    /// video behind `target` (a URL or bare ID).
    pub async fn analyze(&self, target: &str, count: u32) -> Result<AnalysisReport> {
        // Step 1: Resolve the video
        let video_id = extract_video_id(target)?;
        tracing::info!("Analyzing video {} ({} comments requested)", video_id, count);

        // Step 2: Collect comments
        let collection = CommentCollector::new(self.source.as_ref())
            .collect(&video_id, count)
            .await?;

        if collection.is_empty() {
            return Err(Error::NotFound(format!("video {} has no comments", video_id)));
        }

        let partial = collection.is_partial();
        if let Collection::Partial { comments, requested } = &collection {
            tracing::warn!(
                "Video {} only has {} of the {} requested comments",
                video_id,
                comments.len(),
                requested
            );
        }

        // Step 3: Normalize, classify and tag
        let result = self.annotate(collection).await;

        // Step 4: Summarize
        let summary = self.aggregator.summarize(&result);
        tracing::info!(
            "Analysis complete: {} comments, {} leads, {} questions",
            summary.total,
            summary.leads,
            summary.questions
        );

        Ok(AnalysisReport {
            video_id,
            requested: count,
            partial,
            analyzed_at: Utc::now(),
            summary,
            result,
        })
    }

    async fn annotate(&self, collection: Collection) -> AnalysisResult {
        let raw_comments = collection.into_comments();

        let pb = if self.config.show_progress {
            let pb = ProgressBar::new(raw_comments.len() as u64);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} comments")
            {
                pb.set_style(style.progress_chars("#>-"));
            }
            pb
        } else {
            ProgressBar::hidden()
        };

        let mut annotated = Vec::with_capacity(raw_comments.len());
        for raw in raw_comments {
            let normalized = self.normalizer.normalize(&raw.text);
            let classification = self.classifier.classify(&normalized).await;
            let tags = self.tagger.tag(&normalized);

            annotated.push(AnnotatedComment {
                comment: Comment::new(raw, normalized),
                annotation: Annotation {
                    sentiment: classification.sentiment,
                    confidence: classification.confidence,
                    toxicity: classification.toxicity,
                    is_lead: tags.is_lead,
                    is_question: tags.is_question,
                },
            });
            pb.inc(1);
        }

        pb.finish_with_message("Classification complete");
        AnalysisResult {
            comments: annotated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::service::tests::ScriptedClassifier;
    use crate::models::{Sentiment, Toxicity};
    use crate::youtube::paginator::tests::FakeSource;

    fn classifier() -> ClassifierService {
        ClassifierService::new(ScriptedClassifier {
            rules: vec![("encanta", "POS", 0.9), ("estafa", "NEG", 0.85)],
        })
    }

    fn pipeline(texts: &[&str]) -> AnalysisPipeline {
        AnalysisPipeline::new(
            FakeSource::with_texts(texts.iter().map(|t| t.to_string()).collect()),
            classifier(),
            KeywordTagger::default(),
            PipelineConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_end_to_end_annotation() {
        let pipeline = pipeline(&[
            "¿Cuánto cuesta? http://x.com",
            "Me ENCANTA este canal",
            "Esto es una estafa &amp; mentira",
            "boom",
        ]);
        let report = pipeline
            .analyze("https://www.youtube.com/watch?v=dQw4w9WgXcQ", 4)
            .await
            .unwrap();

        assert_eq!(report.video_id, "dQw4w9WgXcQ");
        assert!(!report.partial);
        assert_eq!(report.result.len(), 4);

        let first = &report.result.comments[0];
        assert_eq!(first.comment.normalized_text(), "¿cuánto cuesta?");
        assert_eq!(first.comment.raw_text(), "¿Cuánto cuesta? http://x.com");
        assert!(first.annotation.is_lead);
        assert!(first.annotation.is_question);

        let sentiments: Vec<Sentiment> = report
            .result
            .iter()
            .map(|c| c.annotation.sentiment)
            .collect();
        assert_eq!(
            sentiments,
            vec![
                Sentiment::Neutral,
                Sentiment::Positive,
                Sentiment::Negative,
                Sentiment::Neutral,
            ]
        );
        // a failed classification still yields a row
        assert_eq!(report.result.comments[3].annotation.confidence, 0.0);

        assert_eq!(report.summary.total, 4);
        assert_eq!(report.summary.leads, 1);
        assert_eq!(report.summary.flagged, None);
    }

    #[tokio::test]
    async fn test_partial_collection_is_reported() {
        let report = pipeline(&["uno", "dos"])
            .analyze("dQw4w9WgXcQ", 100)
            .await
            .unwrap();
        assert!(report.partial);
        assert_eq!(report.requested, 100);
        assert_eq!(report.summary.total, 2);
    }

    #[tokio::test]
    async fn test_no_comments_is_not_found() {
        let err = pipeline(&[]).analyze("dQw4w9WgXcQ", 10).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_missing_target_is_input_error() {
        let err = pipeline(&["hola"]).analyze("", 10).await.unwrap_err();
        assert!(matches!(err, Error::Input(_)));
    }

    #[tokio::test]
    async fn test_toxicity_annotation() {
        let service = classifier().with_toxicity(
            ScriptedClassifier {
                rules: vec![("estafa", "hateful", 0.9)],
            },
            0.5,
        );
        let pipeline = AnalysisPipeline::new(
            FakeSource::with_texts(vec!["estafa total".to_string(), "hola".to_string()]),
            service,
            KeywordTagger::default(),
            PipelineConfig::default(),
        );
        let report = pipeline.analyze("dQw4w9WgXcQ", 2).await.unwrap();
        assert_eq!(
            report.result.comments[0].annotation.toxicity,
            Some(Toxicity::Flagged)
        );
        assert_eq!(report.summary.flagged, Some(1));
    }
}
