use crate::models::{
    AnalysisResult, AnnotatedComment, Sentiment, SentimentShare, SentimentTop, Summary, TopComment,
};

pub struct Aggregator {
    top_n: usize,
}

impl Aggregator {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    pub fn summarize(&self, result: &AnalysisResult) -> Summary {
        let total = result.len();

        let sentiments = Sentiment::ALL
            .iter()
            .map(|&sentiment| {
                let count = result.with_sentiment(sentiment).count();
                SentimentShare {
                    sentiment,
                    count,
                    percentage: percentage(count, total),
                }
            })
            .collect();

        let leads = result.leads().count();
        let questions = result.questions().count();
        let flagged = result.has_toxicity().then(|| result.flagged().count());

        let top_by_sentiment = Sentiment::ALL
            .iter()
            .map(|&sentiment| SentimentTop {
                sentiment,
                comments: self.top_by_confidence(result, sentiment),
            })
            .collect();

        Summary {
            total,
            sentiments,
            leads,
            lead_percentage: percentage(leads, total),
            questions,
            question_percentage: percentage(questions, total),
            flagged,
            top_by_sentiment,
            top_liked: self.top_by_likes(result),
        }
    }

    /// Highest confidence first; `sort_by` is stable so equal scores keep
    /// collection order.
    fn top_by_confidence(&self, result: &AnalysisResult, sentiment: Sentiment) -> Vec<TopComment> {
        let mut candidates: Vec<(usize, &AnnotatedComment)> = result
            .iter()
            .enumerate()
            .filter(|(_, c)| c.annotation.sentiment == sentiment)
            .collect();
        candidates.sort_by(|(_, a), (_, b)| {
            b.annotation.confidence.total_cmp(&a.annotation.confidence)
        });
        candidates
            .into_iter()
            .take(self.top_n)
            .map(|(index, c)| to_top(index, c))
            .collect()
    }

    fn top_by_likes(&self, result: &AnalysisResult) -> Vec<TopComment> {
        let mut candidates: Vec<(usize, &AnnotatedComment)> = result
            .iter()
            .enumerate()
            .filter(|(_, c)| c.comment.like_count() > 0)
            .collect();
        candidates.sort_by(|(_, a), (_, b)| b.comment.like_count().cmp(&a.comment.like_count()));
        candidates
            .into_iter()
            .take(self.top_n)
            .map(|(index, c)| to_top(index, c))
            .collect()
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(5)
    }
}

fn to_top(index: usize, c: &AnnotatedComment) -> TopComment {
    TopComment {
        index,
        author: c.comment.author().to_string(),
        text: c.comment.raw_text().to_string(),
        confidence: c.annotation.confidence,
        like_count: c.comment.like_count(),
    }
}

/// Share of `total` in percent; an empty run is 0%.
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}
