use serde::{Deserialize, Serialize};
use super::comment::Sentiment;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentShare {
    pub sentiment: Sentiment,
    pub count: usize,
    pub percentage: f64,
}

/// A comment picked for a top list. `index` points into the analysis result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopComment {
    pub index: usize,
    pub author: String,
    pub text: String,
    pub confidence: f32,
    pub like_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentTop {
    pub sentiment: Sentiment,
    pub comments: Vec<TopComment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub sentiments: Vec<SentimentShare>,
    pub leads: usize,
    pub lead_percentage: f64,
    pub questions: usize,
    pub question_percentage: f64,
    /// `None` when toxicity was not computed for this run.
    pub flagged: Option<usize>,
    pub top_by_sentiment: Vec<SentimentTop>,
    pub top_liked: Vec<TopComment>,
}

impl Summary {
    pub fn share(&self, sentiment: Sentiment) -> Option<&SentimentShare> {
        self.sentiments.iter().find(|s| s.sentiment == sentiment)
    }

    pub fn top(&self, sentiment: Sentiment) -> &[TopComment] {
        self.top_by_sentiment
            .iter()
            .find(|t| t.sentiment == sentiment)
            .map(|t| t.comments.as_slice())
            .unwrap_or(&[])
    }

    /// The sentiment with the most comments, `None` for an empty run.
    pub fn dominant(&self) -> Option<Sentiment> {
        if self.total == 0 {
            return None;
        }
        // max_by_key keeps the last maximum, so walk backwards to favor the first
        self.sentiments
            .iter()
            .rev()
            .max_by_key(|s| s.count)
            .map(|s| s.sentiment)
    }
}
