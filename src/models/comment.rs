use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A collected top-level comment. Fields are private so a comment cannot be
/// edited once the pipeline has built it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    author: String,
    raw_text: String,
    normalized_text: String,
    like_count: u64,
    reply_count: u64,
    published_at: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn new(raw: RawComment, normalized_text: String) -> Self {
        Self {
            author: raw.author,
            raw_text: raw.text,
            normalized_text,
            like_count: raw.like_count,
            reply_count: raw.reply_count,
            published_at: raw.published_at,
        }
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn normalized_text(&self) -> &str {
        &self.normalized_text
    }

    pub fn like_count(&self) -> u64 {
        self.like_count
    }

    pub fn reply_count(&self) -> u64 {
        self.reply_count
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
    }
}

/// A comment as it comes off the API, before normalization.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawComment {
    pub author: String,
    pub text: String,
    pub like_count: u64,
    pub reply_count: u64,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Toxicity {
    Safe,
    Flagged,
}

impl Toxicity {
    pub fn label(&self) -> &'static str {
        match self {
            Toxicity::Safe => "Safe",
            Toxicity::Flagged => "Flagged",
        }
    }
}

impl std::fmt::Display for Toxicity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub sentiment: Sentiment,
    pub confidence: f32,
    pub toxicity: Option<Toxicity>,
    pub is_lead: bool,
    pub is_question: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedComment {
    pub comment: Comment,
    pub annotation: Annotation,
}

/// Annotated comments in collection order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub comments: Vec<AnnotatedComment>,
}

impl AnalysisResult {
    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnnotatedComment> {
        self.comments.iter()
    }

    pub fn leads(&self) -> impl Iterator<Item = &AnnotatedComment> {
        self.iter().filter(|c| c.annotation.is_lead)
    }

    pub fn questions(&self) -> impl Iterator<Item = &AnnotatedComment> {
        self.iter().filter(|c| c.annotation.is_question)
    }

    pub fn with_sentiment(&self, sentiment: Sentiment) -> impl Iterator<Item = &AnnotatedComment> {
        self.iter().filter(move |c| c.annotation.sentiment == sentiment)
    }

    pub fn flagged(&self) -> impl Iterator<Item = &AnnotatedComment> {
        self.iter()
            .filter(|c| c.annotation.toxicity == Some(Toxicity::Flagged))
    }

    /// True when at least one comment carries a toxicity verdict.
    pub fn has_toxicity(&self) -> bool {
        self.iter().any(|c| c.annotation.toxicity.is_some())
    }
}

impl FromIterator<AnnotatedComment> for AnalysisResult {
    fn from_iter<I: IntoIterator<Item = AnnotatedComment>>(iter: I) -> Self {
        Self {
            comments: iter.into_iter().collect(),
        }
    }
}
