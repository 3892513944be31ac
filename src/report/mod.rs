pub mod csv_export;
pub mod text;
pub mod xlsx;

use serde::Serialize;

use crate::models::AnnotatedComment;

pub use self::csv_export::write_csv;
pub use self::text::{format_markdown, format_text};
pub use self::xlsx::{SpreadsheetReport, SHEET_NAMES};

pub const HEADERS: [&str; 10] = [
    "Author",
    "Comment",
    "Sentiment",
    "Confidence",
    "Safety",
    "Lead",
    "Question",
    "Likes",
    "Replies",
    "Published",
];

/// One exported comment, shared by the CSV and spreadsheet writers.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReportRow {
    #[serde(rename = "Author")]
    pub author: String,
    #[serde(rename = "Comment")]
    pub comment: String,
    #[serde(rename = "Sentiment")]
    pub sentiment: &'static str,
    #[serde(rename = "Confidence")]
    pub confidence: f32,
    #[serde(rename = "Safety")]
    pub safety: &'static str,
    #[serde(rename = "Lead")]
    pub lead: bool,
    #[serde(rename = "Question")]
    pub question: bool,
    #[serde(rename = "Likes")]
    pub likes: u64,
    #[serde(rename = "Replies")]
    pub replies: u64,
    #[serde(rename = "Published")]
    pub published: String,
}

impl From<&AnnotatedComment> for ReportRow {
    fn from(c: &AnnotatedComment) -> Self {
        Self {
            author: c.comment.author().to_string(),
            comment: c.comment.raw_text().to_string(),
            sentiment: c.annotation.sentiment.label(),
            confidence: c.annotation.confidence,
            safety: c.annotation.toxicity.map(|t| t.label()).unwrap_or(""),
            lead: c.annotation.is_lead,
            question: c.annotation.is_question,
            likes: c.comment.like_count(),
            replies: c.comment.reply_count(),
            published: c
                .comment
                .published_at()
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Annotation, Comment, RawComment, Sentiment, Toxicity};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_row_carries_engagement_counts() {
        let comment = AnnotatedComment {
            comment: Comment::new(
                RawComment {
                    author: "@leo".to_string(),
                    text: "¿Hacen envíos?".to_string(),
                    like_count: 12,
                    reply_count: 3,
                    published_at: Some(Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()),
                },
                "¿hacen envíos?".to_string(),
            ),
            annotation: Annotation {
                sentiment: Sentiment::Neutral,
                confidence: 0.8,
                toxicity: Some(Toxicity::Safe),
                is_lead: false,
                is_question: true,
            },
        };

        let row = ReportRow::from(&comment);
        assert_eq!(row.likes, 12);
        assert_eq!(row.replies, 3);
        assert_eq!(row.published, "2024-05-01 09:30");
        assert_eq!(row.safety, Toxicity::Safe.label());
        assert_eq!(HEADERS[7..9], ["Likes", "Replies"]);
    }
}
