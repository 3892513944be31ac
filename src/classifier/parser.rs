use serde_json::Value;

use crate::classifier::provider::LabelScore;
use crate::error::{Error, Result};
use crate::models::{Sentiment, Toxicity};

/// Labels that mark a comment as unsafe for a brand.
const TOXIC_LABELS: &[&str] = &[
    "hateful",
    "targeted",
    "aggressive",
    "hate",
    "toxic",
    "severe_toxic",
    "offensive",
    "insult",
    "obscene",
    "threat",
    "identity_hate",
];

/// Reads a Hugging Face text-classification payload. Accepts both the nested
/// `[[{label, score}]]` shape and a flat list.
pub fn parse_label_scores(body: &str) -> Result<Vec<LabelScore>> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| Error::ParseError(format!("Failed to parse classifier response: {}", e)))?;

    if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
        return Err(Error::Classifier(message.to_string()));
    }

    let outer = value
        .as_array()
        .ok_or_else(|| Error::ParseError("Classifier response is not a list".to_string()))?;

    let items = match outer.first() {
        Some(Value::Array(inner)) => inner.clone(),
        _ => outer.clone(),
    };

    items
        .into_iter()
        .map(|item| {
            serde_json::from_value::<LabelScore>(item)
                .map_err(|e| Error::ParseError(format!("Invalid label score: {}", e)))
        })
        .collect()
}

/// Highest-scoring label, first one wins on ties.
pub fn top_label(scores: &[LabelScore]) -> Option<&LabelScore> {
    scores.iter().fold(None, |best: Option<&LabelScore>, s| match best {
        Some(b) if b.score >= s.score => Some(b),
        _ => Some(s),
    })
}

/// Maps a model label onto a sentiment. Unknown labels are `None`.
pub fn map_sentiment_label(label: &str) -> Option<Sentiment> {
    match label.trim().to_lowercase().as_str() {
        "pos" | "positive" | "positivo" | "label_2" => Some(Sentiment::Positive),
        "neu" | "neutral" | "neutro" | "label_1" => Some(Sentiment::Neutral),
        "neg" | "negative" | "negativo" | "label_0" => Some(Sentiment::Negative),
        _ => None,
    }
}

pub fn is_toxic_label(label: &str) -> bool {
    let label = label.trim().to_lowercase();
    TOXIC_LABELS.contains(&label.as_str())
}

/// Flagged when any toxic label reaches the threshold.
pub fn toxicity_from_scores(scores: &[LabelScore], threshold: f32) -> Toxicity {
    let flagged = scores
        .iter()
        .any(|s| is_toxic_label(&s.label) && s.score >= threshold);
    if flagged {
        Toxicity::Flagged
    } else {
        Toxicity::Safe
    }
}
