//! Offline word-list classifiers.
//!
//! Used when no inference token is configured, so a run still produces a
//! report. Output uses the same label vocabulary as the hosted models.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::classifier::provider::{LabelScore, TextClassifier};
use crate::error::Result;

const SENTIMENT_WORDS: &[(&str, f32)] = &[
    // Spanish, positive
    ("excelente", 0.9),
    ("bueno", 0.5),
    ("buena", 0.5),
    ("buenísimo", 0.8),
    ("genial", 0.8),
    ("increíble", 0.8),
    ("increible", 0.8),
    ("gracias", 0.6),
    ("encanta", 0.8),
    ("encantó", 0.8),
    ("gusta", 0.5),
    ("amo", 0.7),
    ("mejor", 0.5),
    ("recomendado", 0.6),
    ("perfecto", 0.8),
    ("hermoso", 0.7),
    ("feliz", 0.6),
    ("felicidades", 0.7),
    ("útil", 0.5),
    // English, positive
    ("love", 0.8),
    ("great", 0.7),
    ("good", 0.5),
    ("awesome", 0.8),
    ("amazing", 0.8),
    ("thanks", 0.5),
    ("best", 0.6),
    ("excellent", 0.9),
    ("nice", 0.5),
    ("helpful", 0.5),
    // Spanish, negative
    ("malo", -0.6),
    ("mala", -0.6),
    ("pésimo", -0.9),
    ("pesimo", -0.9),
    ("horrible", -0.9),
    ("terrible", -0.8),
    ("odio", -0.8),
    ("estafa", -0.9),
    ("fraude", -0.9),
    ("peor", -0.7),
    ("aburrido", -0.5),
    ("basura", -0.8),
    ("decepción", -0.7),
    ("decepcion", -0.7),
    ("mentira", -0.7),
    ("caro", -0.3),
    // English, negative
    ("bad", -0.6),
    ("worst", -0.9),
    ("hate", -0.8),
    ("scam", -0.9),
    ("awful", -0.8),
    ("boring", -0.5),
    ("fake", -0.6),
];

const NEGATIONS: &[&str] = &["no", "nunca", "jamás", "jamas", "ni", "not", "never", "dont"];

const INTENSIFIERS: &[(&str, f32)] = &[
    ("muy", 1.5),
    ("súper", 1.5),
    ("super", 1.5),
    ("tan", 1.3),
    ("demasiado", 1.3),
    ("very", 1.5),
    ("really", 1.3),
];

const TOXIC_TERMS: &[&str] = &[
    "idiota",
    "estúpido",
    "estupido",
    "imbécil",
    "imbecil",
    "pendejo",
    "maldito",
    "mierda",
    "asqueroso",
    "cállate",
    "idiot",
    "stupid",
    "moron",
    "shut up",
    "kill yourself",
];

/// Word-weight sentiment scorer with two-token negation and intensifier lookback.
pub struct SentimentLexicon {
    words: HashMap<&'static str, f32>,
    intensifiers: HashMap<&'static str, f32>,
}

impl Default for SentimentLexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentLexicon {
    /// Emits `POS` / `NEU` / `NEG`.
    pub fn new() -> Self {
        Self {
            words: SENTIMENT_WORDS.iter().copied().collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
        }
    }

    fn score_sentiment(&self, text: &str) -> f32 {
        let tokens: Vec<&str> = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .collect();

        let mut total = 0.0;
        for (i, token) in tokens.iter().enumerate() {
            let Some(&weight) = self.words.get(*token) else {
                continue;
            };

            let mut weight = weight;
            // look back two tokens for modifiers
            for prev in tokens[i.saturating_sub(2)..i].iter() {
                if NEGATIONS.contains(prev) {
                    weight = -weight;
                }
                if let Some(&boost) = self.intensifiers.get(*prev) {
                    weight *= boost;
                }
            }
            total += weight;
        }
        total
    }

    fn sentiment_scores(&self, text: &str) -> Vec<LabelScore> {
        let raw = self.score_sentiment(text);
        let strength = 0.5 + 0.5 * raw.abs().tanh();

        if raw > 0.0 {
            vec![
                LabelScore::new("POS", strength),
                LabelScore::new("NEU", 1.0 - strength),
                LabelScore::new("NEG", 0.0),
            ]
        } else if raw < 0.0 {
            vec![
                LabelScore::new("NEG", strength),
                LabelScore::new("NEU", 1.0 - strength),
                LabelScore::new("POS", 0.0),
            ]
        } else {
            vec![
                LabelScore::new("NEU", 1.0),
                LabelScore::new("POS", 0.0),
                LabelScore::new("NEG", 0.0),
            ]
        }
    }
}

/// Substring matcher over a fixed list of abusive terms.
pub struct ToxicityLexicon {
    terms: &'static [&'static str],
}

impl Default for ToxicityLexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl ToxicityLexicon {
    /// Emits `toxic` / `non_toxic`.
    pub fn new() -> Self {
        Self::with_terms(TOXIC_TERMS)
    }

    /// Terms must be lowercase; multi-word phrases match as substrings.
    pub fn with_terms(terms: &'static [&'static str]) -> Self {
        Self { terms }
    }

    fn scores(&self, text: &str) -> Vec<LabelScore> {
        let lowered = text.to_lowercase();
        let hits = self.terms.iter().filter(|t| lowered.contains(**t)).count();
        let toxic = (hits as f32 * 0.6).min(1.0);
        vec![
            LabelScore::new("toxic", toxic),
            LabelScore::new("non_toxic", 1.0 - toxic),
        ]
    }
}

#[async_trait]
impl TextClassifier for SentimentLexicon {
    async fn classify(&self, text: &str) -> Result<Vec<LabelScore>> {
        Ok(self.sentiment_scores(&text.to_lowercase()))
    }

    fn name(&self) -> &str {
        "lexicon-sentiment"
    }
}

#[async_trait]
impl TextClassifier for ToxicityLexicon {
    async fn classify(&self, text: &str) -> Result<Vec<LabelScore>> {
        Ok(self.scores(text))
    }

    fn name(&self) -> &str {
        "lexicon-toxicity"
    }
}
