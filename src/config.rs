use crate::error::{Error, Result};
use std::env;
use std::str::FromStr;

pub const DEFAULT_SENTIMENT_MODEL: &str = "pysentimiento/robertuito-sentiment-analysis";
pub const DEFAULT_TOXICITY_MODEL: &str = "pysentimiento/robertuito-hate-speech";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierBackend {
    /// Hugging Face when a token is configured, lexicon otherwise.
    Auto,
    HuggingFace,
    Lexicon,
}

impl FromStr for ClassifierBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" | "" => Ok(Self::Auto),
            "huggingface" | "hf" => Ok(Self::HuggingFace),
            "lexicon" | "offline" => Ok(Self::Lexicon),
            other => Err(Error::Config(format!("unknown classifier backend '{}'", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub youtube_api_key: Option<String>,
    pub hf_api_token: Option<String>,
    pub classifier_backend: ClassifierBackend,
    pub sentiment_model: String,
    pub toxicity_model: String,
    pub enable_toxicity: bool,
    pub toxicity_threshold: f32,
    pub lead_keywords: Option<Vec<String>>,
    pub question_keywords: Option<Vec<String>>,
    pub top_n: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let youtube_api_key = non_empty_var("YOUTUBE_API_KEY");
        let hf_api_token = non_empty_var("HF_API_TOKEN");

        let classifier_backend = match non_empty_var("CLASSIFIER_BACKEND") {
            Some(v) => v.parse()?,
            None => ClassifierBackend::Auto,
        };

        let sentiment_model = non_empty_var("SENTIMENT_MODEL")
            .unwrap_or_else(|| DEFAULT_SENTIMENT_MODEL.to_string());
        let toxicity_model = non_empty_var("TOXICITY_MODEL")
            .unwrap_or_else(|| DEFAULT_TOXICITY_MODEL.to_string());

        let enable_toxicity = non_empty_var("ENABLE_TOXICITY")
            .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false);

        let toxicity_threshold: f32 = parse_var("TOXICITY_THRESHOLD")?.unwrap_or(0.5);
        if !(0.0..=1.0).contains(&toxicity_threshold) {
            return Err(Error::Config(
                "TOXICITY_THRESHOLD must be between 0 and 1".to_string(),
            ));
        }

        let top_n = parse_var("TOP_N")?.unwrap_or(5);

        Ok(Self {
            youtube_api_key,
            hf_api_token,
            classifier_backend,
            sentiment_model,
            toxicity_model,
            enable_toxicity,
            toxicity_threshold,
            lead_keywords: non_empty_var("LEAD_KEYWORDS").map(|v| split_keywords(&v)),
            question_keywords: non_empty_var("QUESTION_KEYWORDS").map(|v| split_keywords(&v)),
            top_n,
        })
    }

    /// Resolves `Auto` against the presence of a Hugging Face token.
    pub fn effective_backend(&self) -> ClassifierBackend {
        match self.classifier_backend {
            ClassifierBackend::Auto if self.hf_api_token.is_some() => ClassifierBackend::HuggingFace,
            ClassifierBackend::Auto => ClassifierBackend::Lexicon,
            other => other,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub top_n: usize,
    pub show_progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            top_n: 5,
            show_progress: false,
        }
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            top_n: config.top_n,
            show_progress: true,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: FromStr>(key: &str) -> Result<Option<T>> {
    match non_empty_var(key) {
        Some(v) => v
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Error::Config(format!("{} has an invalid value: {}", key, v))),
        None => Ok(None),
    }
}

/// Comma-separated keyword list, blanks dropped.
pub fn split_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_keywords() {
        assert_eq!(
            split_keywords(" precio, ,Comprar ,link"),
            vec!["precio", "Comprar", "link"]
        );
        assert!(split_keywords(" , ").is_empty());
    }

    #[test]
    fn test_backend_parsing() {
        assert_eq!("HF".parse::<ClassifierBackend>().unwrap(), ClassifierBackend::HuggingFace);
        assert_eq!("lexicon".parse::<ClassifierBackend>().unwrap(), ClassifierBackend::Lexicon);
        assert!("bert".parse::<ClassifierBackend>().is_err());
    }

    #[test]
    fn test_effective_backend() {
        let mut config = Config {
            youtube_api_key: None,
            hf_api_token: None,
            classifier_backend: ClassifierBackend::Auto,
            sentiment_model: DEFAULT_SENTIMENT_MODEL.to_string(),
            toxicity_model: DEFAULT_TOXICITY_MODEL.to_string(),
            enable_toxicity: false,
            toxicity_threshold: 0.5,
            lead_keywords: None,
            question_keywords: None,
            top_n: 5,
        };
        assert_eq!(config.effective_backend(), ClassifierBackend::Lexicon);
        config.hf_api_token = Some("hf_x".to_string());
        assert_eq!(config.effective_backend(), ClassifierBackend::HuggingFace);
        config.classifier_backend = ClassifierBackend::Lexicon;
        assert_eq!(config.effective_backend(), ClassifierBackend::Lexicon);
    }
}
