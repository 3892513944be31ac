use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::classifier::parser::parse_label_scores;
use crate::classifier::provider::{LabelScore, TextClassifier};
use crate::error::{Error, Result};

const INFERENCE_URL: &str = "https://router.huggingface.co/hf-inference/models";

/// A model served by the Hugging Face Inference API.
pub struct HuggingFaceClassifier {
    client: Client,
    api_token: String,
    model: String,
    endpoint: String,
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    options: InferenceOptions,
}

#[derive(Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

impl HuggingFaceClassifier {
    pub fn new(api_token: String, model: String) -> Result<Self> {
        if api_token.trim().is_empty() {
            return Err(Error::Config("HF_API_TOKEN is required for the huggingface backend".to_string()));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()?;

        Ok(Self {
            client,
            api_token,
            endpoint: format!("{}/{}", INFERENCE_URL, model),
            model,
        })
    }
}

#[async_trait]
impl TextClassifier for HuggingFaceClassifier {
    async fn classify(&self, text: &str) -> Result<Vec<LabelScore>> {
        tracing::debug!("Sending {} chars to {}", text.len(), self.model);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_token)
            .json(&InferenceRequest {
                inputs: text,
                options: InferenceOptions {
                    wait_for_model: true,
                },
            })
            .send()
            .await
            .map_err(|e| Error::Classifier(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(Error::Classifier(format!(
                "{} returned {}: {}",
                self.model, status, body
            )));
        }

        let scores = parse_label_scores(&body)?;
        if scores.is_empty() {
            return Err(Error::Classifier(format!("Empty response from {}", self.model)));
        }

        Ok(scores)
    }

    fn name(&self) -> &str {
        &self.model
    }
}
