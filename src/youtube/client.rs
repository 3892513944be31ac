use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::RawComment;
use crate::youtube::source::{CommentPage, CommentSource};

const BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentThreadListResponse {
    #[serde(default)]
    items: Vec<CommentThread>,
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
struct CommentThread {
    snippet: CommentThreadSnippet,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentThreadSnippet {
    top_level_comment: TopLevelComment,
    #[serde(default)]
    total_reply_count: u64,
}

#[derive(Deserialize)]
struct TopLevelComment {
    snippet: CommentSnippet,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentSnippet {
    #[serde(default)]
    author_display_name: String,
    #[serde(default)]
    text_display: String,
    #[serde(default)]
    like_count: u64,
    published_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    reason: String,
}

impl YouTubeClient {
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_base_url(api_key, BASE_URL)
    }

    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(Error::Input("a YouTube API key is required".to_string()));
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("commentpulse/0.1"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl CommentSource for YouTubeClient {
    async fn fetch_page(
        &self,
        video_id: &str,
        page_token: Option<&str>,
        max_results: u32,
    ) -> Result<CommentPage> {
        let url = format!("{}/commentThreads", self.base_url);
        let max_results = max_results.to_string();

        let mut query = vec![
            ("part", "snippet"),
            ("videoId", video_id),
            ("maxResults", max_results.as_str()),
            ("textFormat", "html"),
            ("key", self.api_key.as_str()),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        tracing::debug!("Fetching comment page for {} (token: {:?})", video_id, page_token);
        let response = self.client.get(&url).query(&query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_api_error(status, &body, video_id));
        }

        let page: CommentThreadListResponse = response
            .json()
            .await
            .map_err(|e| Error::ParseError(format!("Failed to parse comment threads: {}", e)))?;

        let comments = page
            .items
            .into_iter()
            .map(|thread| {
                let snippet = thread.snippet.top_level_comment.snippet;
                RawComment {
                    author: snippet.author_display_name,
                    text: snippet.text_display,
                    like_count: snippet.like_count,
                    reply_count: thread.snippet.total_reply_count,
                    published_at: snippet.published_at,
                }
            })
            .collect();

        Ok(CommentPage {
            comments,
            next_page_token: page.next_page_token.filter(|t| !t.is_empty()),
        })
    }

    fn name(&self) -> &str {
        "YouTube Data API v3"
    }
}

/// Maps a non-success API response onto the access / not-found taxonomy.
pub(crate) fn classify_api_error(status: StatusCode, body: &str, video_id: &str) -> Error {
    let parsed = serde_json::from_str::<ApiErrorEnvelope>(body).ok();
    let message = parsed
        .as_ref()
        .map(|e| e.error.message.clone())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| status.to_string());
    let reasons: Vec<&str> = parsed
        .as_ref()
        .map(|e| e.error.errors.iter().map(|d| d.reason.as_str()).collect())
        .unwrap_or_default();
    let has_reason = |wanted: &[&str]| reasons.iter().any(|r| wanted.contains(r));

    if has_reason(&["commentsDisabled"]) {
        return Error::NotFound(format!("comments are disabled for video {}", video_id));
    }

    if status == StatusCode::NOT_FOUND || has_reason(&["videoNotFound"]) {
        return Error::NotFound(format!("video {} does not exist", video_id));
    }

    let access_reasons = [
        "keyInvalid",
        "keyExpired",
        "forbidden",
        "quotaExceeded",
        "dailyLimitExceeded",
        "rateLimitExceeded",
        "accessNotConfigured",
        "ipRefererBlocked",
    ];
    if status == StatusCode::UNAUTHORIZED
        || status == StatusCode::FORBIDDEN
        || has_reason(&access_reasons)
        || message.contains("API key")
    {
        return Error::Access(message);
    }

    Error::YouTubeApi(format!("{} - {}", status, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error_body(code: u16, message: &str, reason: &str) -> String {
        serde_json::json!({
            "error": {
                "code": code,
                "message": message,
                "errors": [{ "message": message, "domain": "youtube", "reason": reason }]
            }
        })
        .to_string()
    }

    #[test]
    fn test_invalid_key_is_access_error() {
        let body = error_body(400, "API key not valid. Please pass a valid API key.", "badRequest");
        let err = classify_api_error(StatusCode::BAD_REQUEST, &body, "abc");
        assert!(matches!(err, Error::Access(_)));
    }

    #[test]
    fn test_quota_is_access_error() {
        let body = error_body(403, "quota exceeded", "quotaExceeded");
        assert!(matches!(
            classify_api_error(StatusCode::FORBIDDEN, &body, "abc"),
            Error::Access(_)
        ));
    }

    #[test]
    fn test_comments_disabled_is_not_found() {
        let body = error_body(403, "disabled comments", "commentsDisabled");
        assert!(matches!(
            classify_api_error(StatusCode::FORBIDDEN, &body, "abc"),
            Error::NotFound(_)
        ));
    }

    #[test]
    fn test_unknown_video_is_not_found() {
        let body = error_body(404, "video not found", "videoNotFound");
        assert!(matches!(
            classify_api_error(StatusCode::NOT_FOUND, &body, "abc"),
            Error::NotFound(_)
        ));
    }

    #[test]
    fn test_other_failures_keep_status() {
        let err = classify_api_error(StatusCode::INTERNAL_SERVER_ERROR, "oops", "abc");
        match err {
            Error::YouTubeApi(msg) => assert!(msg.contains("500")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_key_is_input_error() {
        assert!(matches!(YouTubeClient::new("  "), Err(Error::Input(_))));
    }

    #[test]
    fn test_parse_comment_threads() {
        let body = r#"{
            "nextPageToken": "QURTSl9p",
            "items": [{
                "snippet": {
                    "totalReplyCount": 2,
                    "topLevelComment": {
                        "snippet": {
                            "authorDisplayName": "@ana",
                            "textDisplay": "¿Precio?",
                            "likeCount": 7,
                            "publishedAt": "2024-03-01T10:00:00Z"
                        }
                    }
                }
            }]
        }"#;
        let page: CommentThreadListResponse = serde_json::from_str(body).unwrap();
        assert_eq!(page.next_page_token.as_deref(), Some("QURTSl9p"));
        let snippet = &page.items[0].snippet;
        assert_eq!(snippet.total_reply_count, 2);
        assert_eq!(snippet.top_level_comment.snippet.like_count, 7);
        assert_eq!(snippet.top_level_comment.snippet.author_display_name, "@ana");
    }
}
