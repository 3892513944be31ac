use async_trait::async_trait;
use crate::error::Result;
use crate::models::RawComment;

/// One page of comment threads plus the token for the next one.
#[derive(Debug, Clone, Default)]
pub struct CommentPage {
    pub comments: Vec<RawComment>,
    pub next_page_token: Option<String>,
}

#[async_trait]
pub trait CommentSource: Send + Sync {
    async fn fetch_page(
        &self,
        video_id: &str,
        page_token: Option<&str>,
        max_results: u32,
    ) -> Result<CommentPage>;

    fn name(&self) -> &str;
}
