use crate::error::{Error, Result};
use crate::models::RawComment;
use crate::youtube::source::CommentSource;

/// The API caps `maxResults` for comment threads at 100.
pub const PAGE_SIZE: u32 = 100;
pub const MIN_COMMENTS: u32 = 1;
pub const MAX_COMMENTS: u32 = 5000;
/// Consecutive empty pages tolerated while a continuation token is still
/// offered (the API returns these while comments are held for review).
pub const MAX_EMPTY_PAGES: u32 = 5;

/// What a collection run produced.
#[derive(Debug, Clone)]
pub enum Collection {
    /// Exactly the requested number of comments.
    Complete(Vec<RawComment>),
    /// The video ran out of comments before the target was reached.
    Partial {
        comments: Vec<RawComment>,
        requested: u32,
    },
}

impl Collection {
    pub fn comments(&self) -> &[RawComment] {
        match self {
            Collection::Complete(comments) => comments,
            Collection::Partial { comments, .. } => comments,
        }
    }

    pub fn into_comments(self) -> Vec<RawComment> {
        match self {
            Collection::Complete(comments) => comments,
            Collection::Partial { comments, .. } => comments,
        }
    }

    pub fn is_partial(&self) -> bool {
        matches!(self, Collection::Partial { .. })
    }

    pub fn len(&self) -> usize {
        self.comments().len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments().is_empty()
    }
}

pub struct CommentCollector<'a> {
    source: &'a dyn CommentSource,
}

impl<'a> CommentCollector<'a> {
    pub fn new(source: &'a dyn CommentSource) -> Self {
        Self { source }
    }

    /// Follows continuation tokens until `target` comments are collected or the
    /// source has no more pages.
    pub async fn collect(&self, video_id: &str, target: u32) -> Result<Collection> {
        if !(MIN_COMMENTS..=MAX_COMMENTS).contains(&target) {
            return Err(Error::Input(format!(
                "comment count must be between {} and {}, got {}",
                MIN_COMMENTS, MAX_COMMENTS, target
            )));
        }

        let target = target as usize;
        let mut all_comments = Vec::with_capacity(target);
        let mut page_token: Option<String> = None;
        let mut pages = 0u32;
        let mut empty_pages = 0u32;

        loop {
            let remaining = target - all_comments.len();
            let per_page = (remaining as u32).min(PAGE_SIZE);

            let page = self
                .source
                .fetch_page(video_id, page_token.as_deref(), per_page)
                .await?;
            pages += 1;

            let page_count = page.comments.len();
            all_comments.extend(page.comments);
            tracing::debug!(
                "Page {} from {}: {} comments ({} total)",
                pages,
                self.source.name(),
                page_count,
                all_comments.len()
            );

            if all_comments.len() >= target {
                break;
            }

            let token = match page.next_page_token {
                Some(token) if page_token.as_deref() != Some(token.as_str()) => token,
                _ => break,
            };

            if page_count == 0 {
                empty_pages += 1;
                if empty_pages >= MAX_EMPTY_PAGES {
                    tracing::warn!(
                        "Stopping after {} consecutive empty pages for {}",
                        empty_pages,
                        video_id
                    );
                    break;
                }
            } else {
                empty_pages = 0;
            }
            page_token = Some(token);
        }

        all_comments.truncate(target);
        tracing::info!("Collected {} of {} requested comments", all_comments.len(), target);

        if all_comments.len() < target {
            Ok(Collection::Partial {
                comments: all_comments,
                requested: target as u32,
            })
        } else {
            Ok(Collection::Complete(all_comments))
        }
    }
}
