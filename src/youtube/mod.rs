pub mod client;
pub mod paginator;
pub mod source;
pub mod video_id;

pub use client::YouTubeClient;
pub use paginator::{Collection, CommentCollector, MAX_COMMENTS, MIN_COMMENTS, PAGE_SIZE};
pub use source::{CommentPage, CommentSource};
pub use video_id::extract_video_id;
