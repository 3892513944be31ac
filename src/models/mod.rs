pub mod comment;
pub mod summary;

pub use comment::*;
pub use summary::*;
