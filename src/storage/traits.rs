use crate::domain::{Article, BookmarkRecord};
use crate::errors::NewsResult;

/// Holds the most recent successful headline fetch.
#[cfg_attr(test, mockall::automock)]
pub trait HeadlineCache: Send + Sync {
    /// Replace the whole cache in one atomic write.
    fn replace_all(&self, articles: &[Article]) -> NewsResult<()>;
    fn read_all(&self) -> NewsResult<Vec<Article>>;
}

#[cfg_attr(test, mockall::automock)]
pub trait BookmarkStore: Send + Sync {
    fn insert(&self, record: &BookmarkRecord) -> NewsResult<()>;
    /// Delete every record with this exact title, returning how many went.
    fn delete_by_title(&self, title: &str) -> NewsResult<usize>;
    fn read_all(&self) -> NewsResult<Vec<BookmarkRecord>>;
}
