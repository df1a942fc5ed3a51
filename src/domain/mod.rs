pub mod article;
pub mod bookmark;
pub mod mode;

pub use article::{Article, ArticleKey};
pub use bookmark::{BookmarkRecord, BookmarkedArticle, BOOKMARKED_SOURCE};
pub use mode::DisplayMode;
