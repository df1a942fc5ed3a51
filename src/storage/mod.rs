pub mod traits;
pub mod sqlite;

pub use traits::{BookmarkStore, HeadlineCache};
pub use sqlite::{SqliteBookmarkRepository, SqliteHeadlineCacheRepository, SqliteStorage};
