mod connection;
mod headline_cache_repository;
mod bookmark_repository;

pub use connection::SqliteStorage;
pub use headline_cache_repository::SqliteHeadlineCacheRepository;
pub use bookmark_repository::SqliteBookmarkRepository;
