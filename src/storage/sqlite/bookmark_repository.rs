use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use uuid::Uuid;

use crate::domain::BookmarkRecord;
use crate::errors::{NewsError, NewsResult};
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::BookmarkStore;

pub struct SqliteBookmarkRepository {
    storage: SqliteStorage,
}

impl SqliteBookmarkRepository {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }
}

fn conversion_error<E>(column: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(err))
}

impl BookmarkStore for SqliteBookmarkRepository {
    fn insert(&self, record: &BookmarkRecord) -> NewsResult<()> {
        let conn = self.storage.connection()?;
        conn.execute(
            "INSERT INTO bookmarks (id, title, description, image_url, published_at, bookmarked) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            (
                record.id.to_string(),
                &record.title,
                &record.description,
                &record.image_url,
                record.published_at.to_rfc3339(),
                record.bookmarked,
            ),
        )?;
        Ok(())
    }

    fn delete_by_title(&self, title: &str) -> NewsResult<usize> {
        let conn = self.storage.connection()?;
        let deleted = conn.execute("DELETE FROM bookmarks WHERE title = ?1", [title])?;
        Ok(deleted)
    }

    fn read_all(&self) -> NewsResult<Vec<BookmarkRecord>> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare(
            "SELECT id, title, description, image_url, published_at, bookmarked FROM bookmarks WHERE bookmarked = 1 ORDER BY rowid",
        )?;

        let records = stmt.query_map([], |row| {
            let id: String = row.get(0)?;
            let published_at: String = row.get(4)?;

            Ok(BookmarkRecord {
                id: Uuid::parse_str(&id).map_err(|e| conversion_error(0, e))?,
                title: row.get(1)?,
                description: row.get(2)?,
                image_url: row.get(3)?,
                published_at: DateTime::parse_from_rfc3339(&published_at)
                    .map(|d| d.with_timezone(&Utc))
                    .map_err(|e| conversion_error(4, e))?,
                bookmarked: row.get(5)?,
            })
        })?;

        records.collect::<Result<Vec<_>, _>>().map_err(NewsError::from)
    }
}
