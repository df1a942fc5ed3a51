use crate::domain::Article;
use crate::errors::{NewsError, NewsResult};
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::HeadlineCache;

pub struct SqliteHeadlineCacheRepository {
    storage: SqliteStorage,
}

impl SqliteHeadlineCacheRepository {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }
}

impl HeadlineCache for SqliteHeadlineCacheRepository {
    fn replace_all(&self, articles: &[Article]) -> NewsResult<()> {
        let mut conn = self.storage.connection()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM cached_articles", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO cached_articles (position, source_name, author, title, description, url, image_url, published_at, content)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for (position, article) in articles.iter().enumerate() {
                stmt.execute((
                    position as i64,
                    &article.source_name,
                    &article.author,
                    &article.title,
                    &article.description,
                    &article.url,
                    &article.image_url,
                    &article.published_at,
                    &article.content,
                ))?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    fn read_all(&self) -> NewsResult<Vec<Article>> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare(
            "SELECT source_name, author, title, description, url, image_url, published_at, content
             FROM cached_articles ORDER BY position",
        )?;

        let articles = stmt.query_map([], |row| {
            Ok(Article {
                source_name: row.get(0)?,
                author: row.get(1)?,
                title: row.get(2)?,
                description: row.get(3)?,
                url: row.get(4)?,
                image_url: row.get(5)?,
                published_at: row.get(6)?,
                content: row.get(7)?,
            })
        })?;

        articles.collect::<Result<Vec<_>, _>>().map_err(NewsError::from)
    }
}
