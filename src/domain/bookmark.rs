use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::Article;

/// Source name given to every article rebuilt from a bookmark.
pub const BOOKMARKED_SOURCE: &str = "Bookmarked";

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Persisted form of a bookmark. Only the fields below survive storage.
#[derive(Debug, Clone, PartialEq)]
pub struct BookmarkRecord {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub bookmarked: bool,
}

impl BookmarkRecord {
    /// Unparseable timestamps are replaced with the current time.
    pub fn from_article(article: &Article) -> Self {
        let published_at = DateTime::parse_from_rfc3339(&article.published_at)
            .map(|d| d.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        Self {
            id: Uuid::new_v4(),
            title: article.title.clone(),
            description: article.description.clone(),
            image_url: article.image_url.clone(),
            published_at,
            bookmarked: true,
        }
    }

    pub fn to_bookmarked_article(&self) -> BookmarkedArticle {
        BookmarkedArticle {
            title: self.title.clone(),
            description: self.description.clone(),
            image_url: self.image_url.clone(),
            published_at: self.published_at.format(DATE_FORMAT).to_string(),
        }
    }
}

/// The partial article recoverable from a bookmark record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkedArticle {
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub published_at: String,
}

impl BookmarkedArticle {
    /// Lossy: url, author, source and content are not stored with a
    /// bookmark. The result has an empty url, [`BOOKMARKED_SOURCE`] as its
    /// source name, and no author or content.
    pub fn into_article(self) -> Article {
        Article::new(self.title, String::new(), self.published_at)
            .with_source_name(Some(BOOKMARKED_SOURCE.to_string()))
            .with_description(self.description)
            .with_image_url(self.image_url)
    }
}
