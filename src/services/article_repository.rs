use tracing::{debug, error, warn};

use crate::domain::{Article, BookmarkRecord};
use crate::errors::NewsResult;
use crate::sources::{HeadlineQuery, HeadlineSource};
use crate::storage::traits::{BookmarkStore, HeadlineCache};

/// Fetch and bookmark contract shared by the view state and its tests.
#[cfg_attr(test, mockall::automock)]
pub trait NewsRepository: Send + Sync {
    /// Fetch fresh headlines and replace the cache with them. Failures are
    /// returned untouched; falling back to the cache is the caller's call.
    fn fetch_top_headlines(&self) -> NewsResult<Vec<Article>>;

    fn cached_headlines(&self) -> Vec<Article>;

    /// Bookmarks rebuilt as (lossy) articles.
    fn bookmarks(&self) -> Vec<Article>;

    fn toggle_bookmark(&self, article: &Article);

    fn is_bookmarked(&self, article: &Article) -> bool;
}

pub struct ArticleRepository<S: HeadlineSource, C: HeadlineCache, B: BookmarkStore> {
    source: S,
    cache: C,
    bookmarks: B,
    query: HeadlineQuery,
}

impl<S: HeadlineSource, C: HeadlineCache, B: BookmarkStore> ArticleRepository<S, C, B> {
    pub fn new(source: S, cache: C, bookmarks: B, query: HeadlineQuery) -> Self {
        Self {
            source,
            cache,
            bookmarks,
            query,
        }
    }

    pub fn query(&self) -> &HeadlineQuery {
        &self.query
    }
}

impl<S: HeadlineSource, C: HeadlineCache, B: BookmarkStore> NewsRepository
    for ArticleRepository<S, C, B>
{
    fn fetch_top_headlines(&self) -> NewsResult<Vec<Article>> {
        let response = self.source.top_headlines(&self.query)?;
        debug!(
            count = response.articles.len(),
            total = response.total_results,
            "fetched top headlines"
        );

        if let Err(e) = self.cache.replace_all(&response.articles) {
            warn!(error = %e, "failed to update headline cache");
        }

        Ok(response.articles)
    }

    fn cached_headlines(&self) -> Vec<Article> {
        match self.cache.read_all() {
            Ok(articles) => articles,
            Err(e) => {
                error!(error = %e, "failed to read headline cache");
                Vec::new()
            }
        }
    }

    fn bookmarks(&self) -> Vec<Article> {
        match self.bookmarks.read_all() {
            Ok(records) => records
                .iter()
                .map(|r| r.to_bookmarked_article().into_article())
                .collect(),
            Err(e) => {
                error!(error = %e, "failed to read bookmarks");
                Vec::new()
            }
        }
    }

    fn toggle_bookmark(&self, article: &Article) {
        if self.is_bookmarked(article) {
            // Every record sharing the title goes, not just one.
            match self.bookmarks.delete_by_title(&article.title) {
                Ok(deleted) => debug!(title = %article.title, deleted, "removed bookmark"),
                Err(e) => error!(title = %article.title, error = %e, "failed to remove bookmark"),
            }
        } else {
            let record = BookmarkRecord::from_article(article);
            match self.bookmarks.insert(&record) {
                Ok(()) => debug!(title = %article.title, id = %record.id, "saved bookmark"),
                Err(e) => error!(title = %article.title, error = %e, "failed to save bookmark"),
            }
        }
    }

    fn is_bookmarked(&self, article: &Article) -> bool {
        let key = article.key();
        self.bookmarks().iter().any(|b| b.key().matches(&key))
    }
}
