use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{Article, DisplayMode};
use crate::errors::NewsResult;
use crate::services::article_repository::NewsRepository;

/// Change listener. Runs after every mutating call with the updated state.
pub type Subscriber<R> = Box<dyn FnMut(&NewsViewModel<R>) + Send>;

/// Per-screen view state over a [`NewsRepository`].
///
/// The displayed list is never stored; it is derived from the mode, the
/// filter text and the two article lists on each read.
pub struct NewsViewModel<R: NewsRepository> {
    repository: Arc<R>,
    mode: DisplayMode,
    filter_text: String,
    all_articles: Vec<Article>,
    bookmarked_articles: Vec<Article>,
    on_change: Option<Subscriber<R>>,
}

impl<R: NewsRepository> NewsViewModel<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            mode: DisplayMode::default(),
            filter_text: String::new(),
            all_articles: Vec::new(),
            bookmarked_articles: Vec::new(),
            on_change: None,
        }
    }

    /// Install the single subscriber, replacing any previous one.
    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: FnMut(&NewsViewModel<R>) + Send + 'static,
    {
        self.on_change = Some(Box::new(subscriber));
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    pub fn all_articles(&self) -> &[Article] {
        &self.all_articles
    }

    pub fn bookmarked_articles(&self) -> &[Article] {
        &self.bookmarked_articles
    }

    /// Active list for the current mode, narrowed to titles containing the
    /// trimmed filter text (case-insensitive).
    pub fn displayed_articles(&self) -> Vec<&Article> {
        let base = match self.mode {
            DisplayMode::All => &self.all_articles,
            DisplayMode::Bookmarked => &self.bookmarked_articles,
        };

        let needle = self.filter_text.trim();
        if needle.is_empty() {
            return base.iter().collect();
        }

        base.iter().filter(|a| a.title_contains(needle)).collect()
    }

    /// Asks the repository every time; nothing is cached per row.
    pub fn is_bookmarked(&self, article: &Article) -> bool {
        self.repository.is_bookmarked(article)
    }

    pub fn set_mode(&mut self, mode: DisplayMode) {
        debug!(mode = %mode, "display mode changed");
        self.mode = mode;
        self.notify();
    }

    pub fn set_filter_text(&mut self, text: impl Into<String>) {
        self.filter_text = text.into();
        self.notify();
    }

    pub fn load_bookmarks(&mut self) {
        let bookmarks = self.repository.bookmarks();
        self.apply_bookmarks(bookmarks);
    }

    /// Show the cached headlines without touching the network.
    pub fn load_cached_headlines(&mut self) {
        self.all_articles = self.repository.cached_headlines();
        self.notify();
    }

    /// Fetch fresh headlines. On failure the cached headlines are shown
    /// instead and the error is handed back after subscribers have run.
    pub fn fetch_news(&mut self) -> NewsResult<()> {
        let result = self.repository.fetch_top_headlines();
        self.apply_fetch(result)
    }

    pub fn refresh(&mut self) -> NewsResult<()> {
        self.fetch_news()
    }

    pub fn toggle_bookmark_for(&mut self, article: &Article) {
        self.repository.toggle_bookmark(article);
        self.load_bookmarks();
    }

    pub(crate) fn apply_fetch(&mut self, result: NewsResult<Vec<Article>>) -> NewsResult<()> {
        match result {
            Ok(articles) => {
                debug!(count = articles.len(), "showing fresh headlines");
                self.all_articles = articles;
                self.notify();
                Ok(())
            }
            Err(e) => {
                self.all_articles = self.repository.cached_headlines();
                warn!(error = %e, cached = self.all_articles.len(), "fetch failed, showing cached headlines");
                self.notify();
                Err(e)
            }
        }
    }

    pub(crate) fn apply_bookmarks(&mut self, bookmarks: Vec<Article>) {
        self.bookmarked_articles = bookmarks;
        self.notify();
    }

    fn notify(&mut self) {
        if let Some(mut subscriber) = self.on_change.take() {
            subscriber(self);
            // A subscriber cannot replace itself, so putting it back is safe.
            self.on_change = Some(subscriber);
        }
    }
}
