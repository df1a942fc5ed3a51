/// One news item. Built from a network response, the headline cache, or a
/// bookmark, and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub source_name: Option<String>,
    pub author: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub image_url: Option<String>,
    pub published_at: String,
    pub content: Option<String>,
}

impl Article {
    pub fn new(title: String, url: String, published_at: String) -> Self {
        Self {
            source_name: None,
            author: None,
            title,
            description: None,
            url,
            image_url: None,
            published_at,
            content: None,
        }
    }

    pub fn with_source_name(mut self, source_name: Option<String>) -> Self {
        self.source_name = source_name;
        self
    }

    pub fn with_author(mut self, author: Option<String>) -> Self {
        self.author = author;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_image_url(mut self, image_url: Option<String>) -> Self {
        self.image_url = image_url;
        self
    }

    pub fn with_content(mut self, content: Option<String>) -> Self {
        self.content = content;
        self
    }

    pub fn key(&self) -> ArticleKey {
        ArticleKey::of(self)
    }

    /// Case-insensitive substring match against the title only.
    pub fn title_contains(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Identity of an article: url first, title as the fallback.
///
/// Bookmarks lose their url when stored, so two keys are the same item when
/// either the urls or the titles are equal. Empty urls compare equal to each
/// other, which makes every bookmark-reconstructed article match every other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArticleKey {
    url: String,
    title: String,
}

impl ArticleKey {
    pub fn of(article: &Article) -> Self {
        Self {
            url: article.url.clone(),
            title: article.title.clone(),
        }
    }

    pub fn matches(&self, other: &ArticleKey) -> bool {
        self.url == other.url || self.title == other.title
    }
}
