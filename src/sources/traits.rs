use crate::domain::Article;
use crate::errors::NewsResult;

/// Parameters of a top-headlines request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlineQuery {
    pub country: String,
    pub category: String,
    pub page_size: Option<u32>,
}

impl HeadlineQuery {
    pub fn new(country: &str, category: &str) -> Self {
        Self {
            country: country.to_string(),
            category: category.to_string(),
            page_size: None,
        }
    }

    /// Query pairs in request order, without credentials.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("country", self.country.clone()),
            ("category", self.category.clone()),
        ];
        if let Some(size) = self.page_size {
            params.push(("pageSize", size.to_string()));
        }
        params
    }
}

/// Decoded top-headlines page.
#[derive(Debug, Clone)]
pub struct NewsResponse {
    pub status: String,
    pub total_results: u64,
    pub articles: Vec<Article>,
}

#[cfg_attr(test, mockall::automock)]
pub trait HeadlineSource: Send + Sync {
    /// Fetch one page of current headlines
    fn top_headlines(&self, query: &HeadlineQuery) -> NewsResult<NewsResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_without_page_size() {
        let query = HeadlineQuery::new("us", "business");
        assert_eq!(
            query.params(),
            vec![
                ("country", "us".to_string()),
                ("category", "business".to_string())
            ]
        );
    }

    #[test]
    fn test_params_with_page_size() {
        let query = HeadlineQuery {
            page_size: Some(50),
            ..HeadlineQuery::new("gb", "technology")
        };
        assert_eq!(query.params().last(), Some(&("pageSize", "50".to_string())));
    }
}
