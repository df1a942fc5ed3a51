use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::domain::Article;
use crate::errors::{NewsError, NewsResult};
use crate::sources::traits::{HeadlineQuery, HeadlineSource, NewsResponse};

#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    code: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireResponse {
    status: String,
    total_results: u64,
    articles: Vec<WireArticle>,
}

#[derive(Debug, Deserialize)]
struct WireSource {
    #[allow(dead_code)]
    id: Option<String>,
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireArticle {
    source: Option<WireSource>,
    author: Option<String>,
    title: String,
    description: Option<String>,
    url: String,
    url_to_image: Option<String>,
    published_at: String,
    content: Option<String>,
}

impl From<WireArticle> for Article {
    fn from(wire: WireArticle) -> Self {
        Article::new(wire.title, wire.url, wire.published_at)
            .with_source_name(wire.source.map(|s| s.name))
            .with_author(wire.author)
            .with_description(wire.description)
            .with_image_url(wire.url_to_image)
            .with_content(wire.content)
    }
}

/// Top-headlines client for newsapi.org style endpoints.
pub struct NewsApiSource {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl NewsApiSource {
    /// Without a timeout a hung connection blocks the fetch indefinitely.
    pub fn new(endpoint: &str, api_key: &str, timeout: Option<Duration>) -> NewsResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn build_url(&self, query: &HeadlineQuery) -> NewsResult<Url> {
        let mut url =
            Url::parse(&self.endpoint).map_err(|e| NewsError::InvalidUrl(e.to_string()))?;

        {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query.params() {
                pairs.append_pair(name, &value);
            }
            pairs.append_pair("apiKey", &self.api_key);
        }

        Ok(url)
    }

    /// Decode a response body. An error envelope wins over a shape mismatch.
    fn decode(bytes: &[u8]) -> NewsResult<NewsResponse> {
        if let Ok(envelope) = serde_json::from_slice::<Envelope>(bytes) {
            if envelope.status == "error" {
                return Err(NewsError::Api {
                    code: envelope.code.unwrap_or_else(|| "unknown".to_string()),
                    message: envelope.message.unwrap_or_default(),
                });
            }
        }

        let wire: WireResponse = serde_json::from_slice(bytes)?;

        Ok(NewsResponse {
            status: wire.status,
            total_results: wire.total_results,
            articles: wire.articles.into_iter().map(Article::from).collect(),
        })
    }
}

impl HeadlineSource for NewsApiSource {
    fn top_headlines(&self, query: &HeadlineQuery) -> NewsResult<NewsResponse> {
        let url = self.build_url(query)?;
        debug!(country = %query.country, category = %query.category, "requesting top headlines");

        let response = self.client.get(url).send()?;
        let status_error = response.error_for_status_ref().err();
        let bytes = response.bytes()?;

        match Self::decode(&bytes) {
            Ok(decoded) => Ok(decoded),
            // API errors carry their own message, keep them.
            Err(e @ NewsError::Api { .. }) => Err(e),
            Err(e) => match status_error {
                Some(http) => Err(NewsError::Transport(http)),
                None => Err(e),
            },
        }
    }
}
