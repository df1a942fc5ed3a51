use std::time::Duration;

use crate::errors::{NewsError, NewsResult};
use crate::sources::HeadlineQuery;

pub const DEFAULT_API_URL: &str = "https://newsapi.org/v2/top-headlines";
pub const DEFAULT_COUNTRY: &str = "us";
pub const DEFAULT_CATEGORY: &str = "business";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub api_key: String,
    pub query: HeadlineQuery,
    /// `None` leaves requests unbounded.
    pub http_timeout: Option<Duration>,
    pub db_path: String,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    fn load_dotenv() {
        // Try to load .env from executable's directory first
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();
    }

    /// Full configuration, including the API key needed for headline fetches.
    pub fn from_env() -> NewsResult<Self> {
        let mut config = Self::storage_only()?;

        config.api_key = std::env::var("NEWS_API_KEY")
            .map_err(|_| NewsError::MissingEnvVar("NEWS_API_KEY".to_string()))?;

        Ok(config)
    }

    /// Configuration for commands that only touch local storage. The API key
    /// is left empty.
    pub fn storage_only() -> NewsResult<Self> {
        Self::load_dotenv();

        let api_url = std::env::var("NEWS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let country = std::env::var("NEWS_COUNTRY").unwrap_or_else(|_| DEFAULT_COUNTRY.to_string());
        let category =
            std::env::var("NEWS_CATEGORY").unwrap_or_else(|_| DEFAULT_CATEGORY.to_string());

        let page_size = optional_positive("NEWS_PAGE_SIZE")?
            .map(|n| {
                u32::try_from(n).map_err(|_| {
                    NewsError::Config(format!("NEWS_PAGE_SIZE is too large, got {}", n))
                })
            })
            .transpose()?;
        let http_timeout = optional_positive("NEWS_HTTP_TIMEOUT_SECS")?.map(Duration::from_secs);

        // Default db_path is relative to executable directory
        let db_path = std::env::var("HEADLINES_DB_PATH").unwrap_or_else(|_| {
            Self::exe_dir()
                .map(|d| d.join("headlines.db").to_string_lossy().into_owned())
                .unwrap_or_else(|| "./headlines.db".to_string())
        });

        Ok(Self {
            api_url,
            api_key: String::new(),
            query: HeadlineQuery {
                country,
                category,
                page_size,
            },
            http_timeout,
            db_path,
        })
    }
}

fn optional_positive(name: &str) -> NewsResult<Option<u64>> {
    parse_positive(name, std::env::var(name).ok().as_deref())
}

/// Unset or blank means `None`. Zero is rejected: a zero timeout or page
/// size is never what the user meant.
fn parse_positive(name: &str, raw: Option<&str>) -> NewsResult<Option<u64>> {
    let raw = match raw.map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(None),
    };

    match raw.parse::<u64>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => Err(NewsError::Config(format!(
            "{} must be a positive number, got '{}'",
            name, raw
        ))),
    }
}
