pub mod traits;
pub mod news_api;

pub use traits::{HeadlineQuery, HeadlineSource, NewsResponse};
pub use news_api::NewsApiSource;
