pub mod article_repository;
pub mod news_view_model;
pub mod view_actor;

pub use article_repository::{ArticleRepository, NewsRepository};
pub use news_view_model::{NewsViewModel, Subscriber};
pub use view_actor::{Completion, ViewActor, ViewHandle};
