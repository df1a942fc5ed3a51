use std::fmt::Write;

use crate::domain::{Article, DisplayMode};
use crate::services::{NewsRepository, NewsViewModel};

/// Body line for a row: the byline and/or description.
pub fn summary(article: &Article) -> String {
    let description = article.description.as_deref().filter(|d| !d.is_empty());

    match article.author.as_deref().filter(|a| !a.is_empty()) {
        Some(author) => match description {
            Some(desc) => format!("By {}\n{}", author, desc),
            None => format!("By {}", author),
        },
        None => article
            .description
            .clone()
            .unwrap_or_else(|| "No description available".to_string()),
    }
}

pub fn format_row(position: usize, article: &Article, bookmarked: bool) -> String {
    let marker = if bookmarked { "[*]" } else { "[ ]" };
    let mut row = format!("{:>3}. {} {}\n", position, marker, article.title);

    for line in summary(article).lines() {
        row.push_str("       ");
        row.push_str(line);
        row.push('\n');
    }

    let mut meta = Vec::new();
    if let Some(source) = article.source_name.as_deref() {
        meta.push(source);
    }
    if !article.published_at.is_empty() {
        meta.push(article.published_at.as_str());
    }
    if !article.url.is_empty() {
        meta.push(article.url.as_str());
    }
    if !meta.is_empty() {
        row.push_str("       ");
        row.push_str(&meta.join(" | "));
        row.push('\n');
    }

    row
}

/// Render the displayed list, asking the view model about each row's
/// bookmark status as it goes.
pub fn render<R: NewsRepository>(vm: &NewsViewModel<R>) -> String {
    let articles = vm.displayed_articles();

    if articles.is_empty() {
        let filter = vm.filter_text().trim();
        return if !filter.is_empty() {
            format!("No articles match '{}'.\n", filter)
        } else {
            match vm.mode() {
                DisplayMode::All => "No headlines cached.\n".to_string(),
                DisplayMode::Bookmarked => "No bookmarks.\n".to_string(),
            }
        };
    }

    let mut out = String::new();
    for (i, article) in articles.iter().enumerate() {
        let row = format_row(i + 1, article, vm.is_bookmarked(article));
        let _ = writeln!(out, "{}", row.trim_end());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::article_repository::MockNewsRepository;
    use std::sync::Arc;

    fn article(title: &str) -> Article {
        Article::new(
            title.to_string(),
            "https://example.com/a".to_string(),
            "2024-09-10T10:00:00Z".to_string(),
        )
    }

    #[test]
    fn test_summary_author_and_description() {
        let a = article("T")
            .with_author(Some("Jane".to_string()))
            .with_description(Some("Stocks climbed.".to_string()));
        assert_eq!(summary(&a), "By Jane\nStocks climbed.");
    }

    #[test]
    fn test_summary_author_only() {
        let a = article("T")
            .with_author(Some("Jane".to_string()))
            .with_description(Some(String::new()));
        assert_eq!(summary(&a), "By Jane");
    }

    #[test]
    fn test_summary_without_author() {
        let a = article("T").with_description(Some("Stocks climbed.".to_string()));
        assert_eq!(summary(&a), "Stocks climbed.");
        assert_eq!(summary(&article("T")), "No description available");
    }

    #[test]
    fn test_format_row() {
        let a = article("Markets rally")
            .with_source_name(Some("Reuters".to_string()))
            .with_description(Some("Stocks climbed.".to_string()));

        let row = format_row(2, &a, true);

        assert_eq!(
            row,
            "  2. [*] Markets rally\n       Stocks climbed.\n       Reuters | 2024-09-10T10:00:00Z | https://example.com/a\n"
        );
    }

    #[test]
    fn test_render_marks_bookmarked_rows() {
        let mut repo = MockNewsRepository::new();
        repo.expect_cached_headlines()
            .returning(|| vec![article("First"), article("Second")]);
        repo.expect_is_bookmarked()
            .returning(|a: &Article| a.title == "Second");
        let mut vm = NewsViewModel::new(Arc::new(repo));
        vm.load_cached_headlines();

        let out = render(&vm);

        assert!(out.contains("  1. [ ] First"));
        assert!(out.contains("  2. [*] Second"));
    }

    #[test]
    fn test_render_empty_states() {
        let mut repo = MockNewsRepository::new();
        repo.expect_cached_headlines().returning(Vec::new);
        let mut vm = NewsViewModel::new(Arc::new(repo));
        vm.load_cached_headlines();
        assert_eq!(render(&vm), "No headlines cached.\n");

        vm.set_mode(DisplayMode::Bookmarked);
        assert_eq!(render(&vm), "No bookmarks.\n");

        vm.set_filter_text(" apple ");
        assert_eq!(render(&vm), "No articles match 'apple'.\n");
    }
}
