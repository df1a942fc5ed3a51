use std::sync::Arc;

use clap::Parser;

use headlines::cli::logging::init_logging;
use headlines::cli::render::render;
use headlines::cli::{Cli, Commands};
use headlines::config::Config;
use headlines::domain::DisplayMode;
use headlines::errors::{NewsError, NewsResult};
use headlines::services::{ArticleRepository, NewsViewModel};
use headlines::sources::NewsApiSource;
use headlines::storage::sqlite::{
    SqliteBookmarkRepository, SqliteHeadlineCacheRepository, SqliteStorage,
};

type Repository =
    ArticleRepository<NewsApiSource, SqliteHeadlineCacheRepository, SqliteBookmarkRepository>;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> NewsResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Fetch { filter } | Commands::Refresh { filter } => {
            cmd_fetch(&Config::from_env()?, filter)
        }
        Commands::Cached { filter } => cmd_list(&Config::storage_only()?, DisplayMode::All, filter),
        Commands::Bookmarks { filter } => {
            cmd_list(&Config::storage_only()?, DisplayMode::Bookmarked, filter)
        }
        Commands::Toggle {
            index,
            bookmarks,
            filter,
        } => {
            let mode = if bookmarks {
                DisplayMode::Bookmarked
            } else {
                DisplayMode::All
            };
            cmd_toggle(&Config::storage_only()?, index, mode, filter)
        }
    }
}

fn build_view_model(config: &Config) -> NewsResult<NewsViewModel<Repository>> {
    let storage = SqliteStorage::new(&config.db_path)?;
    let source = NewsApiSource::new(&config.api_url, &config.api_key, config.http_timeout)?;

    let repository = ArticleRepository::new(
        source,
        SqliteHeadlineCacheRepository::new(storage.clone()),
        SqliteBookmarkRepository::new(storage),
        config.query.clone(),
    );

    Ok(NewsViewModel::new(Arc::new(repository)))
}

fn cmd_fetch(config: &Config, filter: Option<String>) -> NewsResult<()> {
    let mut vm = build_view_model(config)?;
    vm.set_filter_text(filter.unwrap_or_default());
    vm.load_bookmarks();

    println!(
        "Fetching {} headlines ({})...\n",
        config.query.category, config.query.country
    );

    if let Err(e) = vm.fetch_news() {
        println!("Could not fetch headlines: {}", e);
        println!("Showing cached headlines.\n");
    }

    print!("{}", render(&vm));
    Ok(())
}

fn cmd_list(config: &Config, mode: DisplayMode, filter: Option<String>) -> NewsResult<()> {
    let mut vm = build_view_model(config)?;
    vm.set_filter_text(filter.unwrap_or_default());
    vm.set_mode(mode);
    match mode {
        DisplayMode::All => vm.load_cached_headlines(),
        DisplayMode::Bookmarked => vm.load_bookmarks(),
    }

    print!("{}", render(&vm));
    Ok(())
}

fn cmd_toggle(
    config: &Config,
    index: usize,
    mode: DisplayMode,
    filter: Option<String>,
) -> NewsResult<()> {
    let mut vm = build_view_model(config)?;
    vm.set_filter_text(filter.unwrap_or_default());
    vm.set_mode(mode);
    vm.load_cached_headlines();
    vm.load_bookmarks();

    let article = {
        let displayed = vm.displayed_articles();
        if index == 0 || index > displayed.len() {
            return Err(NewsError::InvalidInput(format!(
                "Number out of range: {} articles listed",
                displayed.len()
            )));
        }
        displayed[index - 1].clone()
    };

    let was_bookmarked = vm.is_bookmarked(&article);
    vm.toggle_bookmark_for(&article);

    if was_bookmarked {
        println!("Removed bookmark: {}", article.title);
    } else {
        println!("Bookmarked: {}", article.title);
    }

    Ok(())
}
