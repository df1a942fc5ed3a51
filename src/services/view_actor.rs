//! Single-owner execution context for a [`NewsViewModel`].
//!
//! The view model lives on one thread and is only touched there. Handles post
//! commands onto its queue; fetches run on worker threads and bookmark I/O on
//! a single bookmark worker, and both post their results back onto the same
//! queue, so every state change and every subscriber call happens on the
//! owner thread, in queue order.

use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use tracing::debug;

use crate::domain::{Article, DisplayMode};
use crate::errors::{NewsError, NewsResult};
use crate::services::article_repository::NewsRepository;
use crate::services::news_view_model::NewsViewModel;

/// Fires once the posted operation has been applied on the owner thread.
pub type Completion<T> = Receiver<T>;

enum Command {
    SetMode(DisplayMode),
    SetFilterText(String),
    LoadBookmarks(Sender<()>),
    ToggleBookmark(Article, Sender<()>),
    Fetch(Sender<NewsResult<()>>),
    FetchCompleted(NewsResult<Vec<Article>>, Sender<NewsResult<()>>),
    BookmarksLoaded(Vec<Article>, Sender<()>),
    Displayed(Sender<Vec<Article>>),
    Shutdown,
}

/// Bookmark I/O, run one job at a time so snapshots reach the owner in
/// write order.
enum BookmarkJob {
    Load(Sender<()>),
    Toggle(Article, Sender<()>),
}

pub struct ViewActor;

impl ViewActor {
    /// Move `view_model` onto its own thread and return a handle to it.
    pub fn spawn<R>(view_model: NewsViewModel<R>) -> NewsResult<ViewHandle>
    where
        R: NewsRepository + 'static,
    {
        let (tx, rx) = unbounded();
        let (jobs_tx, jobs_rx) = unbounded();

        let repository = Arc::clone(view_model.repository());
        let worker_tx = tx.clone();
        thread::Builder::new()
            .name("view-bookmarks".to_string())
            .spawn(move || run_bookmark_jobs(repository, jobs_rx, worker_tx))?;

        let loop_tx = tx.clone();
        let thread = thread::Builder::new()
            .name("view-state".to_string())
            .spawn(move || run(view_model, rx, loop_tx, jobs_tx))?;

        Ok(ViewHandle {
            inner: Arc::new(HandleInner {
                tx,
                thread: Mutex::new(Some(thread)),
            }),
        })
    }
}

/// Exits once the owner drops its job sender.
fn run_bookmark_jobs<R>(repository: Arc<R>, jobs: Receiver<BookmarkJob>, tx: Sender<Command>)
where
    R: NewsRepository + 'static,
{
    while let Ok(job) = jobs.recv() {
        let done = match job {
            BookmarkJob::Load(done) => done,
            BookmarkJob::Toggle(article, done) => {
                repository.toggle_bookmark(&article);
                done
            }
        };
        let bookmarks = repository.bookmarks();
        if tx.send(Command::BookmarksLoaded(bookmarks, done)).is_err() {
            break;
        }
    }
}

fn run<R>(
    mut vm: NewsViewModel<R>,
    rx: Receiver<Command>,
    tx: Sender<Command>,
    jobs: Sender<BookmarkJob>,
) where
    R: NewsRepository + 'static,
{
    while let Ok(command) = rx.recv() {
        match command {
            Command::SetMode(mode) => vm.set_mode(mode),
            Command::SetFilterText(text) => vm.set_filter_text(text),
            Command::LoadBookmarks(done) => {
                jobs.send(BookmarkJob::Load(done)).ok();
            }
            Command::ToggleBookmark(article, done) => {
                jobs.send(BookmarkJob::Toggle(article, done)).ok();
            }
            Command::Fetch(done) => {
                let repository = Arc::clone(vm.repository());
                let tx = tx.clone();
                thread::spawn(move || {
                    let result = repository.fetch_top_headlines();
                    tx.send(Command::FetchCompleted(result, done)).ok();
                });
            }
            // Completions apply in arrival order: the last one to land wins.
            Command::FetchCompleted(result, done) => {
                let outcome = vm.apply_fetch(result);
                done.send(outcome).ok();
            }
            Command::BookmarksLoaded(bookmarks, done) => {
                vm.apply_bookmarks(bookmarks);
                done.send(()).ok();
            }
            Command::Displayed(reply) => {
                let displayed = vm.displayed_articles().into_iter().cloned().collect();
                reply.send(displayed).ok();
            }
            Command::Shutdown => break,
        }
    }

    debug!("view state stopped");
}

struct HandleInner {
    tx: Sender<Command>,
    thread: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for HandleInner {
    fn drop(&mut self) {
        self.tx.send(Command::Shutdown).ok();
    }
}

/// Cloneable front door to a running [`ViewActor`].
#[derive(Clone)]
pub struct ViewHandle {
    inner: Arc<HandleInner>,
}

impl ViewHandle {
    fn post(&self, command: Command) -> NewsResult<()> {
        self.inner
            .tx
            .send(command)
            .map_err(|_| NewsError::ActorClosed)
    }

    pub fn set_mode(&self, mode: DisplayMode) -> NewsResult<()> {
        self.post(Command::SetMode(mode))
    }

    pub fn set_filter_text(&self, text: impl Into<String>) -> NewsResult<()> {
        self.post(Command::SetFilterText(text.into()))
    }

    pub fn load_bookmarks(&self) -> NewsResult<Completion<()>> {
        let (done, completion) = bounded(1);
        self.post(Command::LoadBookmarks(done))?;
        Ok(completion)
    }

    pub fn toggle_bookmark_for(&self, article: Article) -> NewsResult<Completion<()>> {
        let (done, completion) = bounded(1);
        self.post(Command::ToggleBookmark(article, done))?;
        Ok(completion)
    }

    /// The completion carries the fetch error, if any, after the cached
    /// fallback has been applied.
    pub fn fetch_news(&self) -> NewsResult<Completion<NewsResult<()>>> {
        let (done, completion) = bounded(1);
        self.post(Command::Fetch(done))?;
        Ok(completion)
    }

    pub fn refresh(&self) -> NewsResult<Completion<NewsResult<()>>> {
        self.fetch_news()
    }

    pub fn displayed_articles(&self) -> NewsResult<Vec<Article>> {
        let (reply, response) = bounded(1);
        self.post(Command::Displayed(reply))?;
        response.recv().map_err(|_| NewsError::ActorClosed)
    }

    /// Stop the owner thread and wait for it. Pending worker results are
    /// dropped.
    pub fn shutdown(&self) -> NewsResult<()> {
        self.post(Command::Shutdown)?;

        let thread = self
            .inner
            .thread
            .lock()
            .map_err(|_| NewsError::ActorClosed)?
            .take();
        if let Some(thread) = thread {
            thread.join().map_err(|_| NewsError::ActorClosed)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::article_repository::MockNewsRepository;
    use std::time::Duration;

    const WAIT: Duration = Duration::from_secs(5);

    fn article(title: &str, url: &str) -> Article {
        Article::new(
            title.to_string(),
            url.to_string(),
            "2024-09-10T10:00:00Z".to_string(),
        )
    }

    fn headlines() -> Vec<Article> {
        vec![
            article("Apple launches iPhone", "https://a"),
            article("Google news today", "https://b"),
        ]
    }

    fn spawn(repo: MockNewsRepository) -> ViewHandle {
        ViewActor::spawn(NewsViewModel::new(Arc::new(repo))).unwrap()
    }

    #[test]
    fn test_fetch_then_read_displayed() {
        let mut repo = MockNewsRepository::new();
        repo.expect_fetch_top_headlines().returning(|| Ok(headlines()));
        let handle = spawn(repo);

        let outcome = handle.fetch_news().unwrap().recv_timeout(WAIT).unwrap();

        assert!(outcome.is_ok());
        assert_eq!(handle.displayed_articles().unwrap(), headlines());
        handle.shutdown().unwrap();
    }

    #[test]
    fn test_failed_fetch_reports_error_and_shows_cache() {
        let mut repo = MockNewsRepository::new();
        repo.expect_fetch_top_headlines().returning(|| {
            Err(NewsError::Api {
                code: "down".to_string(),
                message: "offline".to_string(),
            })
        });
        repo.expect_cached_headlines()
            .returning(|| vec![article("Cached", "https://c")]);
        let handle = spawn(repo);

        let outcome = handle.refresh().unwrap().recv_timeout(WAIT).unwrap();

        assert!(matches!(outcome, Err(NewsError::Api { .. })));
        assert_eq!(
            handle.displayed_articles().unwrap(),
            vec![article("Cached", "https://c")]
        );
    }

    #[test]
    fn test_later_fetch_overwrites_earlier() {
        let mut repo = MockNewsRepository::new();
        let mut calls = 0;
        repo.expect_fetch_top_headlines().returning(move || {
            calls += 1;
            Ok(vec![article(&format!("Batch {}", calls), "https://x")])
        });
        let handle = spawn(repo);

        handle.fetch_news().unwrap().recv_timeout(WAIT).unwrap().unwrap();
        handle.fetch_news().unwrap().recv_timeout(WAIT).unwrap().unwrap();

        let displayed = handle.displayed_articles().unwrap();
        assert_eq!(displayed.len(), 1);
        assert_eq!(displayed[0].title, "Batch 2");
    }

    #[test]
    fn test_toggle_reloads_bookmarks_after_write() {
        let saved = Arc::new(Mutex::new(Vec::<Article>::new()));

        let mut repo = MockNewsRepository::new();
        let store = Arc::clone(&saved);
        repo.expect_toggle_bookmark().returning(move |a| {
            store.lock().unwrap().push(a.clone());
        });
        let store = Arc::clone(&saved);
        repo.expect_bookmarks()
            .returning(move || store.lock().unwrap().clone());
        let handle = spawn(repo);

        handle.set_mode(DisplayMode::Bookmarked).unwrap();
        handle
            .toggle_bookmark_for(article("Saved", "https://s"))
            .unwrap()
            .recv_timeout(WAIT)
            .unwrap();

        let displayed = handle.displayed_articles().unwrap();
        assert_eq!(displayed, vec![article("Saved", "https://s")]);
    }

    #[test]
    fn test_overlapping_toggles_apply_in_write_order() {
        let saved = Arc::new(Mutex::new(Vec::<Article>::new()));
        let reads = Arc::new(Mutex::new(0usize));

        let mut repo = MockNewsRepository::new();
        let store = Arc::clone(&saved);
        repo.expect_toggle_bookmark().returning(move |a| {
            store.lock().unwrap().push(a.clone());
        });
        let store = Arc::clone(&saved);
        let count = Arc::clone(&reads);
        repo.expect_bookmarks().returning(move || {
            let snapshot = store.lock().unwrap().clone();
            let first = {
                let mut n = count.lock().unwrap();
                *n += 1;
                *n == 1
            };
            // Hold the first, older snapshot back so a second toggle could overtake it.
            if first {
                thread::sleep(Duration::from_millis(200));
            }
            snapshot
        });
        let handle = spawn(repo);

        handle.set_mode(DisplayMode::Bookmarked).unwrap();
        let first = handle.toggle_bookmark_for(article("A", "https://a")).unwrap();
        let second = handle.toggle_bookmark_for(article("B", "https://b")).unwrap();
        first.recv_timeout(WAIT).unwrap();
        second.recv_timeout(WAIT).unwrap();

        let displayed = handle.displayed_articles().unwrap();
        assert_eq!(
            displayed,
            vec![article("A", "https://a"), article("B", "https://b")]
        );
        assert_eq!(*saved.lock().unwrap(), displayed);
    }

    #[test]
    fn test_mode_and_filter_apply_in_order() {
        let mut repo = MockNewsRepository::new();
        repo.expect_fetch_top_headlines().returning(|| Ok(headlines()));
        repo.expect_bookmarks().returning(Vec::new);
        let handle = spawn(repo);

        handle.fetch_news().unwrap().recv_timeout(WAIT).unwrap().unwrap();
        handle.load_bookmarks().unwrap().recv_timeout(WAIT).unwrap();
        handle.set_filter_text("  google ").unwrap();

        let displayed = handle.displayed_articles().unwrap();
        assert_eq!(displayed.len(), 1);
        assert_eq!(displayed[0].title, "Google news today");

        handle.set_mode(DisplayMode::Bookmarked).unwrap();
        assert!(handle.displayed_articles().unwrap().is_empty());
    }

    #[test]
    fn test_subscriber_runs_on_owner_thread() {
        let mut repo = MockNewsRepository::new();
        repo.expect_fetch_top_headlines().returning(|| Ok(headlines()));

        let (seen_tx, seen_rx) = unbounded();
        let mut vm = NewsViewModel::new(Arc::new(repo));
        vm.subscribe(move |vm| {
            let name = thread::current().name().map(str::to_string);
            seen_tx.send((name, vm.displayed_articles().len())).ok();
        });
        let handle = ViewActor::spawn(vm).unwrap();

        handle.fetch_news().unwrap().recv_timeout(WAIT).unwrap().unwrap();

        let (name, count) = seen_rx.recv_timeout(WAIT).unwrap();
        assert_eq!(name.as_deref(), Some("view-state"));
        assert_eq!(count, 2);
    }

    #[test]
    fn test_calls_after_shutdown_fail() {
        let handle = spawn(MockNewsRepository::new());
        let other = handle.clone();

        handle.shutdown().unwrap();

        assert!(matches!(
            other.set_mode(DisplayMode::All),
            Err(NewsError::ActorClosed)
        ));
        assert!(matches!(
            other.displayed_articles(),
            Err(NewsError::ActorClosed)
        ));
    }
}
