//! Bookmark screen view model.
//!
//! [`BookmarkViewModel`] is the single source of truth for the bookmark screen. It
//! owns the [`BookmarkUiState`] snapshot and the pending deletion selection, turns
//! user intents into state transitions, and talks to the [`ImageStore`].
//!
//! # Query Supersession
//!
//! Listing and searching are continuous subscriptions. Every new query takes a
//! fresh generation number inside the same atomic update that raises
//! `is_loading`. An emission is applied only if its generation is still current,
//! checked inside the atomic update that writes it, so a slower, earlier query can
//! never overwrite the results of a query requested after it, whatever the order
//! in which their emissions arrive. The superseded subscription task is aborted
//! as well.
//!
//! Emissions of one subscription are applied in order, one at a time; each
//! replaces `result` completely.
//!
//! # Lifecycle
//!
//! Construction immediately issues [`load_all`](BookmarkViewModel::load_all).
//! Dropping the view model aborts the active subscription and any deletion that
//! has not completed yet.

use crate::app::holder::StateHolder;
use crate::app::intent::BookmarkIntent;
use crate::app::selection::PendingSelection;
use crate::app::state::BookmarkUiState;
use crate::domain::error::Result;
use crate::domain::{Image, SearchImagesError, UserMessage};
use crate::storage::{ImageStore, ImageStream};
use futures_util::stream::{BoxStream, StreamExt};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// State shared between the view model and its background tasks.
struct Shared {
    store: Arc<dyn ImageStore>,
    state: StateHolder<BookmarkUiState>,
    selection: Mutex<PendingSelection>,
    generation: AtomicU64,
}

impl Shared {
    fn new(store: Arc<dyn ImageStore>) -> Self {
        Self {
            store,
            state: StateHolder::new(BookmarkUiState::default()),
            selection: Mutex::new(PendingSelection::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Starts a new query generation and raises `is_loading`.
    fn begin_query(&self) -> u64 {
        let mut generation = 0;
        self.state.update(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            state.is_loading = true;
        });
        generation
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Publishes `images` if `generation` is still current.
    fn apply_images(&self, generation: u64, images: Vec<Image>) -> bool {
        let count = images.len();
        let applied = self.state.update_if(|state| {
            if !self.is_current(generation) {
                return false;
            }
            state.is_loading = false;
            state.result = images;
            true
        });

        if applied {
            tracing::debug!(generation, count, "query results applied");
        } else {
            tracing::debug!(generation, count, "dropping results of superseded query");
        }
        applied
    }

    fn apply_stream_failure(&self, generation: u64, error: &SearchImagesError) {
        let applied = self.state.update_if(|state| {
            if !self.is_current(generation) {
                return false;
            }
            state.is_loading = false;
            state.user_message = Some(UserMessage::LoadFailed);
            true
        });
        tracing::warn!(generation, applied, error = %error, "image stream failed");
    }

    /// Applies emissions of one subscription until it ends, fails, or is superseded.
    async fn collect(&self, generation: u64, mut stream: ImageStream) {
        while let Some(item) = stream.next().await {
            match item {
                Ok(images) => {
                    if !self.apply_images(generation, images) {
                        break;
                    }
                }
                Err(e) => {
                    self.apply_stream_failure(generation, &e);
                    break;
                }
            }
        }
        tracing::debug!(generation, "query subscription finished");
    }

    fn apply_delete_outcome(&self, outcome: Result<()>) {
        match outcome {
            Ok(()) => {
                tracing::debug!("images deleted");
                self.state.update(|state| state.is_delete_images = true);
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to delete images");
                self.state.update(|state| {
                    state.is_delete_images = false;
                    state.user_message = Some(UserMessage::GenericError);
                });
            }
        }
    }

    fn clear_selection(&self) {
        lock(&self.selection).clear();
    }
}

/// View model of the bookmark screen.
///
/// All intent methods return immediately; store work runs on background tasks
/// and its results show up in the published state.
pub struct BookmarkViewModel {
    shared: Arc<Shared>,
    runtime: Handle,
    query_task: Mutex<Option<JoinHandle<()>>>,
    delete_tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl BookmarkViewModel {
    /// Creates a view model on the current Tokio runtime and starts loading all bookmarks.
    ///
    /// # Panics
    ///
    /// Panics if called outside the context of a Tokio runtime.
    #[must_use]
    pub fn new(store: Arc<dyn ImageStore>) -> Self {
        Self::with_runtime(store, Handle::current())
    }

    /// Creates a view model spawning its tasks on `runtime` and starts loading all bookmarks.
    #[must_use]
    pub fn with_runtime(store: Arc<dyn ImageStore>, runtime: Handle) -> Self {
        let view_model = Self {
            shared: Arc::new(Shared::new(store)),
            runtime,
            query_task: Mutex::new(None),
            delete_tasks: Mutex::new(Vec::new()),
        };
        view_model.load_all();
        view_model
    }

    /// Returns the current state snapshot.
    #[must_use]
    pub fn state(&self) -> BookmarkUiState {
        self.shared.state.snapshot()
    }

    /// Returns a receiver observing every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<BookmarkUiState> {
        self.shared.state.subscribe()
    }

    /// Returns a stream of state snapshots, starting with the current one.
    #[must_use]
    pub fn state_stream(&self) -> BoxStream<'static, BookmarkUiState> {
        self.shared.state.stream()
    }

    /// Returns the ids currently selected for deletion.
    #[must_use]
    pub fn selected_ids(&self) -> HashSet<String> {
        lock(&self.shared.selection).snapshot()
    }

    /// Returns `true` if `id` is selected for deletion.
    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        lock(&self.shared.selection).contains(id)
    }

    /// Applies an intent.
    pub fn dispatch(&self, intent: BookmarkIntent) {
        let _span = tracing::debug_span!("dispatch", intent = ?intent).entered();

        match intent {
            BookmarkIntent::LoadAll => self.load_all(),
            BookmarkIntent::Search(keyword) => self.search(&keyword),
            BookmarkIntent::ToggleEditMode => self.toggle_edit_mode(),
            BookmarkIntent::ExitEditMode => self.exit_edit_mode(),
            BookmarkIntent::ToggleSelection(id) => self.toggle_selection(&id),
            BookmarkIntent::ConfirmDelete => self.confirm_delete(),
        }
    }

    /// Shows every bookmark, superseding any active query.
    pub fn load_all(&self) {
        tracing::debug!("loading all bookmarks");
        let stream = self.shared.store.stream_all();
        self.collect_latest(stream);
    }

    /// Shows the bookmarks matching `keyword`, superseding any active query.
    pub fn search(&self, keyword: &str) {
        tracing::debug!(keyword = %keyword, "searching bookmarks");
        let stream = self.shared.store.stream_search(keyword);
        self.collect_latest(stream);
    }

    /// Flips edit mode, resets the deletion flag, and clears the selection.
    pub fn toggle_edit_mode(&self) {
        self.shared.state.update(|state| {
            state.is_edit_mode = !state.is_edit_mode;
            state.is_delete_images = false;
        });
        self.shared.clear_selection();
    }

    /// Leaves edit mode, resets the deletion flag, and clears the selection.
    pub fn exit_edit_mode(&self) {
        self.shared.state.update(|state| {
            state.is_edit_mode = false;
            state.is_delete_images = false;
        });
        self.shared.clear_selection();
    }

    /// Selects `id` for deletion, or unselects it if already selected.
    pub fn toggle_selection(&self, id: &str) {
        let selected = lock(&self.shared.selection).toggle(id);
        tracing::trace!(id = %id, selected, "selection toggled");
    }

    /// Deletes the selected images.
    ///
    /// Does nothing when the selection is empty. Otherwise the store receives a
    /// snapshot of the selection; on success `is_delete_images` becomes `true`,
    /// on failure it becomes `false` and `user_message` is set to
    /// [`UserMessage::GenericError`]. The selection is kept either way and no
    /// reload is triggered.
    pub fn confirm_delete(&self) {
        let ids = {
            let selection = lock(&self.shared.selection);
            if selection.is_empty() {
                tracing::debug!("nothing selected, skipping delete");
                return;
            }
            selection.snapshot()
        };

        tracing::debug!(count = ids.len(), "deleting selected images");
        let deletion = self.shared.store.delete_batch(ids);
        let shared = Arc::clone(&self.shared);
        let task = self.runtime.spawn(async move {
            let outcome = deletion.await;
            shared.apply_delete_outcome(outcome);
        });

        let mut tasks = lock(&self.delete_tasks);
        tasks.retain(|task| !task.is_finished());
        tasks.push(task);
    }

    fn collect_latest(&self, stream: ImageStream) {
        let mut slot = lock(&self.query_task);

        let generation = self.shared.begin_query();
        let shared = Arc::clone(&self.shared);
        let task = self
            .runtime
            .spawn(async move { shared.collect(generation, stream).await });

        if let Some(previous) = slot.replace(task) {
            previous.abort();
        }
    }
}

impl Drop for BookmarkViewModel {
    fn drop(&mut self) {
        if let Some(task) = lock(&self.query_task).take() {
            task.abort();
        }
        for task in lock(&self.delete_tasks).drain(..) {
            task.abort();
        }
    }
}

impl std::fmt::Debug for BookmarkViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookmarkViewModel")
            .field("state", &self.shared.state.snapshot())
            .field("selected", &lock(&self.shared.selection).len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::future::BoxFuture;
    use futures_util::stream;

    struct EmptyStore;

    impl ImageStore for EmptyStore {
        fn stream_all(&self) -> ImageStream {
            stream::pending().boxed()
        }

        fn stream_search(&self, _keyword: &str) -> ImageStream {
            stream::pending().boxed()
        }

        fn delete_batch(&self, _ids: HashSet<String>) -> BoxFuture<'static, Result<()>> {
            Box::pin(std::future::ready(Ok(())))
        }

        fn save(&self, _images: Vec<Image>) -> BoxFuture<'static, Result<()>> {
            Box::pin(std::future::ready(Ok(())))
        }
    }

    fn image(id: &str) -> Image {
        Image {
            id: id.to_string(),
            keyword: "cat".to_string(),
            collection: "blog".to_string(),
            thumbnail_url: String::new(),
            image_url: id.to_string(),
            width: 1,
            height: 1,
            display_sitename: String::new(),
            doc_url: String::new(),
            datetime: chrono::DateTime::parse_from_rfc3339("2024-03-01T12:00:00+09:00").unwrap(),
        }
    }

    #[test]
    fn stale_generation_is_dropped() {
        let shared = Shared::new(Arc::new(EmptyStore));
        let all = shared.begin_query();
        let search = shared.begin_query();

        assert!(shared.apply_images(search, vec![image("cat")]));
        assert!(!shared.apply_images(all, vec![image("stale")]));

        let state = shared.state.snapshot();
        assert_eq!(state.result, vec![image("cat")]);
        assert!(!state.is_loading);
    }

    #[test]
    fn later_request_wins_even_if_it_answers_first() {
        let shared = Shared::new(Arc::new(EmptyStore));
        let first = shared.begin_query();
        let second = shared.begin_query();

        assert!(!shared.apply_images(first, vec![image("old")]));
        assert!(shared.state.snapshot().is_loading);

        assert!(shared.apply_images(second, vec![image("new")]));
        assert_eq!(shared.state.snapshot().result, vec![image("new")]);
    }

    #[test]
    fn stream_failure_sets_load_failed_message() {
        let shared = Shared::new(Arc::new(EmptyStore));
        let generation = shared.begin_query();

        shared.apply_stream_failure(generation, &SearchImagesError::Stream("closed".into()));

        let state = shared.state.snapshot();
        assert!(!state.is_loading);
        assert_eq!(state.user_message, Some(UserMessage::LoadFailed));
    }

    #[test]
    fn stale_stream_failure_is_ignored() {
        let shared = Shared::new(Arc::new(EmptyStore));
        let stale = shared.begin_query();
        shared.begin_query();

        shared.apply_stream_failure(stale, &SearchImagesError::Stream("closed".into()));

        let state = shared.state.snapshot();
        assert!(state.is_loading);
        assert_eq!(state.user_message, None);
    }

    #[tokio::test]
    async fn construction_starts_loading() {
        let view_model = BookmarkViewModel::new(Arc::new(EmptyStore));
        let state = view_model.state();
        assert!(state.is_loading);
        assert!(state.result.is_empty());
        assert!(!state.is_edit_mode);
    }

    #[tokio::test]
    async fn dispatch_routes_selection_intents() {
        let view_model = BookmarkViewModel::new(Arc::new(EmptyStore));

        view_model.dispatch(BookmarkIntent::ToggleEditMode);
        view_model.dispatch(BookmarkIntent::ToggleSelection("a".into()));
        assert!(view_model.is_selected("a"));
        assert!(view_model.state().is_edit_mode);

        view_model.dispatch(BookmarkIntent::ExitEditMode);
        assert!(view_model.selected_ids().is_empty());
        assert!(!view_model.state().is_edit_mode);
    }
}
