//! View state and the transitions the window drives
//!
//! Every mutation goes straight to the gateway and is followed by a full
//! reload; the list is never patched locally. Overlapping calls are not
//! sequenced, so whichever response lands last decides the shown state.

use crate::error::{ActionError, RemoteError};
use crate::gateway::BookGateway;
use crate::types::{Book, BookForm, BookId, Notice};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

/// Called after every state change so the window can redraw
pub type RepaintHook = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogState {
    /// Snapshot of the remote table as of the last successful fetch
    pub books: Vec<Book>,
    pub form: BookForm,
    pub editing: Option<BookId>,
    pub loading: bool,
    /// Row waiting for the user to confirm deletion
    pub pending_delete: Option<Book>,
    pub notice: Option<Notice>,
}

impl CatalogState {
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }
}

#[derive(Clone)]
pub struct Catalog {
    state: Arc<Mutex<CatalogState>>,
    gateway: Arc<dyn BookGateway>,
    repaint: RepaintHook,
}

impl Catalog {
    pub fn new(gateway: Arc<dyn BookGateway>) -> Self {
        Self {
            state: Arc::new(Mutex::new(CatalogState::default())),
            gateway,
            repaint: Arc::new(|| {}),
        }
    }

    pub fn with_repaint(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.repaint = Arc::new(hook);
        self
    }

    /// Direct access for the renderer (form text edits). Never held across an await.
    pub fn lock(&self) -> MutexGuard<'_, CatalogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> CatalogState {
        self.lock().clone()
    }

    fn update<R>(&self, f: impl FnOnce(&mut CatalogState) -> R) -> R {
        let out = f(&mut self.lock());
        (self.repaint)();
        out
    }

    fn fail(&self, prefix: &str, e: &RemoteError) {
        error!(error = %e, "{}", prefix);
        self.update(|s| {
            s.loading = false;
            s.notice = Some(Notice::error(format!("{}: {}", prefix, e)));
        });
    }

    /// Replace the list with the remote table, newest first.
    pub async fn load_all(&self) -> Result<(), RemoteError> {
        self.update(|s| s.loading = true);
        match self.gateway.list_all().await {
            Ok(books) => {
                debug!(count = books.len(), "Books loaded");
                self.update(|s| {
                    s.books = books;
                    s.loading = false;
                });
                Ok(())
            }
            Err(e) => {
                self.fail("Error loading books", &e);
                Err(e)
            }
        }
    }

    /// Create or update from the form, depending on the edit target.
    pub async fn submit(&self) -> Result<(), ActionError> {
        let (form, editing) = {
            let s = self.lock();
            (s.form.clone(), s.editing.clone())
        };

        let draft = match form.validate() {
            Ok(draft) => draft,
            Err(e) => {
                warn!(error = %e, "Form rejected");
                self.update(|s| s.notice = Some(Notice::error(e.to_string())));
                return Err(e.into());
            }
        };

        self.update(|s| s.loading = true);
        let (result, done, failed) = match &editing {
            Some(id) => (
                self.gateway.update(id, &draft).await,
                "Book updated successfully!",
                "Error updating",
            ),
            None => (
                self.gateway.insert(&draft).await,
                "Book added successfully!",
                "Error creating",
            ),
        };

        if let Err(e) = result {
            self.fail(failed, &e);
            return Err(e.into());
        }

        info!(id = ?editing, name = %draft.name, pages = draft.pages, "Book saved");
        self.update(|s| {
            s.form.clear();
            s.editing = None;
            s.notice = Some(Notice::success(done));
        });
        self.load_all().await?;
        Ok(())
    }

    pub fn begin_edit(&self, book: &Book) {
        debug!(id = %book.id, "Editing book");
        self.update(|s| {
            s.form = BookForm::from_book(book);
            s.editing = Some(book.id.clone());
        });
    }

    pub fn cancel_edit(&self) {
        self.update(|s| {
            s.form.clear();
            s.editing = None;
        });
    }

    /// Ask before deleting; nothing is sent until the row is taken back out.
    pub fn request_remove(&self, book: Book) {
        self.update(|s| s.pending_delete = Some(book));
    }

    pub fn dismiss_remove(&self) {
        self.update(|s| s.pending_delete = None);
    }

    /// Clears the confirmation and hands back the row it was for.
    pub fn take_pending_delete(&self) -> Option<Book> {
        self.update(|s| s.pending_delete.take())
    }

    /// Delete one row and reload.
    pub async fn remove(&self, id: &BookId) -> Result<(), RemoteError> {
        self.update(|s| s.loading = true);
        if let Err(e) = self.gateway.delete(id).await {
            self.fail("Error deleting", &e);
            return Err(e);
        }

        info!(id = %id, "Book deleted");
        self.update(|s| {
            if s.editing.as_ref() == Some(id) {
                s.form.clear();
                s.editing = None;
            }
            s.notice = Some(Notice::success("Book deleted successfully!"));
        });
        self.load_all().await
    }

    pub fn dismiss_notice(&self) {
        self.update(|s| s.notice = None);
    }

    /// Shown when the window starts without usable credentials.
    pub fn raise(&self, notice: Notice) {
        self.update(|s| s.notice = Some(notice));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormError;
    use crate::gateway::memory::MemoryGateway;
    use crate::types::{BookDraft, NoticeKind};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    fn catalog() -> (Catalog, Arc<MemoryGateway>) {
        let gateway = Arc::new(MemoryGateway::new());
        (Catalog::new(gateway.clone()), gateway)
    }

    fn fill(catalog: &Catalog, name: &str, pages: &str) {
        let mut s = catalog.lock();
        s.form.name = name.into();
        s.form.pages = pages.into();
    }

    async fn add(catalog: &Catalog, name: &str, pages: &str) {
        fill(catalog, name, pages);
        catalog.submit().await.expect("submit");
    }

    /// Same sequence the confirmation modal runs.
    async fn confirm(catalog: &Catalog) -> Result<(), RemoteError> {
        match catalog.take_pending_delete() {
            Some(book) => catalog.remove(&book.id).await,
            None => Ok(()),
        }
    }

    fn rows(catalog: &Catalog) -> Vec<(String, i32)> {
        catalog
            .snapshot()
            .books
            .into_iter()
            .map(|b| (b.name, b.pages))
            .collect()
    }

    #[tokio::test]
    async fn create_adds_exactly_one_record() {
        let (catalog, _) = catalog();
        add(&catalog, "Emma", "474").await;
        let before = catalog.snapshot().books.len();

        add(&catalog, "Dune", "412").await;

        let state = catalog.snapshot();
        assert_eq!(state.books.len(), before + 1);
        assert_eq!(
            state.books.iter().filter(|b| b.name == "Dune" && b.pages == 412).count(),
            1
        );
        assert_eq!(state.form, BookForm::default());
        assert!(!state.loading);
        assert_eq!(state.notice, Some(Notice::success("Book added successfully!")));
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let (catalog, _) = catalog();
        add(&catalog, "First", "1").await;
        add(&catalog, "Second", "2").await;
        add(&catalog, "Third", "3").await;

        let names: Vec<_> = rows(&catalog).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["Third", "Second", "First"]);
    }

    #[tokio::test]
    async fn edit_updates_that_record_only() {
        let (catalog, _) = catalog();
        add(&catalog, "Dune", "412").await;
        add(&catalog, "Emma", "474").await;

        let dune = catalog
            .snapshot()
            .books
            .into_iter()
            .find(|b| b.name == "Dune")
            .unwrap();
        catalog.begin_edit(&dune);
        {
            let s = catalog.snapshot();
            assert_eq!(s.editing, Some(dune.id.clone()));
            assert_eq!(s.form.pages, "412");
        }
        catalog.lock().form.pages = "688".into();
        catalog.submit().await.expect("submit");

        let state = catalog.snapshot();
        assert_eq!(state.books.len(), 2);
        let updated = state.books.iter().find(|b| b.id == dune.id).unwrap();
        assert_eq!((updated.name.as_str(), updated.pages), ("Dune", 688));
        let other = state.books.iter().find(|b| b.id != dune.id).unwrap();
        assert_eq!((other.name.as_str(), other.pages), ("Emma", 474));
        assert_eq!(state.editing, None);
        assert_eq!(state.notice, Some(Notice::success("Book updated successfully!")));
    }

    #[tokio::test]
    async fn delete_removes_exactly_that_record() {
        let (catalog, _) = catalog();
        add(&catalog, "Dune", "412").await;
        add(&catalog, "Emma", "474").await;
        add(&catalog, "Ulysses", "730").await;

        let emma = catalog
            .snapshot()
            .books
            .into_iter()
            .find(|b| b.name == "Emma")
            .unwrap();
        catalog.request_remove(emma.clone());
        assert_eq!(catalog.snapshot().pending_delete, Some(emma.clone()));

        confirm(&catalog).await.expect("delete");

        let state = catalog.snapshot();
        assert_eq!(state.books.len(), 2);
        assert!(state.books.iter().all(|b| b.id != emma.id));
        assert_eq!(state.pending_delete, None);
        assert_eq!(state.notice, Some(Notice::success("Book deleted successfully!")));
    }

    #[tokio::test]
    async fn dismissed_delete_makes_no_call() {
        let (catalog, gateway) = catalog();
        add(&catalog, "Dune", "412").await;
        let calls = gateway.calls();

        let dune = catalog.snapshot().books[0].clone();
        catalog.request_remove(dune);
        catalog.dismiss_remove();
        assert_eq!(catalog.take_pending_delete(), None);
        confirm(&catalog).await.expect("no-op");

        assert_eq!(gateway.calls(), calls);
        assert_eq!(catalog.snapshot().books.len(), 1);
    }

    #[tokio::test]
    async fn invalid_submit_makes_no_call() {
        let (catalog, gateway) = catalog();
        add(&catalog, "Dune", "412").await;
        let calls = gateway.calls();
        let books = catalog.snapshot().books;

        for (name, pages, expected) in [
            ("", "100", FormError::MissingField),
            ("Emma", "", FormError::MissingField),
            ("Emma", "0", FormError::InvalidPages),
            ("Emma", "-5", FormError::InvalidPages),
            ("Emma", "many", FormError::InvalidPages),
        ] {
            fill(&catalog, name, pages);
            let err = catalog.submit().await.unwrap_err();
            assert_eq!(err, ActionError::Form(expected.clone()));

            let state = catalog.snapshot();
            assert_eq!(state.books, books);
            assert_eq!(state.notice, Some(Notice::error(expected.to_string())));
            assert!(!state.loading);
        }
        assert_eq!(gateway.calls(), calls);
    }

    #[tokio::test]
    async fn cancel_edit_clears_form_without_call() {
        let (catalog, gateway) = catalog();
        add(&catalog, "Dune", "412").await;
        let calls = gateway.calls();

        let dune = catalog.snapshot().books[0].clone();
        catalog.begin_edit(&dune);
        catalog.cancel_edit();

        let state = catalog.snapshot();
        assert!(state.form.is_empty());
        assert!(!state.is_editing());
        assert_eq!(gateway.calls(), calls);
    }

    #[tokio::test]
    async fn remote_failure_keeps_list_and_form() {
        let (catalog, gateway) = catalog();
        add(&catalog, "Dune", "412").await;
        let books = catalog.snapshot().books;

        gateway.fail_with(Some("permission denied for table books"));
        fill(&catalog, "Emma", "474");
        let err = catalog.submit().await.unwrap_err();
        assert!(matches!(err, ActionError::Remote(_)));

        let state = catalog.snapshot();
        assert_eq!(state.books, books);
        assert!(!state.loading);
        assert_eq!(state.form.name, "Emma");
        assert_eq!(
            state.notice,
            Some(Notice::error("Error creating: permission denied for table books"))
        );

        catalog.load_all().await.unwrap_err();
        let state = catalog.snapshot();
        assert_eq!(state.books, books);
        assert!(!state.loading);
        assert_eq!(state.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Error));
        assert!(state.notice.unwrap().text.starts_with("Error loading books: "));
    }

    #[tokio::test]
    async fn failed_update_keeps_edit_target() {
        let (catalog, gateway) = catalog();
        add(&catalog, "Dune", "412").await;
        let dune = catalog.snapshot().books[0].clone();
        catalog.begin_edit(&dune);

        gateway.fail_with(Some("timeout"));
        catalog.submit().await.unwrap_err();

        let state = catalog.snapshot();
        assert_eq!(state.editing, Some(dune.id.clone()));
        assert_eq!(state.notice, Some(Notice::error("Error updating: timeout")));
        assert!(!state.loading);

        catalog.request_remove(dune.clone());
        gateway.fail_with(Some("offline"));
        confirm(&catalog).await.unwrap_err();
        let state = catalog.snapshot();
        assert_eq!(state.books, vec![dune]);
        assert_eq!(state.pending_delete, None);
        assert_eq!(state.notice, Some(Notice::error("Error deleting: offline")));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn deleting_the_edit_target_cancels_the_edit() {
        let (catalog, _) = catalog();
        add(&catalog, "Dune", "412").await;
        let dune = catalog.snapshot().books[0].clone();
        catalog.begin_edit(&dune);

        catalog.remove(&dune.id).await.expect("delete");

        let state = catalog.snapshot();
        assert!(!state.is_editing());
        assert!(state.form.is_empty());
    }

    #[tokio::test]
    async fn dune_round_trip() {
        let (catalog, _) = catalog();
        catalog.load_all().await.expect("load");
        assert!(catalog.snapshot().books.is_empty());

        add(&catalog, "Dune", "412").await;
        assert_eq!(rows(&catalog), [("Dune".to_string(), 412)]);

        let dune = catalog.snapshot().books[0].clone();
        catalog.begin_edit(&dune);
        catalog.lock().form.pages = "688".into();
        catalog.submit().await.expect("update");
        assert_eq!(rows(&catalog), [("Dune".to_string(), 688)]);

        catalog.request_remove(dune);
        confirm(&catalog).await.expect("delete");
        assert!(catalog.snapshot().books.is_empty());
    }

    #[tokio::test]
    async fn repaint_runs_on_every_change() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        let catalog = Catalog::new(Arc::new(MemoryGateway::new()))
            .with_repaint(move || {
                seen.fetch_add(1, Ordering::SeqCst);
            });

        catalog.load_all().await.expect("load");
        assert_eq!(count.load(Ordering::SeqCst), 2);

        catalog.dismiss_notice();
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    /// Holds `list_all` open until released.
    struct GatedGateway {
        inner: MemoryGateway,
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl BookGateway for GatedGateway {
        async fn list_all(&self) -> Result<Vec<Book>, RemoteError> {
            self.entered.notify_one();
            self.release.notified().await;
            self.inner.list_all().await
        }

        async fn insert(&self, draft: &BookDraft) -> Result<(), RemoteError> {
            self.inner.insert(draft).await
        }

        async fn update(&self, id: &BookId, draft: &BookDraft) -> Result<(), RemoteError> {
            self.inner.update(id, draft).await
        }

        async fn delete(&self, id: &BookId) -> Result<(), RemoteError> {
            self.inner.delete(id).await
        }
    }

    #[tokio::test]
    async fn loading_is_set_for_the_call_duration() {
        let gateway = Arc::new(GatedGateway {
            inner: MemoryGateway::new(),
            entered: Notify::new(),
            release: Notify::new(),
        });
        let catalog = Catalog::new(gateway.clone());

        let task = {
            let catalog = catalog.clone();
            tokio::spawn(async move { catalog.load_all().await })
        };
        gateway.entered.notified().await;
        assert!(catalog.snapshot().loading);

        gateway.release.notify_one();
        task.await.expect("join").expect("load");
        assert!(!catalog.snapshot().loading);
    }
}
