//! Remote actions, spawned on the app runtime so the frame loop never blocks

use super::App;
use crate::catalog::Catalog;
use std::fmt::Display;
use std::future::Future;
use tracing::debug;

impl App {
    /// Run one catalog operation in the background. Failures were already
    /// surfaced as a notice by the catalog itself.
    fn spawn_action<F, Fut, E>(&self, action: &'static str, f: F)
    where
        F: FnOnce(Catalog) -> Fut,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let fut = f(self.catalog.clone());
        debug!(action, "Spawning catalog action");
        self.runtime.spawn(async move {
            if let Err(e) = fut.await {
                debug!(action, error = %e, "Catalog action finished with error");
            }
        });
    }

    pub fn load_books(&self) {
        if !self.connected {
            return;
        }
        self.spawn_action("load_all", |c| async move { c.load_all().await });
    }

    pub fn submit_form(&self) {
        self.spawn_action("submit", |c| async move { c.submit().await });
    }

    /// The confirmation closes on this frame; the delete runs in the background.
    pub fn confirm_delete(&self) {
        let Some(book) = self.catalog.take_pending_delete() else {
            return;
        };
        self.spawn_action("remove", move |c| async move { c.remove(&book.id).await });
    }
}
