use std::future::Future;

use tokio::sync::watch;

use dashboard_types::DashboardError;

/// Loading flag and last user-visible error shared by every mirrored view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadStatus {
    pub is_loading: bool,
    pub error: Option<String>,
}

pub trait Tracked {
    fn status_mut(&mut self) -> &mut LoadStatus;
}

/// Observable copy of part of the document.
///
/// Subscribers are woken on every change. The copy is only as fresh as the
/// last operation that went through this mirror.
pub(crate) struct Mirror<V> {
    state: watch::Sender<V>,
}

impl<V: Clone + Tracked> Mirror<V> {
    pub(crate) fn new(initial: V) -> Self {
        let (state, _) = watch::channel(initial);
        Self { state }
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<V> {
        self.state.subscribe()
    }

    pub(crate) fn snapshot(&self) -> V {
        self.state.borrow().clone()
    }

    pub(crate) fn read<T>(&self, view: impl FnOnce(&V) -> T) -> T {
        view(&self.state.borrow())
    }

    /// Local change that does not touch the store.
    pub(crate) fn modify(&self, change: impl FnOnce(&mut V)) {
        self.state.send_modify(change);
    }

    /// Runs a store operation with the loading flag raised.
    ///
    /// On success `apply` folds the result into the view and clears the error.
    /// On failure the view records `"{context}: {error}"` and the error is
    /// returned to the caller unchanged.
    pub(crate) async fn track<T, Fut>(
        &self,
        context: &str,
        operation: Fut,
        apply: impl FnOnce(&mut V, &T),
    ) -> Result<T, DashboardError>
    where
        Fut: Future<Output = Result<T, DashboardError>>,
    {
        self.state.send_modify(|view| view.status_mut().is_loading = true);

        match operation.await {
            Ok(value) => {
                self.state.send_modify(|view| {
                    apply(view, &value);
                    let status = view.status_mut();
                    status.is_loading = false;
                    status.error = None;
                });
                Ok(value)
            }
            Err(err) => {
                tracing::warn!("{}: {}", context, err);
                self.state.send_modify(|view| {
                    let status = view.status_mut();
                    status.is_loading = false;
                    status.error = Some(format!("{context}: {err}"));
                });
                Err(err)
            }
        }
    }
}
