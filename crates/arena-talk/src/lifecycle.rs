//! Cancellable lifecycle scopes
//!
//! A [`Lifecycle`] stands for "this connection is still useful". It ends
//! exactly once and never comes back. Ending a scope ends every scope
//! derived from it with [`Termination::ParentDone`].

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::sync::watch;

/// Why a lifecycle scope ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    /// The holder called [`Lifecycle::cancel`]
    Cancelled,
    /// An ancestor scope ended
    ParentDone,
    /// The channel was closed by the local side
    Closed,
    /// The connection ended without the local side asking for it
    Interrupted,
}

impl Termination {
    /// Whether the local side asked for this ending
    pub fn is_local(self) -> bool {
        !matches!(self, Termination::Interrupted)
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Termination::Cancelled => "cancelled",
            Termination::ParentDone => "parent scope ended",
            Termination::Closed => "closed by the player",
            Termination::Interrupted => "interrupted",
        };
        f.write_str(text)
    }
}

/// Cloneable handle on a cancellable scope
#[derive(Clone)]
pub struct Lifecycle {
    inner: Arc<Inner>,
}

struct Inner {
    state: watch::Sender<Option<Termination>>,
    children: Mutex<Vec<Weak<Inner>>>,
}

impl Lifecycle {
    /// Create a root scope
    pub fn new() -> Self {
        let (state, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                state,
                children: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Derive a scope that ends when this one ends.
    ///
    /// Deriving from a scope that already ended gives an ended scope.
    pub fn child(&self) -> Self {
        let child = Lifecycle::new();
        let mut children = self.children();
        if self.is_done() {
            child.finish(Termination::ParentDone);
        } else {
            children.retain(|c| c.strong_count() > 0);
            children.push(Arc::downgrade(&child.inner));
        }
        child
    }

    /// End this scope (and its children) on behalf of its holder
    pub fn cancel(&self) {
        self.finish(Termination::Cancelled);
    }

    /// End the scope with `termination`. Only the first call has any effect;
    /// returns whether this call was it.
    pub(crate) fn finish(&self, termination: Termination) -> bool {
        let first = self.inner.state.send_if_modified(|state| {
            if state.is_some() {
                return false;
            }
            *state = Some(termination);
            true
        });

        if first {
            let children = std::mem::take(&mut *self.children());
            for child in children.iter().filter_map(Weak::upgrade) {
                Lifecycle { inner: child }.finish(Termination::ParentDone);
            }
        }
        first
    }

    /// How the scope ended, or `None` while it is active
    pub fn termination(&self) -> Option<Termination> {
        *self.inner.state.borrow()
    }

    pub fn is_done(&self) -> bool {
        self.termination().is_some()
    }

    /// Wait until the scope ends
    pub async fn done(&self) -> Termination {
        let mut state = self.inner.state.subscribe();
        loop {
            let current = *state.borrow_and_update();
            if let Some(termination) = current {
                return termination;
            }
            // The sender lives in `self.inner`, so this only fails if it was dropped
            if state.changed().await.is_err() {
                return Termination::Cancelled;
            }
        }
    }

    fn children(&self) -> MutexGuard<'_, Vec<Weak<Inner>>> {
        self.inner
            .children
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lifecycle")
            .field("termination", &self.termination())
            .finish()
    }
}
