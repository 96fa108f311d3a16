//! Observable state container shared by the controllers.

use std::sync::Arc;
use tokio::sync::watch;

/// Single-owner state published to any number of observers.
///
/// Cloning the cell clones the handle, not the state.
#[derive(Debug)]
pub struct StateCell<S> {
    sender: Arc<watch::Sender<S>>,
}

impl<S> Clone for StateCell<S> {
    fn clone(&self) -> Self {
        Self {
            sender: Arc::clone(&self.sender),
        }
    }
}

impl<S: Clone> StateCell<S> {
    pub fn new(initial: S) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> S {
        self.sender.borrow().clone()
    }

    /// Read the current state without cloning it
    pub fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.sender.borrow())
    }

    /// Receiver that observes every later transition
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.sender.subscribe()
    }

    /// Apply one transition and notify observers
    pub fn update<R: Default>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        let mut output = R::default();
        self.sender.send_modify(|state| output = f(state));
        output
    }

    /// Apply a transition that may decline; observers are only notified when
    /// `f` returns true. The check and the change happen under one lock.
    pub fn update_if(&self, f: impl FnOnce(&mut S) -> bool) -> bool {
        self.sender.send_if_modified(f)
    }
}
