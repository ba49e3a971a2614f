//! Observable value store.
//!
//! A host-side home for the funnel the board edits: hold the current value,
//! replace it, and notify subscribers. Subscribing returns a [`Subscription`]
//! that unsubscribes when dropped, so listeners never outlive their owner.
//!
//! ```ignore
//! let store = Store::new(funnel);
//! let _sub = store.subscribe(|f: &Funnel| println!("{} nodes", f.nodes.len()));
//! let board = Board::new(store.get(), settings, store.setter());
//! ```

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::{Arc, Weak};
use tracing::trace;

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Inner<T> {
    value: T,
    listeners: BTreeMap<u64, Listener<T>>,
    next_id: u64,
}

/// A shared, observable value. Cloning yields another handle to the same store.
pub struct Store<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send + 'static> Store<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                value,
                listeners: BTreeMap::new(),
                next_id: 0,
            })),
        }
    }

    /// Snapshot of the current value
    pub fn get(&self) -> T {
        self.inner.lock().value.clone()
    }

    /// Replace the value and notify every subscriber.
    ///
    /// Listeners run after the lock is released, so they may read or even
    /// set the store themselves.
    pub fn set(&self, value: T) {
        let listeners: Vec<Listener<T>> = {
            let mut inner = self.inner.lock();
            inner.value = value.clone();
            inner.listeners.values().cloned().collect()
        };
        trace!(listeners = listeners.len(), "Store updated");
        for listener in listeners {
            listener(&value);
        }
    }

    /// Derive the next value from the current one. `f` runs without the lock
    /// held, so it may read the store.
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let current = self.get();
        let next = f(&current);
        self.set(next);
    }

    /// Register `listener`; it stays registered while the returned
    /// [`Subscription`] is alive.
    pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let id = {
            let mut inner = self.inner.lock();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.insert(id, Arc::new(listener));
            id
        };

        let weak: Weak<Mutex<Inner<T>>> = Arc::downgrade(&self.inner);
        Subscription {
            dispose: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.lock().listeners.remove(&id);
                }
            })),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }

    /// A change callback that writes into this store, for [`crate::board::Board`]
    pub fn setter(&self) -> Box<dyn FnMut(&T)> {
        let store = self.clone();
        Box::new(move |value: &T| store.set(value.clone()))
    }
}

/// Disposer returned by [`Store::subscribe`].
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    dispose: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Unsubscribe now rather than on drop
    pub fn unsubscribe(mut self) {
        self.run();
    }

    fn run(&mut self) {
        if let Some(dispose) = self.dispose.take() {
            dispose();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run();
    }
}
