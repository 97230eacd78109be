//! Shared instance registry
//!
//! `InstanceStore<Id, T>` keeps one `Arc<T>` per id plus an optional
//! "current" instance. Clones share the same state, so a store created at
//! start-up can be handed to every component that needs it and cleared in one
//! place on sign-out.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{mpsc, Arc, Mutex, PoisonError, RwLock};

use crate::event::{ChangeEvent, ChangeKind};
use crate::iter::ChangeIterator;

/// Registry of shared instances keyed by id, with a current slot
///
/// # Example
///
/// ```rust
/// use parley_store::{ChangeKind, InstanceStore};
///
/// let store = InstanceStore::<String, u32>::new();
/// let events = store.subscribe();
///
/// let value = store.get_or_insert_with("a".to_string(), || 7);
/// store.set_current("a".to_string(), value);
///
/// assert_eq!(store.current().as_deref(), Some(&7));
/// let kinds: Vec<_> = events.try_iter().map(|e| e.kind).collect();
/// assert_eq!(
///     kinds,
///     vec![
///         ChangeKind::Added("a".to_string()),
///         ChangeKind::CurrentChanged(Some("a".to_string())),
///     ]
/// );
/// ```
pub struct InstanceStore<Id, T>
where
    Id: Clone + Eq + Hash + Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    /// Registered instances: id -> instance
    instances: Arc<RwLock<HashMap<Id, Arc<T>>>>,

    /// Id of the current instance, always present in `instances` when set
    current: Arc<RwLock<Option<Id>>>,

    /// One sender per live subscriber
    subscribers: Arc<Mutex<Vec<mpsc::Sender<ChangeEvent<Id>>>>>,
}

impl<Id, T> InstanceStore<Id, T>
where
    Id: Clone + Eq + Hash + Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            instances: Arc::new(RwLock::new(HashMap::new())),
            current: Arc::new(RwLock::new(None)),
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get the instance registered under `id`
    pub fn get(&self, id: &Id) -> Option<Arc<T>> {
        self.instances.read().ok()?.get(id).cloned()
    }

    /// Get the instance for `id`, creating and registering it if absent
    pub fn get_or_insert_with<F>(&self, id: Id, create: F) -> Arc<T>
    where
        F: FnOnce() -> T,
    {
        if let Some(existing) = self.get(&id) {
            return existing;
        }

        let (instance, inserted) = {
            let mut instances = self
                .instances
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            match instances.get(&id) {
                // Another thread won the race between the read and write lock
                Some(existing) => (Arc::clone(existing), false),
                None => {
                    let instance = Arc::new(create());
                    instances.insert(id.clone(), Arc::clone(&instance));
                    (instance, true)
                }
            }
        };

        if inserted {
            self.emit(ChangeKind::Added(id));
        }
        instance
    }

    /// Register `instance` under `id`, replacing any previous instance
    ///
    /// Returns the replaced instance.
    pub fn insert(&self, id: Id, instance: Arc<T>) -> Option<Arc<T>> {
        let previous = self
            .instances
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.clone(), instance);

        if previous.is_none() {
            self.emit(ChangeKind::Added(id));
        }
        previous
    }

    /// Remove the instance registered under `id`
    ///
    /// If it was current, the current slot is emptied as well.
    pub fn remove(&self, id: &Id) -> Option<Arc<T>> {
        let removed = self
            .instances
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)?;

        self.emit(ChangeKind::Removed(id.clone()));

        let was_current = {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            if current.as_ref() == Some(id) {
                *current = None;
                true
            } else {
                false
            }
        };
        if was_current {
            self.emit(ChangeKind::CurrentChanged(None));
        }

        Some(removed)
    }

    /// Get the current instance
    pub fn current(&self) -> Option<Arc<T>> {
        let id = self.current_id()?;
        self.get(&id)
    }

    /// Get the id of the current instance
    pub fn current_id(&self) -> Option<Id> {
        self.current.read().ok()?.clone()
    }

    /// Make `instance` current, registering it under `id`
    ///
    /// Returns `false` (and emits nothing) if it already was current.
    pub fn set_current(&self, id: Id, instance: Arc<T>) -> bool {
        let already_registered = self
            .get(&id)
            .map(|existing| Arc::ptr_eq(&existing, &instance))
            .unwrap_or(false);

        if !already_registered {
            self.insert(id.clone(), instance);
        }

        {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            if current.as_ref() == Some(&id) && already_registered {
                return false;
            }
            *current = Some(id.clone());
        }

        self.emit(ChangeKind::CurrentChanged(Some(id)));
        true
    }

    /// Empty the current slot, keeping the instance registered
    ///
    /// Returns the id that was current.
    pub fn clear_current(&self) -> Option<Id> {
        let previous = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()?;

        self.emit(ChangeKind::CurrentChanged(None));
        Some(previous)
    }

    /// Drop every instance and the current slot
    pub fn clear(&self) {
        self.instances
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        self.emit(ChangeKind::Cleared);
    }

    /// Ids of all registered instances
    pub fn ids(&self) -> Vec<Id> {
        self.instances
            .read()
            .map(|instances| instances.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// All registered instances
    pub fn instances(&self) -> Vec<Arc<T>> {
        self.instances
            .read()
            .map(|instances| instances.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.instances
            .read()
            .map(|instances| instances.contains_key(id))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.instances.read().map(|i| i.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Subscribe to change events emitted from now on
    pub fn subscribe(&self) -> ChangeIterator<Id> {
        let (tx, rx) = mpsc::channel();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        ChangeIterator::new(rx)
    }

    /// Number of live subscribers as of the last emit
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|s| s.len()).unwrap_or(0)
    }

    /// Send an event to every subscriber, dropping the ones that went away
    fn emit(&self, kind: ChangeKind<Id>) {
        let event = ChangeEvent::new(kind);
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

impl<Id, T> Default for InstanceStore<Id, T>
where
    Id: Clone + Eq + Hash + Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<Id, T> Clone for InstanceStore<Id, T>
where
    Id: Clone + Eq + Hash + Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            instances: Arc::clone(&self.instances),
            current: Arc::clone(&self.current),
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}

impl<Id, T> std::fmt::Debug for InstanceStore<Id, T>
where
    Id: Clone + Eq + Hash + Send + Sync + std::fmt::Debug + 'static,
    T: Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstanceStore")
            .field("len", &self.len())
            .field("current", &self.current_id())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn kinds(iter: &ChangeIterator<String>) -> Vec<ChangeKind<String>> {
        iter.try_iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_get_or_insert_creates_once() {
        let store = InstanceStore::<String, u32>::new();
        let mut calls = 0;

        let first = store.get_or_insert_with("a".to_string(), || {
            calls += 1;
            1
        });
        let second = store.get_or_insert_with("a".to_string(), || 2);

        assert_eq!(calls, 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_set_current_emits_once() {
        let store = InstanceStore::<String, u32>::new();
        let events = store.subscribe();
        let instance = Arc::new(5);

        assert!(store.set_current("a".to_string(), Arc::clone(&instance)));
        assert!(!store.set_current("a".to_string(), instance));

        assert_eq!(
            kinds(&events),
            vec![
                ChangeKind::Added("a".to_string()),
                ChangeKind::CurrentChanged(Some("a".to_string())),
            ]
        );
    }

    #[test]
    fn test_set_current_with_new_instance_under_same_id() {
        let store = InstanceStore::<String, u32>::new();
        store.set_current("a".to_string(), Arc::new(1));
        assert!(store.set_current("a".to_string(), Arc::new(2)));
        assert_eq!(store.current().as_deref(), Some(&2));
    }

    #[test]
    fn test_remove_current_empties_slot() {
        let store = InstanceStore::<String, u32>::new();
        store.set_current("a".to_string(), Arc::new(1));
        let events = store.subscribe();

        assert!(store.remove(&"a".to_string()).is_some());
        assert!(store.current().is_none());
        assert_eq!(
            kinds(&events),
            vec![
                ChangeKind::Removed("a".to_string()),
                ChangeKind::CurrentChanged(None),
            ]
        );
    }

    #[test]
    fn test_remove_missing_is_silent() {
        let store = InstanceStore::<String, u32>::new();
        let events = store.subscribe();

        assert!(store.remove(&"nope".to_string()).is_none());
        assert!(events.recv_timeout(Duration::from_millis(20)).is_none());
    }

    #[test]
    fn test_clear_current_keeps_instance() {
        let store = InstanceStore::<String, u32>::new();
        store.set_current("a".to_string(), Arc::new(1));

        assert_eq!(store.clear_current(), Some("a".to_string()));
        assert!(store.current().is_none());
        assert!(store.contains(&"a".to_string()));
        assert_eq!(store.clear_current(), None);
    }

    #[test]
    fn test_clear_drops_everything() {
        let store = InstanceStore::<String, u32>::new();
        store.set_current("a".to_string(), Arc::new(1));
        store.insert("b".to_string(), Arc::new(2));
        let events = store.subscribe();

        store.clear();

        assert!(store.is_empty());
        assert!(store.current_id().is_none());
        assert_eq!(kinds(&events), vec![ChangeKind::Cleared]);
    }

    #[test]
    fn test_every_subscriber_sees_events() {
        let store = InstanceStore::<String, u32>::new();
        let first = store.subscribe();
        let second = store.subscribe();

        store.insert("a".to_string(), Arc::new(1));

        assert_eq!(kinds(&first), vec![ChangeKind::Added("a".to_string())]);
        assert_eq!(kinds(&second), vec![ChangeKind::Added("a".to_string())]);
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let store = InstanceStore::<String, u32>::new();
        let kept = store.subscribe();
        drop(store.subscribe());
        assert_eq!(store.subscriber_count(), 2);

        store.insert("a".to_string(), Arc::new(1));

        assert_eq!(store.subscriber_count(), 1);
        assert_eq!(kinds(&kept).len(), 1);
    }

    #[test]
    fn test_clone_shares_state() {
        let store = InstanceStore::<String, u32>::new();
        let cloned = store.clone();

        store.set_current("a".to_string(), Arc::new(9));
        assert_eq!(cloned.current().as_deref(), Some(&9));
    }
}
