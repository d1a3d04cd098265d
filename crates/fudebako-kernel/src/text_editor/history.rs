//! Per-path undo history.
//!
//! Prior contents are kept as raw bytes, so files that are not UTF-8 can be
//! overwritten and restored exactly. Each path gets its own stack behind its own mutex, so
//! edits to unrelated files never wait on each other. Destructive handlers
//! run their whole read/push/write sequence inside [`HistoryStore::with_stack`],
//! which makes that sequence atomic relative to any other mutator of the same
//! path.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;

type Stack = Arc<Mutex<Vec<Vec<u8>>>>;

/// Concurrency-safe map from file path to its stack of prior contents.
///
/// The last element of a stack is the most recent prior state. Slots are
/// created on first use and never removed: a removed slot could be recreated
/// while another caller still holds the old one, leaving two mutexes for one
/// path.
#[derive(Debug, Default)]
pub struct HistoryStore {
    stacks: DashMap<PathBuf, Stack>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with exclusive access to `path`'s stack, creating it if needed.
    ///
    /// The map shard is released before the path mutex is taken, so a long
    /// operation on one path does not hold up lookups of other paths.
    pub fn with_stack<R>(&self, path: &Path, f: impl FnOnce(&mut Vec<Vec<u8>>) -> R) -> R {
        let slot = self.slot(path);
        let mut stack = slot.lock();
        f(&mut stack)
    }

    /// Like [`with_stack`](Self::with_stack), but returns `None` without
    /// creating anything when `path` has never been recorded.
    pub fn with_existing<R>(
        &self,
        path: &Path,
        f: impl FnOnce(&mut Vec<Vec<u8>>) -> R,
    ) -> Option<R> {
        let slot = self.stacks.get(path).map(|s| Arc::clone(s.value()))?;
        let mut stack = slot.lock();
        Some(f(&mut stack))
    }

    /// Number of undoable states recorded for `path`.
    pub fn depth(&self, path: &Path) -> usize {
        self.with_existing(path, |stack| stack.len()).unwrap_or(0)
    }

    /// The state the next undo of `path` would restore.
    pub fn peek(&self, path: &Path) -> Option<Vec<u8>> {
        self.with_existing(path, |stack| stack.last().cloned()).flatten()
    }

    /// Whether `path` has a slot, i.e. a destructive handler has run on it.
    pub fn is_tracked(&self, path: &Path) -> bool {
        self.stacks.contains_key(path)
    }

    /// Paths with at least one undoable state.
    pub fn paths(&self) -> Vec<PathBuf> {
        let slots: Vec<(PathBuf, Stack)> = self
            .stacks
            .iter()
            .map(|entry| (entry.key().clone(), Arc::clone(entry.value())))
            .collect();
        slots
            .into_iter()
            .filter(|(_, stack)| !stack.lock().is_empty())
            .map(|(path, _)| path)
            .collect()
    }

    fn slot(&self, path: &Path) -> Stack {
        if let Some(slot) = self.stacks.get(path) {
            return Arc::clone(slot.value());
        }
        Arc::clone(self.stacks.entry(path.to_path_buf()).or_default().value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_order() {
        let store = HistoryStore::new();
        let path = Path::new("/tmp/a.txt");

        store.with_stack(path, |s| s.push(b"one".to_vec()));
        store.with_stack(path, |s| s.push(b"two".to_vec()));
        assert_eq!(store.depth(path), 2);
        assert_eq!(store.peek(path).as_deref(), Some(&b"two"[..]));

        let popped = store.with_existing(path, |s| s.pop()).flatten();
        assert_eq!(popped.as_deref(), Some(&b"two"[..]));
        assert_eq!(store.depth(path), 1);
    }

    #[test]
    fn test_with_existing_does_not_create() {
        let store = HistoryStore::new();
        let path = Path::new("/never/touched");

        assert!(store.with_existing(path, |s| s.len()).is_none());
        assert_eq!(store.depth(path), 0);
        assert!(store.peek(path).is_none());
        assert!(store.paths().is_empty());
        assert!(!store.is_tracked(path));
    }

    #[test]
    fn test_paths_skips_exhausted() {
        let store = HistoryStore::new();
        store.with_stack(Path::new("/a"), |s| s.push(b"x".to_vec()));
        store.with_stack(Path::new("/b"), |s| s.push(b"y".to_vec()));
        store.with_existing(Path::new("/b"), |s| s.pop());

        assert_eq!(store.paths(), vec![PathBuf::from("/a")]);
    }

    #[test]
    fn test_concurrent_pushes_same_path() {
        let store = Arc::new(HistoryStore::new());
        let path = PathBuf::from("/shared");

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                let path = path.clone();
                std::thread::spawn(move || {
                    for j in 0..100 {
                        store.with_stack(&path, |s| s.push(format!("{i}-{j}").into_bytes()));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(store.depth(&path), 800);
    }
}
