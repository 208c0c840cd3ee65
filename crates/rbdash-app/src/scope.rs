//! View scopes
//!
//! Every activation of the dashboard gets a fresh [`ScopeId`]. Background
//! work started for the dashboard is tagged with it, so results that arrive
//! after the view was left can be recognized and dropped. Tasks are also
//! tracked per scope in a [`ScopeTaskMap`] and aborted when it closes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;

/// Identity of one dashboard activation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u64);

impl ScopeId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for ScopeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "scope#{}", self.0)
    }
}

/// Background tasks grouped by the scope that started them
#[derive(Debug, Clone, Default)]
pub struct ScopeTaskMap {
    inner: Arc<Mutex<HashMap<ScopeId, Vec<JoinHandle<()>>>>>,
}

impl ScopeTaskMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a task under `scope`, pruning tasks that already finished
    pub fn track(&self, scope: ScopeId, handle: JoinHandle<()>) {
        if let Ok(mut map) = self.inner.lock() {
            let handles = map.entry(scope).or_default();
            handles.retain(|h| !h.is_finished());
            handles.push(handle);
        }
    }

    /// Abort every task of `scope`; returns how many were still running
    pub fn abort(&self, scope: ScopeId) -> usize {
        let handles = match self.inner.lock() {
            Ok(mut map) => map.remove(&scope).unwrap_or_default(),
            Err(_) => return 0,
        };

        let mut aborted = 0;
        for handle in handles {
            if !handle.is_finished() {
                handle.abort();
                aborted += 1;
            }
        }
        aborted
    }

    /// Abort everything (shutdown)
    pub fn abort_all(&self) {
        let drained: Vec<_> = match self.inner.lock() {
            Ok(mut map) => map.drain().flat_map(|(_, handles)| handles).collect(),
            Err(_) => return,
        };
        for handle in drained {
            handle.abort();
        }
    }

    /// Number of tracked, unfinished tasks for `scope`
    pub fn running(&self, scope: ScopeId) -> usize {
        self.inner
            .lock()
            .map(|map| {
                map.get(&scope)
                    .map(|handles| handles.iter().filter(|h| !h.is_finished()).count())
                    .unwrap_or(0)
            })
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_scope_ids_increase() {
        let first = ScopeId::new(1);
        assert!(first.next() > first);
        assert_eq!(first.next().to_string(), "scope#2");
    }

    #[tokio::test]
    async fn test_abort_stops_scope_tasks_only() {
        let tasks = ScopeTaskMap::new();
        let a = ScopeId::new(1);
        let b = ScopeId::new(2);

        tasks.track(a, tokio::spawn(tokio::time::sleep(Duration::from_secs(60))));
        tasks.track(b, tokio::spawn(tokio::time::sleep(Duration::from_secs(60))));

        assert_eq!(tasks.abort(a), 1);
        assert_eq!(tasks.running(a), 0);
        assert_eq!(tasks.running(b), 1);

        tasks.abort_all();
        assert_eq!(tasks.running(b), 0);
    }

    #[tokio::test]
    async fn test_abort_unknown_scope() {
        let tasks = ScopeTaskMap::new();
        assert_eq!(tasks.abort(ScopeId::new(7)), 0);
    }
}
