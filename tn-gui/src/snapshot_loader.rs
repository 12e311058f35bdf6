use std::sync::{Arc, Mutex};

use lru::LruCache;
use poll_promise::Promise;
use tn_core::{
    graph::Graph,
    snapshot::{SnapshotError, SnapshotSource},
};
use tracing::debug;

pub type SnapshotPromise = Arc<Mutex<Promise<Result<Graph, SnapshotError>>>>;

/// Resolves snapshot assets off the UI thread and memoises the promise per
/// index, so repeated clicks on the same time step read the asset once.
pub struct SnapshotLoader {
    source: Arc<dyn SnapshotSource>,
    cache: LruCache<usize, SnapshotPromise>,
}

impl SnapshotLoader {
    pub fn new(source: Arc<dyn SnapshotSource>) -> Self {
        SnapshotLoader {
            source,
            cache: LruCache::unbounded(),
        }
    }

    pub fn count(&self) -> usize {
        self.source.count()
    }

    pub fn fetch(&mut self, index: usize) -> SnapshotPromise {
        let source = Arc::clone(&self.source);
        self.cache
            .get_or_insert(index, || {
                Arc::new(Mutex::new(crate::spawn!("snapshot", move || {
                    debug!(index, "resolving snapshot asset");
                    source.fetch(index)
                })))
            })
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use tn_core::{
        graph::{Graph, Node, NodeId},
        snapshot::{SnapshotError, SnapshotSource},
    };

    use super::SnapshotLoader;

    struct CountingSource(AtomicUsize);

    impl SnapshotSource for CountingSource {
        fn count(&self) -> usize {
            1
        }

        fn fetch(&self, index: usize) -> Result<Graph, SnapshotError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            if index == 0 {
                Ok(Graph::from_parts([Node::new(1, "a")], vec![]))
            } else {
                Err(SnapshotError::OutOfRange { index, count: 1 })
            }
        }
    }

    #[test]
    fn memoises_resolutions_per_index() {
        let source = Arc::new(CountingSource(AtomicUsize::new(0)));
        let mut loader = SnapshotLoader::new(source.clone());

        let first = loader.fetch(0);
        first.lock().unwrap().block_until_ready();
        let second = loader.fetch(0);
        let guard = second.lock().unwrap();
        let resolved = guard.block_until_ready().as_ref().unwrap().clone();

        assert!(resolved.contains(NodeId(1)));
        assert_eq!(source.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failures_resolve_to_error_values() {
        let mut loader = SnapshotLoader::new(Arc::new(CountingSource(AtomicUsize::new(0))));
        let promise = loader.fetch(9);
        let guard = promise.lock().unwrap();
        assert_eq!(
            guard.block_until_ready().as_ref().unwrap_err(),
            &SnapshotError::OutOfRange { index: 9, count: 1 }
        );
    }
}
