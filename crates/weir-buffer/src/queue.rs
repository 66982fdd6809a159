//! FIFO hand-off queue between the staging pipeline and the scheduler.

use indexmap::IndexSet;

/// Observations staged to cold and planned, awaiting scheduling.
///
/// FIFO over observation names with set semantics: enqueueing a name
/// already present is a no-op, so replaying a completion event cannot
/// produce a duplicate entry. The planner is the only producer — it
/// enqueues exactly once, after attaching the plan — and the
/// scheduler is the only consumer.
#[derive(Clone, Debug, Default)]
pub struct ProcessingQueue {
    entries: IndexSet<String>,
}

impl ProcessingQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an observation name.
    ///
    /// Returns `true` if the name was newly added, `false` if it was
    /// already queued (the queue is unchanged, order included).
    pub fn enqueue(&mut self, observation: impl Into<String>) -> bool {
        self.entries.insert(observation.into())
    }

    /// Remove and return the oldest queued name.
    pub fn dequeue(&mut self) -> Option<String> {
        self.entries.shift_remove_index(0)
    }

    /// The oldest queued name, without removing it.
    pub fn peek(&self) -> Option<&str> {
        self.entries.first().map(String::as_str)
    }

    /// Whether a name is currently queued.
    pub fn contains(&self, observation: &str) -> bool {
        self.entries.contains(observation)
    }

    /// Number of queued names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Queued names, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dequeues_in_fifo_order() {
        let mut q = ProcessingQueue::new();
        assert!(q.enqueue("a"));
        assert!(q.enqueue("b"));
        assert!(q.enqueue("c"));
        assert_eq!(q.dequeue().as_deref(), Some("a"));
        assert_eq!(q.dequeue().as_deref(), Some("b"));
        assert_eq!(q.dequeue().as_deref(), Some("c"));
        assert_eq!(q.dequeue(), None);
    }

    #[test]
    fn enqueue_is_idempotent() {
        let mut q = ProcessingQueue::new();
        assert!(q.enqueue("a"));
        assert!(q.enqueue("b"));
        assert!(!q.enqueue("a"));
        assert_eq!(q.len(), 2);
        // Re-enqueue did not move "a" behind "b".
        assert_eq!(q.peek(), Some("a"));
    }

    #[test]
    fn empty_queue_reports_empty() {
        let mut q = ProcessingQueue::new();
        assert!(q.is_empty());
        assert_eq!(q.peek(), None);
        q.enqueue("a");
        assert!(!q.is_empty());
        assert!(q.contains("a"));
        q.dequeue();
        assert!(q.is_empty());
    }

    #[test]
    fn iter_walks_oldest_first() {
        let mut q = ProcessingQueue::new();
        for name in ["z", "y", "x"] {
            q.enqueue(name);
        }
        let order: Vec<&str> = q.iter().collect();
        assert_eq!(order, ["z", "y", "x"]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Dequeue order is first-enqueue order of the distinct
            /// names, however many duplicate enqueues happen.
            #[test]
            fn fifo_over_distinct_names(names in prop::collection::vec("[a-d]", 0..32)) {
                let mut q = ProcessingQueue::new();
                let mut expected: Vec<String> = Vec::new();
                for name in &names {
                    if q.enqueue(name.clone()) {
                        expected.push(name.clone());
                    }
                }
                let mut drained = Vec::new();
                while let Some(n) = q.dequeue() {
                    drained.push(n);
                }
                prop_assert_eq!(drained, expected);
            }
        }
    }
}
