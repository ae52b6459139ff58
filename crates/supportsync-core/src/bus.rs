use std::collections::VecDeque;

/// A FIFO queue of published events.
///
/// Producers [`publish`](EventBus::publish) as state changes complete and a
/// single consumer [`drain`](EventBus::drain)s everything pending once per
/// loop iteration. Events come out in the order they went in.
#[derive(Debug)]
pub struct EventBus<E> {
    queue: VecDeque<E>,
    published: u64,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            published: 0,
        }
    }

    /// Enqueue an event at the back of the queue.
    pub fn publish(&mut self, event: E) {
        self.published += 1;
        self.queue.push_back(event);
    }

    /// Remove and return all pending events, preserving insertion order.
    pub fn drain(&mut self) -> Vec<E> {
        self.queue.drain(..).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Total number of events ever published, drained or not.
    pub fn published(&self) -> u64 {
        self.published
    }
}
