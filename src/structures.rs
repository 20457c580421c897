//! Frontier containers used by the search algorithms.
//!
//! - `Stack`: LIFO storage for depth-first search.
//! - `Queue`: FIFO circular buffer for breadth-first search.
//! - `MinHeap`: 1-indexed binary heap ordered by the element's `Ord`.
//! - `PriorityQueue`: `MinHeap` of `(priority, sequence, item)` entries, giving
//!   lowest-priority-first order with first-in-first-out among equal priorities.
//!
//! Every `pop`/`dequeue` on an empty container fails with
//! `SearchError::EmptyContainer`.

use crate::error::SearchError;
use std::cmp::Ordering;

/// A last-in-first-out stack.
#[derive(Clone, Debug)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Stack { items: Vec::new() }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Removes and returns the most recently pushed item.
    pub fn pop(&mut self) -> Result<T, SearchError> {
        self.items.pop().ok_or(SearchError::EmptyContainer("Stack"))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Capacity of a freshly constructed `Queue`.
pub const DEFAULT_QUEUE_CAPACITY: usize = 16;

/// A first-in-first-out queue backed by a growable circular buffer.
///
/// `enqueue` and `dequeue` are amortized O(1). When the buffer is full its
/// capacity doubles and the live elements are copied into the new buffer
/// starting at index 0, so the head is realigned on every growth.
#[derive(Clone, Debug)]
pub struct Queue<T> {
    buf: Vec<Option<T>>,
    head: usize,
    tail: usize,
    size: usize,
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_QUEUE_CAPACITY)
    }

    /// Creates a queue with room for `capacity` elements before the first growth.
    /// A zero capacity is bumped to 1 so doubling always makes progress.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut buf = Vec::with_capacity(capacity);
        buf.resize_with(capacity, || None);
        Queue {
            buf,
            head: 0,
            tail: 0,
            size: 0,
        }
    }

    fn grow(&mut self) {
        let old_capacity = self.buf.len();
        let mut grown: Vec<Option<T>> = Vec::with_capacity(old_capacity * 2);
        for i in 0..self.size {
            grown.push(self.buf[(self.head + i) % old_capacity].take());
        }
        grown.resize_with(old_capacity * 2, || None);
        self.buf = grown;
        self.head = 0;
        self.tail = self.size;
    }

    pub fn enqueue(&mut self, item: T) {
        if self.size == self.buf.len() {
            self.grow();
        }
        self.buf[self.tail] = Some(item);
        self.tail = (self.tail + 1) % self.buf.len();
        self.size += 1;
    }

    /// Removes and returns the oldest element.
    pub fn dequeue(&mut self) -> Result<T, SearchError> {
        if self.size == 0 {
            return Err(SearchError::EmptyContainer("Queue"));
        }
        let item = self.buf[self.head]
            .take()
            .ok_or(SearchError::EmptyContainer("Queue"))?;
        self.head = (self.head + 1) % self.buf.len();
        self.size -= 1;
        Ok(item)
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn len(&self) -> usize {
        self.size
    }

    /// Number of slots in the backing buffer.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A binary min-heap stored 1-indexed: the children of slot `i` live at
/// `2i` and `2i + 1`, and every parent compares `<=` to its children.
#[derive(Clone, Debug)]
pub struct MinHeap<T> {
    // Slot 0 is never used.
    slots: Vec<Option<T>>,
}

impl<T: Ord> MinHeap<T> {
    pub fn new() -> Self {
        MinHeap { slots: vec![None] }
    }

    pub fn len(&self) -> usize {
        self.slots.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn push(&mut self, item: T) {
        self.slots.push(Some(item));
        let last = self.len();
        self.sift_up(last);
    }

    /// Removes and returns the smallest element.
    pub fn pop(&mut self) -> Result<T, SearchError> {
        if self.is_empty() {
            return Err(SearchError::EmptyContainer("MinHeap"));
        }
        let last = self.slots.len() - 1;
        self.slots.swap(1, last);
        let root = self
            .slots
            .pop()
            .flatten()
            .ok_or(SearchError::EmptyContainer("MinHeap"))?;
        if !self.is_empty() {
            self.sift_down(1);
        }
        Ok(root)
    }

    /// Smallest element without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.slots.get(1).and_then(Option::as_ref)
    }

    fn less_or_equal(&self, a: usize, b: usize) -> bool {
        self.slots[a].cmp(&self.slots[b]) != Ordering::Greater
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 1 {
            let parent = i / 2;
            if self.less_or_equal(parent, i) {
                break;
            }
            self.slots.swap(parent, i);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.len();
        while 2 * i <= n {
            let left = 2 * i;
            let right = left + 1;
            let smaller = if right > n || self.less_or_equal(left, right) {
                left
            } else {
                right
            };
            if self.less_or_equal(i, smaller) {
                break;
            }
            self.slots.swap(i, smaller);
            i = smaller;
        }
    }
}

impl<T: Ord> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Heap entry ordering by `(priority, sequence)` only; the payload is never compared.
#[derive(Debug, Clone)]
struct Prioritized<T> {
    priority: f64,
    sequence: u64,
    item: T,
}

impl<T> PartialEq for Prioritized<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Prioritized<T> {}

impl<T> PartialOrd for Prioritized<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Prioritized<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then(self.sequence.cmp(&other.sequence))
    }
}

/// A min-priority queue with stable ordering among equal priorities.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::structures::PriorityQueue;
///
/// let mut pq = PriorityQueue::new();
/// pq.push(2.0, "late");
/// pq.push(1.0, "first");
/// pq.push(2.0, "later");
/// assert_eq!(pq.pop().unwrap(), "first");
/// assert_eq!(pq.pop().unwrap(), "late");
/// assert_eq!(pq.pop().unwrap(), "later");
/// assert!(pq.pop().is_err());
/// ```
#[derive(Clone, Debug)]
pub struct PriorityQueue<T> {
    heap: MinHeap<Prioritized<T>>,
    next_sequence: u64,
}

impl<T> PriorityQueue<T> {
    pub fn new() -> Self {
        PriorityQueue {
            heap: MinHeap::new(),
            next_sequence: 0,
        }
    }

    pub fn push(&mut self, priority: f64, item: T) {
        self.next_sequence += 1;
        self.heap.push(Prioritized {
            priority,
            sequence: self.next_sequence,
            item,
        });
    }

    /// Removes and returns the item with the lowest priority, oldest first on ties.
    pub fn pop(&mut self) -> Result<T, SearchError> {
        self.heap.pop().map(|entry| entry.item)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
