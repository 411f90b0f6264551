use std::hash::Hash;
use rustc_hash::FxHashMap;


/// Heap slot - the item and the priority it is ordered by
#[derive(Debug, Clone)]
struct Entry<T, P> {
    item: T,
    priority: P,
}


/// Indexed binary min-heap
///
/// Array-backed heap plus an item -> slot side table that is rewritten on
/// every swap. The side table makes `contains` O(1) and lets
/// `update_priority` find an item without scanning, so decrease-key costs
/// O(log n) like insert and extract.
///
/// Each item is stored at most once: enqueueing an item that is already
/// present updates its priority instead of adding a duplicate.
/// Operations on absent items are no-ops.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T, P> {
    heap: Vec<Entry<T, P>>,
    slots: FxHashMap<T, usize>,
}

impl<T, P> Default for PriorityQueue<T, P> {
    fn default() -> Self {
        Self {
            heap: Vec::new(),
            slots: FxHashMap::default(),
        }
    }
}

impl<T, P> PriorityQueue<T, P>
where
    T: Eq + Hash + Clone,
    P: PartialOrd + Copy,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            slots: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// O(1) membership test
    pub fn contains(&self, item: &T) -> bool {
        self.slots.contains_key(item)
    }

    /// Current priority of a queued item
    pub fn priority(&self, item: &T) -> Option<P> {
        self.slots.get(item).map(|&slot| self.heap[slot].priority)
    }

    /// Insert an item, or move it to `priority` if it is already queued
    pub fn enqueue(&mut self, item: T, priority: P) {
        if self.slots.contains_key(&item) {
            self.update_priority(&item, priority);
            return;
        }

        let slot = self.heap.len();
        self.slots.insert(item.clone(), slot);
        self.heap.push(Entry { item, priority });
        self.sift_up(slot);
    }

    /// Remove and return the item with the smallest priority
    pub fn dequeue(&mut self) -> Option<T> {
        self.pop().map(|(item, _)| item)
    }

    /// Remove and return the minimum together with its priority
    pub fn pop(&mut self) -> Option<(T, P)> {
        if self.heap.is_empty() {
            return None;
        }

        let last = self.heap.len() - 1;
        self.swap(0, last);
        let Entry { item, priority } = self.heap.pop()?;
        self.slots.remove(&item);

        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((item, priority))
    }

    pub fn peek(&self) -> Option<&T> {
        self.heap.first().map(|entry| &entry.item)
    }

    pub fn peek_priority(&self) -> Option<P> {
        self.heap.first().map(|entry| entry.priority)
    }

    /// Re-prioritise a queued item: sift up on decrease, down on increase
    /// Returns false (and does nothing) if the item is not queued
    pub fn update_priority(&mut self, item: &T, priority: P) -> bool {
        let Some(&slot) = self.slots.get(item) else {
            return false;
        };

        let previous = self.heap[slot].priority;
        self.heap[slot].priority = priority;

        if priority < previous {
            self.sift_up(slot);
        } else {
            self.sift_down(slot);
        }
        true
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.slots.clear();
    }

    /// Swap two heap slots and keep the side table in lockstep
    fn swap(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        self.heap.swap(i, j);
        if let Some(slot) = self.slots.get_mut(&self.heap[i].item) {
            *slot = i;
        }
        if let Some(slot) = self.slots.get_mut(&self.heap[j].item) {
            *slot = j;
        }
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.heap[slot].priority < self.heap[parent].priority {
                self.swap(slot, parent);
                slot = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;

            if left < len && self.heap[left].priority < self.heap[smallest].priority {
                smallest = left;
            }
            if right < len && self.heap[right].priority < self.heap[smallest].priority {
                smallest = right;
            }
            if smallest == slot {
                break;
            }

            self.swap(slot, smallest);
            slot = smallest;
        }
    }
}
