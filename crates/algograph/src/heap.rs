//! Indexed binary heap with decrease-key.
//!
//! Payloads are small integers (node table positions). Besides the heap array the structure keeps
//! a reverse index `payload -> heap position`, which is what makes `decrease_key`, `contains` and
//! `remove` cheap. Every swap has to update both moved payloads in that index.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeapOrder {
    /// Smallest key on top.
    #[default]
    Min,
    /// Largest key on top.
    Max,
}

#[derive(Debug, Clone)]
pub struct IndexedHeap<K> {
    order: HeapOrder,
    items: Vec<(K, usize)>,
    positions: Vec<Option<usize>>,
}

fn parent(i: usize) -> usize {
    (i - 1) / 2
}

fn left(i: usize) -> usize {
    2 * i + 1
}

impl<K: Ord> IndexedHeap<K> {
    pub fn new(order: HeapOrder) -> Self {
        Self {
            order,
            items: Vec::new(),
            positions: Vec::new(),
        }
    }

    /// Builds a heap from `(key, payload)` pairs in O(n).
    ///
    /// Payloads must be distinct; a repeated payload keeps only its first occurrence.
    pub fn from_items(order: HeapOrder, items: impl IntoIterator<Item = (K, usize)>) -> Self {
        let mut heap = Self::new(order);
        for (key, payload) in items {
            heap.ensure_payload(payload);
            if heap.positions[payload].is_some() {
                debug_assert!(false, "duplicate heap payload {payload}");
                continue;
            }
            heap.positions[payload] = Some(heap.items.len());
            heap.items.push((key, payload));
        }
        for i in (0..heap.items.len() / 2).rev() {
            heap.sift_down(i);
        }
        heap
    }

    pub fn order(&self) -> HeapOrder {
        self.order
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, payload: usize) -> bool {
        self.position(payload).is_some()
    }

    pub fn key_of(&self, payload: usize) -> Option<&K> {
        self.position(payload).map(|pos| &self.items[pos].0)
    }

    pub fn peek(&self) -> Option<(&K, usize)> {
        self.items.first().map(|(key, payload)| (key, *payload))
    }

    /// Inserts `payload` with `key`. Returns `false` if the payload is already queued.
    pub fn push(&mut self, key: K, payload: usize) -> bool {
        self.ensure_payload(payload);
        if self.positions[payload].is_some() {
            return false;
        }
        let pos = self.items.len();
        self.items.push((key, payload));
        self.positions[payload] = Some(pos);
        self.sift_up(pos);
        true
    }

    pub fn pop(&mut self) -> Option<(K, usize)> {
        if self.items.is_empty() {
            return None;
        }
        let last = self.items.len() - 1;
        self.swap(0, last);
        let (key, payload) = self.items.pop()?;
        self.positions[payload] = None;
        if !self.items.is_empty() {
            self.sift_down(0);
        }
        Some((key, payload))
    }

    /// Moves `payload` toward the top with a better key (lower for `Min`, higher for `Max`).
    ///
    /// Returns `false` and leaves the heap unchanged if the payload is not queued or `key` would
    /// move it away from the top.
    pub fn decrease_key(&mut self, payload: usize, key: K) -> bool {
        let Some(pos) = self.position(payload) else {
            return false;
        };
        if self.precedes(&self.items[pos].0, &key) {
            return false;
        }
        self.items[pos].0 = key;
        self.sift_up(pos);
        true
    }

    /// Removes `payload` wherever it sits, returning its key.
    pub fn remove(&mut self, payload: usize) -> Option<K> {
        let pos = self.position(payload)?;
        let last = self.items.len() - 1;
        self.swap(pos, last);
        let (key, removed) = self.items.pop()?;
        debug_assert_eq!(removed, payload);
        self.positions[removed] = None;
        if pos < self.items.len() {
            let pos = self.sift_up(pos);
            self.sift_down(pos);
        }
        Some(key)
    }

    fn position(&self, payload: usize) -> Option<usize> {
        self.positions.get(payload).copied().flatten()
    }

    fn ensure_payload(&mut self, payload: usize) {
        if payload >= self.positions.len() {
            self.positions.resize(payload + 1, None);
        }
    }

    fn precedes(&self, a: &K, b: &K) -> bool {
        match self.order {
            HeapOrder::Min => a < b,
            HeapOrder::Max => a > b,
        }
    }

    fn swap(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        self.items.swap(i, j);
        self.positions[self.items[i].1] = Some(i);
        self.positions[self.items[j].1] = Some(j);
    }

    fn sift_up(&mut self, mut i: usize) -> usize {
        while i > 0 {
            let p = parent(i);
            if !self.precedes(&self.items[i].0, &self.items[p].0) {
                break;
            }
            self.swap(i, p);
            i = p;
        }
        i
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.items.len();
        loop {
            let l = left(i);
            let r = l + 1;
            let mut top = i;
            if l < len && self.precedes(&self.items[l].0, &self.items[top].0) {
                top = l;
            }
            if r < len && self.precedes(&self.items[r].0, &self.items[top].0) {
                top = r;
            }
            if top == i {
                return;
            }
            self.swap(i, top);
            i = top;
        }
    }
}
