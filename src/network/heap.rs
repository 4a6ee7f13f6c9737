use anyhow::{bail, ensure, Result};
use std::marker::PhantomData;

/// Total order used by an [`IndexedPriorityHeap`].
pub trait HeapOrder {
    /// True when key `a` must sit strictly closer to the root than key `b`.
    fn favors(a: f64, b: f64) -> bool;
}

/// Smallest key at the root.
#[derive(Copy, Clone, Debug, Default)]
pub struct Ascending;

/// Largest key at the root.
#[derive(Copy, Clone, Debug, Default)]
pub struct Descending;

impl HeapOrder for Ascending {
    #[inline]
    fn favors(a: f64, b: f64) -> bool {
        a < b
    }
}

impl HeapOrder for Descending {
    #[inline]
    fn favors(a: f64, b: f64) -> bool {
        a > b
    }
}

pub type MinHeap = IndexedPriorityHeap<Ascending>;
pub type MaxHeap = IndexedPriorityHeap<Descending>;

/// Binary heap over the vertex ids `0..universe`, keyed by `f64`.
///
/// Vertex ids are stable external handles; heap slots move around. The two
/// mappings `slots` (slot -> vertex) and `positions` (vertex -> slot) are
/// always updated together. Keys stay readable after a vertex leaves the heap.
#[derive(Clone, Debug)]
pub struct IndexedPriorityHeap<O: HeapOrder> {
    slots: Vec<usize>,
    positions: Vec<Option<usize>>,
    keys: Vec<Option<f64>>,
    _order: PhantomData<O>,
}

impl<O: HeapOrder> IndexedPriorityHeap<O> {
    pub fn with_capacity(universe: usize) -> Self {
        Self {
            slots: Vec::with_capacity(universe),
            positions: vec![None; universe],
            keys: vec![None; universe],
            _order: PhantomData,
        }
    }

    pub fn universe(&self) -> usize {
        self.positions.len()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, vertex: usize) -> bool {
        matches!(self.positions.get(vertex), Some(Some(_)))
    }

    /// Last key stored for `vertex`, whether or not it is still queued.
    pub fn value(&self, vertex: usize) -> Option<f64> {
        self.keys.get(vertex).copied().flatten()
    }

    pub fn peek_root(&self) -> Option<usize> {
        self.slots.first().copied()
    }

    pub fn insert(&mut self, vertex: usize, key: f64) -> Result<()> {
        ensure!(
            vertex < self.universe(),
            "vertex {} outside heap universe of {}",
            vertex,
            self.universe()
        );
        ensure!(!self.contains(vertex), "vertex {} already queued", vertex);

        let slot = self.slots.len();
        self.slots.push(vertex);
        self.positions[vertex] = Some(slot);
        self.keys[vertex] = Some(key);
        self.sift_up(slot);
        Ok(())
    }

    /// Replaces the key of a queued vertex when `key` is strictly better.
    /// A worse key leaves the stored one untouched.
    pub fn decrease_key(&mut self, vertex: usize, key: f64) -> Result<()> {
        let Some(slot) = self.positions.get(vertex).copied().flatten() else {
            bail!("decrease_key on vertex {} which is not queued", vertex);
        };
        if O::favors(key, self.key_at(slot)) {
            self.keys[vertex] = Some(key);
        }
        self.sift_up(slot);
        Ok(())
    }

    pub fn delete_root(&mut self) -> Option<usize> {
        let root = self.peek_root()?;
        let last = self.slots.pop()?;
        self.positions[root] = None;
        if !self.slots.is_empty() {
            self.slots[0] = last;
            self.positions[last] = Some(0);
            self.sift_down(0);
        }
        Some(root)
    }

    // Present vertices always carry a key.
    fn key_at(&self, slot: usize) -> f64 {
        self.keys[self.slots[slot]].unwrap_or(f64::NAN)
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if !O::favors(self.key_at(slot), self.key_at(parent)) {
                break;
            }
            self.swap_slots(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        loop {
            let left = 2 * slot + 1;
            if left >= self.slots.len() {
                break;
            }
            let right = left + 1;
            let mut best = left;
            if right < self.slots.len() && O::favors(self.key_at(right), self.key_at(left)) {
                best = right;
            }
            if !O::favors(self.key_at(best), self.key_at(slot)) {
                break;
            }
            self.swap_slots(slot, best);
            slot = best;
        }
    }

    fn swap_slots(&mut self, i: usize, j: usize) {
        self.slots.swap(i, j);
        self.positions[self.slots[i]] = Some(i);
        self.positions[self.slots[j]] = Some(j);
    }

    #[cfg(test)]
    fn assert_consistent(&self) {
        for (slot, &v) in self.slots.iter().enumerate() {
            assert_eq!(self.positions[v], Some(slot), "position index out of sync for {}", v);
            if slot > 0 {
                let parent = (slot - 1) / 2;
                assert!(
                    !O::favors(self.key_at(slot), self.key_at(parent)),
                    "heap order violated at slot {}",
                    slot
                );
            }
        }
        let queued = self.positions.iter().filter(|p| p.is_some()).count();
        assert_eq!(queued, self.slots.len());
    }
}
