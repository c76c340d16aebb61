//! The open set: an indexed binary min-heap. A side table maps each member to its slot in the
//! heap so membership is a hash lookup and a key change is a single sift.
use crate::cell::{Cell, VertexId};
use crate::error::{GridError, Result};
use fxhash::FxHashMap;
use std::cmp::Ordering;

/// Priority of a frontier member. Orders by `f_cost` first and then by `(row, column)`, so equal
/// estimates always resolve to the same vertex regardless of insertion order.
#[derive(Clone, Copy, Debug)]
pub struct FrontierKey {
    pub f_cost: f64,
    pub cell: Cell,
}

impl Eq for FrontierKey {}

impl PartialEq for FrontierKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.f_cost.total_cmp(&other.f_cost) {
            Ordering::Equal => self.cell.cmp(&other.cell),
            s => s,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Frontier {
    heap: Vec<(FrontierKey, VertexId)>,
    positions: FxHashMap<VertexId, usize>,
}

impl Frontier {
    pub fn new() -> Frontier {
        Frontier::default()
    }

    /// Reserves room for `capacity` members up front.
    pub fn try_with_capacity(capacity: usize) -> Result<Frontier> {
        let mut frontier = Frontier::new();
        frontier
            .heap
            .try_reserve(capacity)
            .map_err(|_| GridError::AllocationFailure { vertices: capacity })?;
        frontier
            .positions
            .try_reserve(capacity)
            .map_err(|_| GridError::AllocationFailure { vertices: capacity })?;
        Ok(frontier)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, id: VertexId) -> bool {
        self.positions.contains_key(&id)
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.positions.clear();
    }

    /// Inserts a vertex that is not yet a member. Returns [false] and leaves the frontier
    /// untouched if it already is; use [update_key](Self::update_key) for those.
    pub fn push(&mut self, id: VertexId, key: FrontierKey) -> bool {
        if self.contains(id) {
            return false;
        }
        let slot = self.heap.len();
        self.heap.push((key, id));
        self.positions.insert(id, slot);
        self.sift_up(slot);
        true
    }

    /// Smallest member without removing it.
    pub fn peek_min(&self) -> Option<VertexId> {
        self.heap.first().map(|&(_, id)| id)
    }

    /// Removes and returns the member with the smallest key.
    pub fn pop_min(&mut self) -> Option<VertexId> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let (_, id) = self.heap.pop()?;
        self.positions.remove(&id);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(id)
    }

    /// Replaces the key of a member after its cost changed. Returns [false] if `id` is not a
    /// member.
    pub fn update_key(&mut self, id: VertexId, key: FrontierKey) -> bool {
        let Some(&slot) = self.positions.get(&id) else {
            return false;
        };
        let old = std::mem::replace(&mut self.heap[slot].0, key);
        match key.cmp(&old) {
            Ordering::Less => self.sift_up(slot),
            Ordering::Greater => self.sift_down(slot),
            Ordering::Equal => {}
        }
        true
    }

    /// Members in heap order, which is unspecified apart from the minimum coming first.
    pub fn iter(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.heap.iter().map(|&(_, id)| id)
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.positions.insert(self.heap[a].1, a);
        self.positions.insert(self.heap[b].1, b);
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.heap[slot].0 >= self.heap[parent].0 {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let n = self.heap.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;
            if left < n && self.heap[left].0 < self.heap[smallest].0 {
                smallest = left;
            }
            if right < n && self.heap[right].0 < self.heap[smallest].0 {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn key(f_cost: f64, row: usize, column: usize) -> FrontierKey {
        FrontierKey {
            f_cost,
            cell: Cell::new(row, column),
        }
    }

    #[test]
    fn pops_in_cost_order() {
        let mut frontier = Frontier::new();
        for (i, f) in [5.0, 1.5, 3.0, 0.5, 4.0].into_iter().enumerate() {
            assert!(frontier.push(VertexId(i), key(f, 0, i)));
        }
        let order: Vec<_> = std::iter::from_fn(|| frontier.pop_min()).collect();
        assert_eq!(
            order,
            vec![VertexId(3), VertexId(1), VertexId(2), VertexId(4), VertexId(0)]
        );
        assert!(frontier.is_empty());
        assert_eq!(frontier.pop_min(), None);
    }

    /// Equal costs are resolved by the lowest (row, column), not by insertion order.
    #[test]
    fn ties_break_on_cell() {
        let mut frontier = Frontier::new();
        frontier.push(VertexId(10), key(2.0, 1, 0));
        frontier.push(VertexId(11), key(2.0, 0, 3));
        frontier.push(VertexId(12), key(2.0, 0, 1));
        assert_eq!(frontier.pop_min(), Some(VertexId(12)));
        assert_eq!(frontier.pop_min(), Some(VertexId(11)));
        assert_eq!(frontier.pop_min(), Some(VertexId(10)));
    }

    #[test]
    fn membership_follows_push_and_pop() {
        let mut frontier = Frontier::new();
        frontier.push(VertexId(1), key(1.0, 0, 1));
        frontier.push(VertexId(2), key(2.0, 0, 2));
        assert!(frontier.contains(VertexId(1)));
        assert!(!frontier.contains(VertexId(3)));
        frontier.pop_min();
        assert!(!frontier.contains(VertexId(1)));
        assert!(frontier.contains(VertexId(2)));
        assert_eq!(frontier.len(), 1);
        assert_eq!(frontier.iter().collect::<Vec<_>>(), vec![VertexId(2)]);
    }

    #[test]
    fn update_key_reorders() {
        let mut frontier = Frontier::new();
        for i in 0..6 {
            frontier.push(VertexId(i), key(10.0 + i as f64, 0, i));
        }
        assert!(frontier.update_key(VertexId(5), key(1.0, 0, 5)));
        assert_eq!(frontier.peek_min(), Some(VertexId(5)));
        assert!(frontier.update_key(VertexId(5), key(20.0, 0, 5)));
        assert!(frontier.update_key(VertexId(0), key(30.0, 0, 0)));
        let order: Vec<_> = std::iter::from_fn(|| frontier.pop_min()).collect();
        assert_eq!(
            order,
            vec![
                VertexId(1),
                VertexId(2),
                VertexId(3),
                VertexId(4),
                VertexId(5),
                VertexId(0)
            ]
        );
        assert!(!frontier.update_key(VertexId(0), key(0.0, 0, 0)));
    }

    #[test]
    fn unsatisfiable_capacity_is_an_error() {
        assert!(matches!(
            Frontier::try_with_capacity(usize::MAX),
            Err(GridError::AllocationFailure { .. })
        ));
    }

    #[test]
    fn clear_empties() {
        let mut frontier = Frontier::try_with_capacity(4).unwrap();
        frontier.push(VertexId(0), key(0.0, 0, 0));
        frontier.clear();
        assert!(frontier.is_empty());
        assert!(!frontier.contains(VertexId(0)));
    }
}
