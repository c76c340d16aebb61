use crate::cell::VertexId;
use crate::error::{GridError, Result};
use fxhash::FxBuildHasher;
use indexmap::IndexSet;

type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// The closed set. Membership only; vertices are never removed during a run. Insertion order is
/// kept, which is the order vertices were finalized in.
#[derive(Clone, Debug, Default)]
pub struct Visited {
    set: FxIndexSet<VertexId>,
}

impl Visited {
    pub fn new() -> Visited {
        Visited::default()
    }

    /// Reserves room for `capacity` vertices up front.
    pub fn try_with_capacity(capacity: usize) -> Result<Visited> {
        let mut set = FxIndexSet::with_hasher(FxBuildHasher::default());
        set.try_reserve(capacity)
            .map_err(|_| GridError::AllocationFailure { vertices: capacity })?;
        Ok(Visited { set })
    }

    /// Returns [false] if `id` was already finalized.
    pub fn insert(&mut self, id: VertexId) -> bool {
        self.set.insert(id)
    }

    pub fn contains(&self, id: VertexId) -> bool {
        self.set.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn clear(&mut self) {
        self.set.clear();
    }

    /// Finalized vertices, earliest first.
    pub fn order(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.set.iter().copied()
    }
}
