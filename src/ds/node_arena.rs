//! Slab-style arena that owns tree nodes and hands out stable [`NodeId`]s.
//!
//! Tree links are `NodeId`s rather than pointers, so a rotation is a pair of
//! index rewrites with no aliasing or lifetime hazards. Freed slots go on a
//! free list and are reused by later insertions.

/// Stable handle to a node slot inside a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Returns the raw slot index behind this id.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Arena of `T` slots with free-list reuse.
///
/// `len` counts live slots only; vacated slots stay allocated until reused
/// or until [`clear`](NodeArena::clear).
#[derive(Debug)]
pub struct NodeArena<T> {
    slots: Vec<Option<T>>,
    free: Vec<usize>,
    len: usize,
}

impl<T> NodeArena<T> {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Creates an empty arena with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Stores `value` in a free slot and returns its id.
    pub fn insert(&mut self, value: T) -> NodeId {
        self.len += 1;
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(value);
                NodeId(idx)
            }
            None => {
                self.slots.push(Some(value));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Vacates the slot for `id` and returns its value, if live.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        let value = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(value)
    }

    /// Returns a reference to the value at `id`, if live.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    /// Returns a mutable reference to the value at `id`, if live.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.slots.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    /// Returns `true` if `id` refers to a live slot.
    pub fn contains(&self, id: NodeId) -> bool {
        self.slots
            .get(id.0)
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    /// Number of live slots.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no slots are live.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total slot capacity currently allocated.
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Drops every value and resets the arena.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.len = 0;
    }

    /// Iterates over live slots as `(NodeId, &T)` in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|value| (NodeId(idx), value)))
    }
}

impl<T> Default for NodeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}
