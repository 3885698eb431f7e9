//! Splay tree with per-node stale-side recency markers.
//!
//! This is the engine behind [`PseudoLruIndex`](crate::policy::pseudo_lru::PseudoLruIndex):
//! a self-adjusting binary search tree where every committed search splays
//! its target to the root, and every node it passes through records which
//! child subtree was *not* on the access path. Those one-bit markers are a
//! cheap recency proxy; following them from the root finds an eviction
//! candidate that is very likely among the least recently touched entries,
//! with no access-order list and no timestamps.
//!
//! ## Architecture
//!
//! ```text
//!   SplayTree<K, V>
//!   ┌──────────────────────────────────────────────────────────┐
//!   │  arena: NodeArena<Node<K, V>>      root: Option<NodeId>  │
//!   │                                                          │
//!   │  Node { key, value, left, right, stale: StaleSide }      │
//!   │                                                          │
//!   │            (8)·R            stale side = the child NOT   │
//!   │           /     \           on the most recent descent   │
//!   │        (4)·L    (10)·L      through this node            │
//!   │       /    \                                             │
//!   │    (2)·R   (6)·L  ◄── stale scan: follow markers down,   │
//!   │                       stop where the marked child is     │
//!   │                       absent; that node is the eviction  │
//!   │                       candidate                          │
//!   └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Splay discipline
//!
//! The descent records the root-to-target path on an explicit heap stack,
//! then rotates bottom-up in pairs: the edge at the target's parent first,
//! then the edge at its grandparent (zig-zig uses two same-direction
//! rotations innermost-first, zig-zag two opposite ones), with a final
//! single zig when the target ends one level below the root. A lookup that
//! misses writes nothing at all: no rotations and no marker updates. A
//! forced descent (insertion) splays the deepest visited node instead.
//!
//! ## Performance
//!
//! - `get` / `insert` / `remove` / `pop_lru`: O(log n) amortized, O(n)
//!   worst case. The insertion attach step and the removal join do not
//!   re-splay, so the classical amortized bound is a benchmark goal here,
//!   not an asserted guarantee.
//! - `peek` / `len` / `is_empty`: O(1).
//! - No recursion anywhere; descent, restructure, and teardown all use
//!   iteration or explicit stacks, so pathological tree heights cannot
//!   overflow the call stack.
//!
//! ## Thread Safety
//!
//! Not thread-safe; all operations take `&mut self` or rely on exclusive
//! access. Wrap in external synchronization for concurrent use (see
//! `ConcurrentPseudoLruIndex` under the `concurrency` feature).

use std::cmp::Ordering;
use std::fmt::{Debug, Formatter};

use crate::ds::node_arena::{NodeArena, NodeId};
use crate::error::InvariantError;

/// Which child subtree was *not* part of the most recent access path
/// through a node.
///
/// Updated only while a committed splay descent passes through the node;
/// never used to reorder the tree, only to steer the eviction scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleSide {
    /// The left subtree was not on the most recent access path.
    Left,
    /// The right subtree was not on the most recent access path.
    Right,
}

impl StaleSide {
    /// Returns the other side.
    #[inline]
    pub fn opposite(self) -> StaleSide {
        match self {
            StaleSide::Left => StaleSide::Right,
            StaleSide::Right => StaleSide::Left,
        }
    }
}

struct Node<K, V> {
    key: K,
    value: V,
    left: Option<NodeId>,
    right: Option<NodeId>,
    stale: StaleSide,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            // Matches a fresh node never having been passed over on either
            // side; Left is the scan's first preference.
            stale: StaleSide::Left,
        }
    }

    fn child(&self, side: StaleSide) -> Option<NodeId> {
        match side {
            StaleSide::Left => self.left,
            StaleSide::Right => self.right,
        }
    }
}

/// Self-adjusting BST with stale-side recency markers.
///
/// Keys are unique under `K: Ord`; a duplicate insert is a silent no-op
/// that keeps the original value. After any hit (`get`) or insert, the
/// touched entry is the root.
///
/// # Example
///
/// ```
/// use splaylru::ds::SplayTree;
///
/// let mut tree = SplayTree::new();
/// tree.insert(10, "ten");
/// tree.insert(15, "fifteen");
/// assert_eq!(tree.get(&10), Some(&"ten"));
/// // the hit splayed 10 to the root
/// assert_eq!(tree.peek(), Some((&10, &"ten")));
/// ```
pub struct SplayTree<K, V> {
    arena: NodeArena<Node<K, V>>,
    root: Option<NodeId>,
}

impl<K, V> SplayTree<K, V> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            arena: NodeArena::new(),
            root: None,
        }
    }

    /// Creates an empty tree with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: NodeArena::with_capacity(capacity),
            root: None,
        }
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the tree holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the root entry without touching the tree.
    ///
    /// The root is always the most recently touched entry, so this doubles
    /// as a most-recently-used peek.
    pub fn peek(&self) -> Option<(&K, &V)> {
        let node = self.arena.get(self.root?)?;
        Some((&node.key, &node.value))
    }

    /// Returns the entry the stale-side scan currently points at, without
    /// restructuring or marker updates.
    pub fn peek_lru_candidate(&self) -> Option<(&K, &V)> {
        let id = self.stale_frontier_path()?.pop()?;
        let node = self.arena.get(id)?;
        Some((&node.key, &node.value))
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    /// In-order iterator over `(&K, &V)`, smallest key first.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter {
            tree: self,
            stack: Vec::new(),
        };
        iter.push_left_spine(self.root);
        iter
    }

    /// Walks the stale markers from the root and returns the full path to
    /// the eviction candidate: while the marked side has a child, follow
    /// it; stop at the first node whose marked side is absent.
    fn stale_frontier_path(&self) -> Option<Vec<NodeId>> {
        let mut cur = self.root?;
        let mut path = vec![cur];
        loop {
            let node = self.arena.get(cur)?;
            match node.child(node.stale) {
                Some(next) => {
                    cur = next;
                    path.push(cur);
                }
                None => return Some(path),
            }
        }
    }

    fn which_child(&self, parent: NodeId, child: NodeId) -> Option<StaleSide> {
        let node = self.arena.get(parent)?;
        if node.left == Some(child) {
            Some(StaleSide::Left)
        } else if node.right == Some(child) {
            Some(StaleSide::Right)
        } else {
            None
        }
    }

    fn set_child(&mut self, id: NodeId, side: StaleSide, child: Option<NodeId>) {
        if let Some(node) = self.arena.get_mut(id) {
            match side {
                StaleSide::Left => node.left = child,
                StaleSide::Right => node.right = child,
            }
        }
    }

    fn set_stale(&mut self, id: NodeId, side: StaleSide) {
        if let Some(node) = self.arena.get_mut(id) {
            node.stale = side;
        }
    }

    /// Single rotation at `id` promoting its child on `side`; returns the
    /// new subtree root. The caller rewires the parent link.
    fn rotate(&mut self, id: NodeId, side: StaleSide) -> Option<NodeId> {
        let child = self.arena.get(id)?.child(side)?;
        let inner = self.arena.get(child)?.child(side.opposite());
        self.set_child(id, side, inner);
        self.set_child(child, side.opposite(), Some(id));
        Some(child)
    }

    /// Splays the last node of `path` (root..target) to the root.
    ///
    /// First stamps the stale markers: every node the descent moved through
    /// records the side it did *not* take; `missed_toward` carries the
    /// direction attempted out of the final node when the descent ran off
    /// the tree (forced splay). Then rotates bottom-up: parent edge first,
    /// grandparent edge second, two levels per step, one final zig if the
    /// target ends directly below the root.
    fn splay_path(&mut self, path: &[NodeId], missed_toward: Option<StaleSide>) -> Option<NodeId> {
        let target = *path.last()?;

        for pair in path.windows(2) {
            let taken = self.which_child(pair[0], pair[1])?;
            self.set_stale(pair[0], taken.opposite());
        }
        if let Some(dir) = missed_toward {
            self.set_stale(target, dir.opposite());
        }

        let mut top = path.len() - 1;
        while top >= 2 {
            let parent = path[top - 1];
            let grand = path[top - 2];
            let p_side = self.which_child(parent, target)?;
            let g_side = self.which_child(grand, parent)?;

            let sub = self.rotate(parent, p_side)?;
            self.set_child(grand, g_side, Some(sub));
            let sub = self.rotate(grand, g_side)?;

            if top >= 3 {
                let above = path[top - 3];
                let a_side = self.which_child(above, grand)?;
                self.set_child(above, a_side, Some(sub));
            } else {
                self.root = Some(sub);
            }
            top -= 2;
        }
        if top == 1 {
            let parent = path[0];
            let p_side = self.which_child(parent, target)?;
            let sub = self.rotate(parent, p_side)?;
            self.root = Some(sub);
        }

        debug_assert_eq!(self.root, Some(target));
        Some(target)
    }
}

impl<K: Ord, V> SplayTree<K, V> {
    /// Descends by comparison and splays.
    ///
    /// Hit: the matching node becomes the root and its id is returned.
    /// Miss with `force`: the deepest visited node is splayed up and
    /// returned instead. Miss without `force`: returns `None` and writes
    /// nothing — no rotations, no marker updates.
    fn splay(&mut self, key: &K, force: bool) -> Option<NodeId> {
        let mut cur = self.root?;
        let mut path = vec![cur];
        let mut missed_toward = None;
        loop {
            let node = self.arena.get(cur)?;
            let dir = match key.cmp(&node.key) {
                Ordering::Equal => break,
                Ordering::Less => StaleSide::Left,
                Ordering::Greater => StaleSide::Right,
            };
            match node.child(dir) {
                Some(next) => {
                    cur = next;
                    path.push(cur);
                }
                None => {
                    missed_toward = Some(dir);
                    break;
                }
            }
        }
        if missed_toward.is_some() && !force {
            return None;
        }
        self.splay_path(&path, missed_toward)
    }

    /// Inserts `key`/`value` if the key is absent; returns `true` when a
    /// new entry was created.
    ///
    /// A duplicate key is a silent no-op: the stored value is kept, the
    /// length does not change, but the existing entry is still splayed to
    /// the root (the attempt counts as a touch).
    ///
    /// A new entry is attached in constant time on top of the forced splay:
    /// the freshly splayed old root becomes one child of the new node, and
    /// the old root's subtree facing the new key moves across. No further
    /// rebalancing happens; later accesses restore balance statistically.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        if self.root.is_none() {
            let id = self.arena.insert(Node::new(key, value));
            self.root = Some(id);
            return true;
        }
        let Some(top) = self.splay(&key, true) else {
            return false;
        };
        let order = match self.arena.get(top) {
            Some(node) => node.key.cmp(&key),
            None => return false,
        };
        match order {
            Ordering::Equal => false,
            Ordering::Greater => {
                // New key sorts below the splayed root: take over its left
                // subtree and adopt the root on the right.
                let old_left = self.arena.get(top).and_then(|n| n.left);
                self.set_child(top, StaleSide::Left, None);
                let mut node = Node::new(key, value);
                node.left = old_left;
                node.right = Some(top);
                let id = self.arena.insert(node);
                self.root = Some(id);
                true
            }
            Ordering::Less => {
                let old_right = self.arena.get(top).and_then(|n| n.right);
                self.set_child(top, StaleSide::Right, None);
                let mut node = Node::new(key, value);
                node.right = old_right;
                node.left = Some(top);
                let id = self.arena.insert(node);
                self.root = Some(id);
                true
            }
        }
    }

    /// Looks up `key`, splaying it to the root on a hit.
    ///
    /// On a miss the tree is left exactly as it was.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let id = self.splay(key, false)?;
        self.arena.get(id).map(|node| &node.value)
    }

    /// Membership probe that never restructures and never updates the
    /// recency markers.
    pub fn contains(&self, key: &K) -> bool {
        let mut cur = self.root;
        while let Some(id) = cur {
            let Some(node) = self.arena.get(id) else {
                return false;
            };
            cur = match key.cmp(&node.key) {
                Ordering::Equal => return true,
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        false
    }

    /// Removes `key` and returns its value, or `None` if absent (in which
    /// case nothing changes).
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.splay(key, false)?;
        self.remove_root().map(|(_, value)| value)
    }

    /// Evicts the stale-side candidate and returns its entry; `None` on an
    /// empty tree.
    ///
    /// The candidate is splayed to the root first (its removal is an
    /// access like any other, so the markers along the path are updated),
    /// then removed via the standard join.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let path = self.stale_frontier_path()?;
        self.splay_path(&path, None)?;
        self.remove_root()
    }

    /// Deletes the root and joins its subtrees: the rightmost node of the
    /// left subtree is detached and promoted (no corrective splay), and the
    /// old right subtree hangs off it.
    fn remove_root(&mut self) -> Option<(K, V)> {
        let root_id = self.root?;
        let (left, right) = {
            let node = self.arena.get(root_id)?;
            (node.left, node.right)
        };

        let new_root = match left {
            None => right,
            Some(left_id) => {
                let mut prev = root_id;
                let mut cur = left_id;
                while let Some(next) = self.arena.get(cur)?.right {
                    prev = cur;
                    cur = next;
                }
                if prev != root_id {
                    // Unhook the promoted node, relinking its left subtree
                    // into the vacated slot, and give it the whole left
                    // subtree.
                    let orphan = self.arena.get(cur)?.left;
                    self.set_child(prev, StaleSide::Right, orphan);
                    self.set_child(cur, StaleSide::Left, Some(left_id));
                }
                self.set_child(cur, StaleSide::Right, right);
                Some(cur)
            }
        };

        self.root = new_root;
        let node = self.arena.remove(root_id)?;
        Some((node.key, node.value))
    }

    /// Verifies the structural invariants: strict BST key order (which
    /// implies key uniqueness), every live arena slot reachable from the
    /// root, and link targets alive. Intended for tests and debugging.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut visited = 0usize;
        let mut stack = Vec::new();
        let mut cur = self.root;
        let mut prev_key: Option<&K> = None;

        while cur.is_some() || !stack.is_empty() {
            while let Some(id) = cur {
                let node = self
                    .arena
                    .get(id)
                    .ok_or_else(|| InvariantError::new("tree link points at a vacated slot"))?;
                stack.push(id);
                cur = node.left;
                if stack.len() > self.arena.len() {
                    return Err(InvariantError::new("cycle detected in tree links"));
                }
            }
            let Some(id) = stack.pop() else { break };
            let node = self
                .arena
                .get(id)
                .ok_or_else(|| InvariantError::new("tree link points at a vacated slot"))?;
            if let Some(prev) = prev_key {
                if prev >= &node.key {
                    return Err(InvariantError::new("BST key order violated"));
                }
            }
            prev_key = Some(&node.key);
            visited += 1;
            if visited > self.arena.len() {
                return Err(InvariantError::new("cycle detected in tree links"));
            }
            cur = node.right;
        }

        if visited != self.arena.len() {
            return Err(InvariantError::new(format!(
                "{} nodes reachable from root but arena holds {}",
                visited,
                self.arena.len()
            )));
        }
        Ok(())
    }

    /// Returns the keys in preorder (root, left, right) for shape
    /// assertions in tests.
    #[cfg(any(test, debug_assertions))]
    pub fn debug_preorder(&self) -> Vec<K>
    where
        K: Clone,
    {
        let mut out = Vec::with_capacity(self.len());
        let mut stack = Vec::new();
        if let Some(root) = self.root {
            stack.push(root);
        }
        while let Some(id) = stack.pop() {
            if let Some(node) = self.arena.get(id) {
                out.push(node.key.clone());
                if let Some(right) = node.right {
                    stack.push(right);
                }
                if let Some(left) = node.left {
                    stack.push(left);
                }
            }
        }
        out
    }
}

impl<K, V> Default for SplayTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Debug for SplayTree<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SplayTree")
            .field("len", &self.len())
            .field("root", &self.root)
            .finish()
    }
}

/// In-order iterator over a [`SplayTree`].
pub struct Iter<'a, K, V> {
    tree: &'a SplayTree<K, V>,
    stack: Vec<NodeId>,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn push_left_spine(&mut self, mut cur: Option<NodeId>) {
        while let Some(id) = cur {
            self.stack.push(id);
            cur = self.tree.arena.get(id).and_then(|node| node.left);
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.tree.arena.get(id)?;
        self.push_left_spine(node.right);
        Some((&node.key, &node.value))
    }
}

impl<'a, K, V> Debug for Iter<'a, K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Iter").field("stack", &self.stack).finish()
    }
}
