//! Adaptive Replacement Cache (ARC) replacement policy.
//!
//! ARC splits the cache between a recency side and a frequency side and moves
//! the split point `p` at runtime, using the keys it recently evicted (ghosts)
//! as evidence of which side was too small.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                           ArcCache<K, V> Layout                             │
//! │                                                                             │
//! │   ┌─────────────────────────────────────────────────────────────────────┐   │
//! │   │  index: FxHashMap<K, SlotId>        nodes: SlotArena<Node<K, V>>    │   │
//! │   │                                                                     │   │
//! │   │  ┌──────────┬───────────┐           ┌────────┬──────────────────┐   │   │
//! │   │  │   Key    │  SlotId   │           │ Slot   │ key,value,list   │   │   │
//! │   │  ├──────────┼───────────┤           ├────────┼──────────────────┤   │   │
//! │   │  │  "page1" │   id_0    │──────────►│ id_0   │ k,Some(v),T1     │   │   │
//! │   │  │  "page2" │   id_1    │──────────►│ id_1   │ k,Some(v),T2     │   │   │
//! │   │  │  "page3" │   id_2    │──────────►│ id_2   │ k,None,B1        │   │   │
//! │   │  └──────────┴───────────┘           └────────┴──────────────────┘   │   │
//! │   └─────────────────────────────────────────────────────────────────────┘   │
//! │                                                                             │
//! │   ┌─────────────────────────────────────────────────────────────────────┐   │
//! │   │          Four index-linked lists over the same arena                │   │
//! │   │                                                                     │   │
//! │   │   T1 (resident, seen once)             T2 (resident, seen again)    │   │
//! │   │   ┌─────────────────────────┐          ┌─────────────────────────┐  │   │
//! │   │   │ MRU               LRU   │          │ MRU               LRU   │  │   │
//! │   │   │ [id_0] ◄──► [...]       │          │ [id_1] ◄──► [...]       │  │   │
//! │   │   └─────────────────────────┘          └─────────────────────────┘  │   │
//! │   │                                                                     │   │
//! │   │   B1 (ghost, evicted from T1)          B2 (ghost, evicted from T2)  │   │
//! │   │   ┌─────────────────────────┐          ┌─────────────────────────┐  │   │
//! │   │   │ keys only, value = None │          │ keys only, value = None │  │   │
//! │   │   └─────────────────────────┘          └─────────────────────────┘  │   │
//! │   │                                                                     │   │
//! │   │   p: target size of T1, 0 ≤ p ≤ c                                   │   │
//! │   │   • hit in B1 → p += max(1, |B2| / |B1|)                            │   │
//! │   │   • hit in B2 → p -= max(1, |B1| / |B2|)                            │   │
//! │   └─────────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Moving an entry between lists is a relink of its slot; the node (and its
//! `SlotId`) stays put, so the index never needs rewriting on a move.
//!
//! ## Flows
//!
//! ```text
//!   get(key):
//!     T1 | T2 hit → move to T2 MRU, return value
//!     B1 hit      → raise p, replace, move to T2 MRU (no value yet), miss
//!     B2 hit      → lower p, replace, move to T2 MRU (no value yet), miss
//!     not found   → miss
//!
//!   insert(key, value):
//!     T1 | T2     → store value, move to T2 MRU
//!     B1 | B2     → as the ghost read above, then store value
//!     new key:
//!       |T1|+|B1| == c → |T1| < c ? drop B1 LRU, replace
//!                                 : drop T1 LRU outright
//!       |T1|+|B1| <  c and total ≥ c
//!                      → total ≥ 2c ? drop B2 LRU ; replace
//!       push at T1 MRU
//!
//!   replace(triggered_from_b2):        (only when |T1|+|T2| == c)
//!     |T1| > 0 and (|T1| > p or (|T1| == p and triggered_from_b2))
//!       ? T1 LRU → B1 MRU (value dropped)
//!       : T2 LRU → B2 MRU (value dropped)
//! ```
//!
//! The tie-break looks at where the *triggering* key was found, not at the
//! victim: a frequency-side ghost hit at `|T1| == p` still shrinks T1.
//!
//! ## Pending promotions
//!
//! A ghost hit observed through `get` moves the key into T2 but there is no
//! value to return, since ghosts keep keys only. The node stays in T2 with no
//! value: it occupies a slot, `get` and `contains` report it absent, and the
//! next `insert` of that key fills it in place.
//!
//! ## Invariants
//!
//! After every operation:
//! `|T1|+|T2| ≤ c`, `|T1|+|B1| ≤ c`, `|T2|+|B2| ≤ 2c`,
//! `|T1|+|T2|+|B1|+|B2| ≤ 2c`, `0 ≤ p ≤ c`, and every key is in at most one list.
//!
//! ## Example
//!
//! ```
//! use cacheevict::policy::arc::{ArcCache, ArcList};
//! use cacheevict::traits::CoreCache;
//!
//! let mut cache = ArcCache::new(100);
//! cache.insert("page1", "content1");
//! assert_eq!(cache.locate(&"page1"), Some(ArcList::T1));
//!
//! // a second reference promotes to the frequency side
//! assert_eq!(cache.get(&"page1"), Some(&"content1"));
//! assert_eq!(cache.locate(&"page1"), Some(ArcList::T2));
//! ```
//!
//! ## References
//!
//! - Megiddo & Modha, "ARC: A Self-Tuning, Low Overhead Replacement Cache",
//!   FAST 2003

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::ds::{SlotArena, SlotId};
use crate::error::ConfigError;
#[cfg(feature = "metrics")]
use crate::metrics::{
    ArcMetricsRecorder, CacheMetrics, CacheMetricsSnapshot, CoreMetricsRecorder,
    MetricsSnapshotProvider,
};
use crate::traits::CoreCache;

/// The four ARC lists.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ArcList {
    /// Resident, referenced once since it entered the cache.
    T1,
    /// Resident, referenced at least twice.
    T2,
    /// Ghost of an entry evicted from T1.
    B1,
    /// Ghost of an entry evicted from T2.
    B2,
}

impl ArcList {
    pub const ALL: [ArcList; 4] = [ArcList::T1, ArcList::T2, ArcList::B1, ArcList::B2];

    #[inline]
    fn slot(self) -> usize {
        match self {
            ArcList::T1 => 0,
            ArcList::T2 => 1,
            ArcList::B1 => 2,
            ArcList::B2 => 3,
        }
    }

    /// `true` for B1/B2.
    pub fn is_ghost(self) -> bool {
        matches!(self, ArcList::B1 | ArcList::B2)
    }
}

struct Node<K, V> {
    key: K,
    /// `None` for ghosts and for pending T2 promotions.
    value: Option<V>,
    list: ArcList,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// head = MRU, tail = LRU
#[derive(Debug, Default, Clone, Copy)]
struct Links {
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
}

/// Adaptive Replacement Cache. See the module docs.
///
/// # Example
///
/// ```
/// use cacheevict::policy::arc::ArcCache;
/// use cacheevict::traits::CoreCache;
///
/// let mut cache = ArcCache::new(3);
/// cache.insert("key1", "value1");
/// cache.insert("key1", "new_value");
/// assert_eq!(cache.get(&"key1"), Some(&"new_value"));
/// assert_eq!(cache.t2_len(), 1);
/// ```
pub struct ArcCache<K, V> {
    nodes: SlotArena<Node<K, V>>,
    index: FxHashMap<K, SlotId>,
    lists: [Links; 4],
    /// Target size for T1.
    p: usize,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: CacheMetrics,
}

impl<K, V> ArcCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an ARC cache holding at most `capacity` resident entries.
    ///
    /// Ghost lists track up to `capacity` further keys in total beyond the
    /// resident ones. `p` starts at 0. A zero capacity yields a cache that
    /// stores nothing.
    ///
    /// ```
    /// use cacheevict::policy::arc::ArcCache;
    /// use cacheevict::traits::CoreCache;
    ///
    /// let cache: ArcCache<String, i32> = ArcCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// assert_eq!(cache.p(), 0);
    /// ```
    pub fn new(capacity: usize) -> Self {
        let history = capacity.saturating_mul(2);
        Self {
            nodes: SlotArena::with_capacity(history),
            index: FxHashMap::with_capacity_and_hasher(history, Default::default()),
            lists: [Links::default(); 4],
            p: 0,
            capacity,
            #[cfg(feature = "metrics")]
            metrics: CacheMetrics::default(),
        }
    }

    /// Like [`new`](Self::new), but fails on zero capacity.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(Self::new(capacity))
    }

    /// Current target size of T1.
    pub fn p(&self) -> usize {
        self.p
    }

    pub fn t1_len(&self) -> usize {
        self.len_of(ArcList::T1)
    }

    pub fn t2_len(&self) -> usize {
        self.len_of(ArcList::T2)
    }

    pub fn b1_len(&self) -> usize {
        self.len_of(ArcList::B1)
    }

    pub fn b2_len(&self) -> usize {
        self.len_of(ArcList::B2)
    }

    /// Reports which list currently tracks `key`, resident or ghost.
    pub fn locate(&self, key: &K) -> Option<ArcList> {
        self.index
            .get(key)
            .and_then(|&id| self.nodes.get(id))
            .map(|node| node.list)
    }

    #[inline]
    fn len_of(&self, list: ArcList) -> usize {
        self.lists[list.slot()].len
    }

    #[inline]
    fn resident_len(&self) -> usize {
        self.t1_len() + self.t2_len()
    }

    fn list_of(&self, id: SlotId) -> Option<ArcList> {
        self.nodes.get(id).map(|node| node.list)
    }

    fn unlink(&mut self, id: SlotId) {
        let Some((prev, next, list)) = self.nodes.get(id).map(|n| (n.prev, n.next, n.list)) else {
            return;
        };
        let links = &mut self.lists[list.slot()];

        match prev.and_then(|prev_id| self.nodes.get_mut(prev_id)) {
            Some(prev_node) => prev_node.next = next,
            None => links.head = next,
        }
        match next.and_then(|next_id| self.nodes.get_mut(next_id)) {
            Some(next_node) => next_node.prev = prev,
            None => links.tail = prev,
        }
        links.len -= 1;

        if let Some(node) = self.nodes.get_mut(id) {
            node.prev = None;
            node.next = None;
        }
    }

    fn push_head(&mut self, id: SlotId, list: ArcList) {
        let links = &mut self.lists[list.slot()];
        let old_head = links.head;

        if let Some(node) = self.nodes.get_mut(id) {
            node.list = list;
            node.prev = None;
            node.next = old_head;
        }
        match old_head.and_then(|head| self.nodes.get_mut(head)) {
            Some(head_node) => head_node.prev = Some(id),
            None => links.tail = Some(id),
        }
        links.head = Some(id);
        links.len += 1;
    }

    fn relink(&mut self, id: SlotId, to: ArcList) {
        self.unlink(id);
        self.push_head(id, to);
    }

    /// Removes the LRU node of `list` from the cache entirely.
    fn drop_lru(&mut self, list: ArcList) {
        let Some(id) = self.lists[list.slot()].tail else {
            return;
        };
        self.unlink(id);
        if let Some(node) = self.nodes.remove(id) {
            self.index.remove(&node.key);
        }
        #[cfg(feature = "metrics")]
        if !list.is_ghost() {
            self.metrics.record_evicted_entry();
        }
        trace!(?list, "arc dropped lru node");
    }

    /// Moves the LRU node of a resident list to the MRU end of its ghost list.
    fn demote_lru(&mut self, from: ArcList, to: ArcList) {
        let Some(id) = self.lists[from.slot()].tail else {
            return;
        };
        self.unlink(id);
        if let Some(node) = self.nodes.get_mut(id) {
            node.value = None;
        }
        self.push_head(id, to);

        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();
        trace!(?from, ?to, p = self.p, "arc evicted resident entry to ghost list");
    }

    /// Frees one resident slot when the cache is full.
    fn replace(&mut self, triggered_from_b2: bool) {
        if self.resident_len() < self.capacity {
            return;
        }
        let t1 = self.t1_len();
        let from_t1 = (t1 > 0 && (t1 > self.p || (t1 == self.p && triggered_from_b2)))
            || self.t2_len() == 0;

        if from_t1 {
            self.demote_lru(ArcList::T1, ArcList::B1);
        } else {
            self.demote_lru(ArcList::T2, ArcList::B2);
        }
    }

    /// Adapts `p`, frees a slot, and moves the ghost node `id` to T2 MRU.
    fn ghost_hit(&mut self, id: SlotId, ghost: ArcList) {
        let b1 = self.b1_len();
        let b2 = self.b2_len();

        match ghost {
            ArcList::B1 => {
                let delta = b2.checked_div(b1).unwrap_or(0).max(1);
                self.p = (self.p + delta).min(self.capacity);
                #[cfg(feature = "metrics")]
                self.metrics.record_b1_ghost_hit();
            },
            ArcList::B2 => {
                let delta = b1.checked_div(b2).unwrap_or(0).max(1);
                self.p = self.p.saturating_sub(delta);
                #[cfg(feature = "metrics")]
                self.metrics.record_b2_ghost_hit();
            },
            ArcList::T1 | ArcList::T2 => return,
        }
        trace!(?ghost, b1, b2, p = self.p, "arc ghost hit adapted p");

        self.replace(ghost == ArcList::B2);
        self.relink(id, ArcList::T2);
    }

    /// Trims history and frees a slot ahead of inserting a brand-new key.
    fn make_room_for_new(&mut self) {
        let c = self.capacity;
        let t1 = self.t1_len();
        let l1 = t1 + self.b1_len();

        if l1 >= c {
            if t1 < c {
                self.drop_lru(ArcList::B1);
                self.replace(false);
            } else {
                // B1 is empty here, T1 alone fills L1
                self.drop_lru(ArcList::T1);
            }
        } else {
            let total = l1 + self.t2_len() + self.b2_len();
            if total >= c {
                if total >= c.saturating_mul(2) {
                    self.drop_lru(ArcList::B2);
                }
                self.replace(false);
            }
        }
    }

    #[cfg(any(test, debug_assertions))]
    /// Validates internal invariants of the ARC cache.
    ///
    /// Panics if any invariant is violated.
    pub fn debug_validate_invariants(&self) {
        let c = self.capacity;
        let (t1, t2, b1, b2) = (self.t1_len(), self.t2_len(), self.b1_len(), self.b2_len());

        assert!(t1 + t2 <= c, "|T1|+|T2| = {} exceeds c = {c}", t1 + t2);
        assert!(t1 + b1 <= c, "|T1|+|B1| = {} exceeds c = {c}", t1 + b1);
        assert!(t2 + b2 <= 2 * c, "|T2|+|B2| = {} exceeds 2c", t2 + b2);
        assert!(t1 + t2 + b1 + b2 <= 2 * c, "total history exceeds 2c");
        assert!(self.p <= c, "p = {} exceeds c = {c}", self.p);

        assert_eq!(self.nodes.len(), t1 + t2 + b1 + b2, "arena/list size mismatch");
        assert_eq!(self.index.len(), self.nodes.len(), "index/arena size mismatch");

        for list in ArcList::ALL {
            let links = &self.lists[list.slot()];
            let mut count = 0usize;
            let mut prev = None;
            let mut current = links.head;

            while let Some(id) = current {
                let node = self.nodes.get(id).expect("linked slot is free");
                assert_eq!(node.list, list, "node tagged with the wrong list");
                assert_eq!(node.prev, prev, "broken back link");
                assert_eq!(self.index.get(&node.key), Some(&id), "index disagrees with list");
                if list.is_ghost() {
                    assert!(node.value.is_none(), "ghost node holds a value");
                } else if list == ArcList::T1 {
                    assert!(node.value.is_some(), "T1 node without a value");
                }
                count += 1;
                assert!(count <= links.len, "cycle in {list:?}");
                prev = Some(id);
                current = node.next;
            }

            assert_eq!(links.tail, prev, "{list:?} tail is stale");
            assert_eq!(count, links.len, "{list:?} length mismatch");
        }
    }
}

impl<K, V> CoreCache<K, V> for ArcCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn get(&mut self, key: &K) -> Option<&V> {
        let found = self.index.get(key).copied().and_then(|id| Some((id, self.list_of(id)?)));
        let Some((id, list)) = found else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };

        if list.is_ghost() {
            self.ghost_hit(id, list);
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        }

        self.relink(id, ArcList::T2);

        #[cfg(feature = "metrics")]
        {
            let live = self.nodes.get(id).is_some_and(|node| node.value.is_some());
            if live {
                self.metrics.record_get_hit();
            } else {
                self.metrics.record_get_miss();
            }
        }

        self.nodes.get(id).and_then(|node| node.value.as_ref())
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        if self.capacity == 0 {
            return None;
        }

        let found = self.index.get(&key).copied().and_then(|id| Some((id, self.list_of(id)?)));
        if let Some((id, list)) = found {
            if list.is_ghost() {
                self.ghost_hit(id, list);
                #[cfg(feature = "metrics")]
                self.metrics.record_insert_new();
            } else {
                self.relink(id, ArcList::T2);
                #[cfg(feature = "metrics")]
                self.metrics.record_insert_update();
            }
            return self
                .nodes
                .get_mut(id)
                .and_then(|node| node.value.replace(value));
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        self.make_room_for_new();

        let id = self.nodes.insert(Node {
            key: key.clone(),
            value: Some(value),
            list: ArcList::T1,
            prev: None,
            next: None,
        });
        self.push_head(id, ArcList::T1);
        self.index.insert(key, id);
        None
    }

    fn contains(&self, key: &K) -> bool {
        self.index
            .get(key)
            .and_then(|&id| self.nodes.get(id))
            .is_some_and(|node| node.value.is_some())
    }

    /// Resident slots (T1 + T2), pending promotions included.
    fn len(&self) -> usize {
        self.resident_len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        self.nodes.clear();
        self.index.clear();
        self.lists = [Links::default(); 4];
        self.p = 0;
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CacheMetricsSnapshot> for ArcCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot::capture(&self.metrics, self.resident_len(), self.capacity)
    }
}

impl<K, V> fmt::Debug for ArcCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = |list: ArcList| self.lists[list.slot()].len;
        f.debug_struct("ArcCache")
            .field("capacity", &self.capacity)
            .field("p", &self.p)
            .field("t1_len", &len(ArcList::T1))
            .field("t2_len", &len(ArcList::T2))
            .field("b1_len", &len(ArcList::B1))
            .field("b2_len", &len(ArcList::B2))
            .finish()
    }
}
