//! Weighted consistent-hash ring.
//!
//! Every physical node occupies `replicas_per_weight * weight` positions on a 32-bit ring.
//! A key is owned by the node at the first position at or after the key's hash, wrapping
//! around to the start of the ring.
//!
//! All state sits behind one `RwLock`: `add` and `remove` hold the write lock across the
//! mapping update, the registry update and the re-sort, so lookups never observe a
//! partially rebuilt ring.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use log::debug;

use crate::error::RingError;
use crate::hash::{hash_key, virtual_count, virtual_key};
use crate::node::{Node, NodeId};

/// Virtual positions per unit of weight.
pub const DEFAULT_REPLICAS: usize = 160;

/// Upper bound on replicas per weight. Keeps `replicas * weight` far inside `usize` on 64-bit
/// targets for any `u32` weight.
pub const MAX_REPLICAS: usize = 1 << 20;

pub type RingType = Arc<HashRing>;

/// How the successor of a key hash is resolved.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LookupMode {
    /// First position `>= hash`, wrapping to the first position when there is none.
    Canonical,

    /// Routing compatible with the earlier CRC ring: a hash that lands on the last position
    /// wraps to the first one, and a hash past the last position stays on the last one.
    Legacy,
}

impl Default for LookupMode {
    fn default() -> Self {
        LookupMode::Canonical
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RingConfig {
    pub replicas_per_weight: usize,
    pub lookup: LookupMode,
}

impl Default for RingConfig {
    fn default() -> Self {
        RingConfig {
            replicas_per_weight: DEFAULT_REPLICAS,
            lookup: LookupMode::default(),
        }
    }
}

#[derive(Debug, Default)]
struct RingState {
    /// ring position -> copy of the node placed there
    nodes: HashMap<u32, Node>,
    registry: HashSet<NodeId>,
    /// keys of `nodes`, ascending
    sorted: Vec<u32>,
}

impl RingState {
    fn rebuild(&mut self) {
        self.sorted = self.nodes.keys().copied().collect();
        self.sorted.sort_unstable();
    }

    /// Index into `sorted` owning `hash`. Caller guarantees `sorted` is not empty.
    fn search(&self, hash: u32, mode: LookupMode) -> usize {
        let len = self.sorted.len();
        let i = self.sorted.partition_point(|&position| position < hash);

        match mode {
            LookupMode::Canonical => {
                if i == len { 0 } else { i }
            }

            LookupMode::Legacy => {
                if i == len {
                    len - 1
                } else if i == len - 1 {
                    0
                } else {
                    i
                }
            }
        }
    }
}

/// Thread-safe consistent-hash ring. Share it between threads as a [`RingType`].
#[derive(Debug)]
pub struct HashRing {
    state: RwLock<RingState>,
    replicas_per_weight: usize,
    lookup: LookupMode,
}

impl Default for HashRing {
    fn default() -> Self {
        HashRing {
            state: RwLock::new(RingState::default()),
            replicas_per_weight: DEFAULT_REPLICAS,
            lookup: LookupMode::default(),
        }
    }
}

impl HashRing {
    /// Creates an empty ring with 160 replicas per weight and canonical lookup.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &RingConfig) -> Result<Self, RingError> {
        if config.replicas_per_weight == 0 || config.replicas_per_weight > MAX_REPLICAS {
            return Err(RingError::config(format!(
                "replicas_per_weight must be within 1..={}, got {}",
                MAX_REPLICAS, config.replicas_per_weight,
            )));
        }

        Ok(HashRing {
            state: RwLock::new(RingState::default()),
            replicas_per_weight: config.replicas_per_weight,
            lookup: config.lookup,
        })
    }

    /// Creates an empty ring ready to be cloned into several threads.
    pub fn shared(config: &RingConfig) -> Result<RingType, RingError> {
        Self::with_config(config).map(Arc::new)
    }

    pub fn replicas_per_weight(&self) -> usize {
        self.replicas_per_weight
    }

    pub fn lookup_mode(&self) -> LookupMode {
        self.lookup
    }

    /// Places a copy of `node` on the ring.
    ///
    /// Returns `false` without touching the ring when the node's id is already registered, its
    /// weight is 0, or its virtual node count does not fit in a `usize`. Virtual positions
    /// that collide with an existing position take it over, so a node may end up with slightly
    /// fewer positions than `replicas_per_weight * weight`.
    pub fn add(&self, node: &Node) -> bool {
        let count = match virtual_count(self.replicas_per_weight, node) {
            Some(count) if count > 0 => count,
            _ => return false,
        };

        let mut state = self.write();
        if state.registry.contains(&node.id) {
            return false;
        }

        for i in 0..count {
            let position = hash_key(virtual_key(i, node));
            state.nodes.insert(position, node.clone());
        }

        state.registry.insert(node.id);
        state.rebuild();
        debug!("added node {} to ring with {} virtual nodes; ring size {}", node, count, state.sorted.len());
        true
    }

    /// Takes the node's positions off the ring. Unknown ids are ignored.
    ///
    /// Positions are recomputed from the node passed in, so it must carry the same address
    /// and weight it was added with; otherwise the old positions stay on the ring.
    pub fn remove(&self, node: &Node) {
        let mut state = self.write();
        if !state.registry.remove(&node.id) {
            return;
        }

        // an overflowing count can only come from a weight the node was never added with
        let count = virtual_count(self.replicas_per_weight, node).unwrap_or(0);
        for i in 0..count {
            let position = hash_key(virtual_key(i, node));
            state.nodes.remove(&position);
        }

        state.rebuild();
        debug!("removed node {} from ring; ring size {}", node, state.sorted.len());
    }

    /// Returns the node owning `key`.
    pub fn get<K: AsRef<str>>(&self, key: K) -> Result<Node, RingError> {
        self.get_bytes(key.as_ref().as_bytes())
    }

    pub fn get_bytes(&self, key: &[u8]) -> Result<Node, RingError> {
        let state = self.read();
        if state.sorted.is_empty() {
            return Err(RingError::NoNodes);
        }

        let index = state.search(hash_key(key), self.lookup);
        let position = state.sorted[index];
        state.nodes.get(&position).cloned().ok_or(RingError::NoNodes)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.read().registry.contains(&id)
    }

    /// Number of registered physical nodes.
    pub fn node_count(&self) -> usize {
        self.read().registry.len()
    }

    /// Number of occupied ring positions.
    pub fn len(&self) -> usize {
        self.read().sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().sorted.is_empty()
    }

    /// Snapshot of the full position -> node mapping, for diagnostics.
    pub fn nodes(&self) -> BTreeMap<u32, Node> {
        self.read()
            .nodes
            .iter()
            .map(|(position, node)| (*position, node.clone()))
            .collect()
    }

    /// Snapshot of the ascending ring positions.
    pub fn positions(&self) -> Vec<u32> {
        self.read().sorted.clone()
    }

    // Every mutation completes before anything that can panic, so a poisoned lock still
    // guards a consistent ring.
    fn read(&self) -> RwLockReadGuard<'_, RingState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RingState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
