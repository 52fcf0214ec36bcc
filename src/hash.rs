//! Ring hash space and virtual-node key derivation.
//!
//! Positions are CRC32 (IEEE) checksums, so ring placement is stable across processes
//! and platforms. Nothing here is cryptographic; keys are not expected to be adversarial.

use crate::node::Node;

/// Hashes an arbitrary key onto the 32-bit ring.
#[inline]
pub fn hash_key<K: AsRef<[u8]>>(key: K) -> u32 {
    crc32fast::hash(key.as_ref())
}

/// Builds the string for one virtual node of `node`.
///
/// The result depends only on the node's address, weight, id and the replica index, so
/// removal can recompute exactly the positions an earlier add produced.
pub fn virtual_key(replica_index: usize, node: &Node) -> String {
    format!("{}*{}-{}-{}", node.address, node.weight, replica_index, node.id)
}

/// Number of virtual nodes for `node`, or `None` when it does not fit in a `usize`.
pub fn virtual_count(replicas_per_weight: usize, node: &Node) -> Option<usize> {
    replicas_per_weight.checked_mul(node.weight as usize)
}

/// Ring positions the node occupies, in replica order. May contain duplicates when two
/// virtual keys collide. Empty when the virtual node count overflows.
pub fn virtual_positions(replicas_per_weight: usize, node: &Node) -> Vec<u32> {
    let count = virtual_count(replicas_per_weight, node).unwrap_or(0);
    (0..count)
        .map(|i| hash_key(virtual_key(i, node)))
        .collect()
}
