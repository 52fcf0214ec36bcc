//! Weighted consistent-hash ring over a CRC32 key space.
//!
//! Nodes are placed on the ring as `replicas_per_weight * weight` virtual nodes. Lookups
//! resolve a key to the node owning the first position at or after the key's hash, so adding
//! or removing a node only remaps the keys adjacent to that node's positions.

pub mod config;
pub mod error;
pub mod hash;
pub mod hash_ring;
pub mod node;
pub mod opt;

pub use crate::error::RingError;
pub use crate::hash::{hash_key, virtual_count, virtual_key, virtual_positions};
pub use crate::hash_ring::{HashRing, LookupMode, RingConfig, RingType, DEFAULT_REPLICAS, MAX_REPLICAS};
pub use crate::node::{Node, NodeId, NodeList};
