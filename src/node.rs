use serde::{Serialize, Deserialize};

pub type NodeId = u64;

/// A physical endpoint placed on the ring.
///
/// Only `id` and `weight` (together with `address`, which feeds the virtual-node keys) matter
/// to placement; `port` and `host_name` are carried along for callers.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Node {
    pub id: NodeId,
    pub address: String,
    pub port: u16,
    pub host_name: String,
    /// Multiplier on the ring's replicas-per-weight. A node with weight 0 is never placed.
    pub weight: u32,
}

impl Node {
    pub fn new<A, H>(id: NodeId, address: A, port: u16, host_name: H, weight: u32) -> Self
    where
        A: Into<String>,
        H: Into<String>,
    {
        Node {
            id,
            address: address.into(),
            port,
            host_name: host_name.into(),
            weight,
        }
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}:{}]", self.id, self.address, self.port)
    }
}

pub type NodeList = Vec<Node>;
