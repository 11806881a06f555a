// Per-node adjacency derived from hex element connectivity.
//
// Storage mirrors the dense-array-of-vecs adjacency list used for a
// spring network's per-node connections (`node_springs:
// Vec<Vec<(usize, usize)>>`): here each node id indexes directly into a
// `Vec<Vec<NodeId>>` of its neighbors, avoiding a hash map and keeping
// iteration order deterministic.

use std::collections::BTreeSet;

use crate::mesh::Mesh;
use crate::NodeId;

/// The 12 local edges of a hex element, as pairs of local corner indices
/// (0-based, matching the fixed winding in `lattice::CORNER_OFFSETS`).
pub(crate) const HEX_EDGES: [(usize, usize); 12] = [
    // bottom face
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    // top face
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    // verticals
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Symmetric node-adjacency graph: `neighbors(n)` lists every node directly
/// connected to `n` by a hex edge, with no self-loops and no duplicates.
#[derive(Clone, Debug, PartialEq)]
pub struct NeighborGraph {
    /// Indexed by `node - 1`; each entry sorted ascending.
    adjacency: Vec<Vec<NodeId>>,
}

impl NeighborGraph {
    /// Build the graph from every element's 12 edges across all blocks.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let node_count = mesh.node_count();
        let mut sets: Vec<BTreeSet<NodeId>> = vec![BTreeSet::new(); node_count];

        for (_, element) in mesh.iter_elements() {
            for &(a, b) in &HEX_EDGES {
                let (na, nb) = (element[a], element[b]);
                if na == nb {
                    continue;
                }
                sets[na as usize - 1].insert(nb);
                sets[nb as usize - 1].insert(na);
            }
        }

        let adjacency = sets
            .into_iter()
            .map(|set| set.into_iter().collect())
            .collect();
        Self { adjacency }
    }

    /// Number of nodes this graph was built over.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Ascending-sorted neighbors of `node` (1-based). Empty slice for an
    /// isolated node; panics if `node` is out of range.
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        &self.adjacency[node as usize - 1]
    }

    /// Degree (neighbor count) of `node`.
    pub fn degree(&self, node: NodeId) -> usize {
        self.neighbors(node).len()
    }
}
