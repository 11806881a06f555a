// Unique unordered edge extraction from mesh connectivity.

use std::collections::BTreeSet;

use crate::mesh::Mesh;
use crate::neighbor::HEX_EDGES;
use crate::NodeId;

/// Every distinct undirected edge in the mesh, each returned once as
/// `(low, high)` with `low < high`, in ascending lexicographic order.
pub fn edge_pairs(mesh: &Mesh) -> Vec<(NodeId, NodeId)> {
    let mut set: BTreeSet<(NodeId, NodeId)> = BTreeSet::new();
    for (_, element) in mesh.iter_elements() {
        for &(a, b) in &HEX_EDGES {
            let (na, nb) = (element[a], element[b]);
            if na == nb {
                continue;
            }
            set.insert((na.min(nb), na.max(nb)));
        }
    }
    set.into_iter().collect()
}
