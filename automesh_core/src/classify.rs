// Node hierarchy classification that gates smoothing.
//
// `Level` derives `Ord` from declaration order, the same convention the
// build-priority enum in the simulation core uses so that comparisons read
// naturally (`Level::Interior < Level::Boundary < Level::Prescribed`)
// without a hand-written `cmp`.

use std::collections::BTreeMap;

use crate::error::MeshError;
use crate::{Coord, NodeId};

/// A node's position in the three-tier smoothing hierarchy. Ordering is
/// significant: a `Boundary` node only ever averages neighbors whose level
/// is `>= Boundary`, never an `Interior` neighbor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Level {
    Interior,
    Boundary,
    Prescribed,
}

/// Assigns every mesh node a `Level` and holds the fixed coordinates of
/// `Prescribed` nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeClassifier {
    /// Indexed by `node - 1`.
    levels: Vec<Level>,
    prescribed: BTreeMap<NodeId, Coord>,
}

impl NodeClassifier {
    /// Build a classifier from a caller-supplied per-node hierarchy and the
    /// fixed coordinates of every `Prescribed` node. Fails with
    /// `ClassificationMismatch` if the two disagree: every key in
    /// `prescribed` must have `Level::Prescribed` in `hierarchy`, and every
    /// `Prescribed` entry in `hierarchy` must have a coordinate in
    /// `prescribed`.
    pub fn new(
        hierarchy: Vec<Level>,
        prescribed: BTreeMap<NodeId, Coord>,
    ) -> Result<Self, MeshError> {
        let node_count = hierarchy.len();
        for (&node, _) in &prescribed {
            let idx = node as usize;
            if idx == 0 || idx > node_count {
                return Err(MeshError::ClassificationMismatch(format!(
                    "prescribed node {node} out of range for {node_count} nodes"
                )));
            }
            if hierarchy[idx - 1] != Level::Prescribed {
                return Err(MeshError::ClassificationMismatch(format!(
                    "node {node} has a prescribed coordinate but level {:?}",
                    hierarchy[idx - 1]
                )));
            }
        }
        let prescribed_count = hierarchy.iter().filter(|&&l| l == Level::Prescribed).count();
        if prescribed_count != prescribed.len() {
            return Err(MeshError::ClassificationMismatch(format!(
                "{prescribed_count} nodes are Prescribed but only {} coordinates were supplied",
                prescribed.len()
            )));
        }
        Ok(Self {
            levels: hierarchy,
            prescribed,
        })
    }

    /// Derive a classifier from mesh topology alone: any node incident to
    /// fewer than 8 elements sharing all three of its local axes is
    /// treated as a heuristic stand-in for "on the mesh boundary" —
    /// concretely, a node whose neighbor-graph degree is below the
    /// interior degree of 6 (the degree every fully interior node of a
    /// regular hex lattice has) is classified `Boundary`, everything else
    /// `Interior`. No node is ever auto-classified `Prescribed`; callers
    /// layer prescribed ids on afterward with `with_prescribed`.
    pub fn from_mesh_topology(
        node_count: usize,
        degree: impl Fn(NodeId) -> usize,
    ) -> Result<Self, MeshError> {
        if node_count == 0 {
            return Err(MeshError::EmptyMesh);
        }
        let levels = (1..=node_count as NodeId)
            .map(|node| {
                if degree(node) < 6 {
                    Level::Boundary
                } else {
                    Level::Interior
                }
            })
            .collect();
        Ok(Self {
            levels,
            prescribed: BTreeMap::new(),
        })
    }

    /// Promote the given nodes to `Level::Prescribed` with fixed
    /// coordinates, replacing whatever level they previously held.
    pub fn with_prescribed(mut self, prescribed: BTreeMap<NodeId, Coord>) -> Result<Self, MeshError> {
        for &node in prescribed.keys() {
            let idx = node as usize;
            if idx == 0 || idx > self.levels.len() {
                return Err(MeshError::ClassificationMismatch(format!(
                    "prescribed node {node} out of range for {} nodes",
                    self.levels.len()
                )));
            }
            self.levels[idx - 1] = Level::Prescribed;
        }
        self.prescribed.extend(prescribed);
        Ok(self)
    }

    /// Level of `node` (1-based).
    pub fn level(&self, node: NodeId) -> Level {
        self.levels[node as usize - 1]
    }

    /// Fixed coordinate of a `Prescribed` node, or `None` otherwise.
    pub fn prescribed_coord(&self, node: NodeId) -> Option<Coord> {
        self.prescribed.get(&node).copied()
    }

    /// Number of nodes this classifier covers.
    pub fn node_count(&self) -> usize {
        self.levels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_ordering_matches_hierarchy() {
        assert!(Level::Interior < Level::Boundary);
        assert!(Level::Boundary < Level::Prescribed);
    }

    #[test]
    fn new_rejects_coordinate_without_prescribed_level() {
        let hierarchy = vec![Level::Interior, Level::Boundary];
        let mut prescribed = BTreeMap::new();
        prescribed.insert(1, [0.0, 0.0, 0.0]);
        assert!(matches!(
            NodeClassifier::new(hierarchy, prescribed),
            Err(MeshError::ClassificationMismatch(_))
        ));
    }

    #[test]
    fn new_rejects_prescribed_level_without_coordinate() {
        let hierarchy = vec![Level::Interior, Level::Prescribed];
        let prescribed = BTreeMap::new();
        assert!(matches!(
            NodeClassifier::new(hierarchy, prescribed),
            Err(MeshError::ClassificationMismatch(_))
        ));
    }

    #[test]
    fn new_accepts_consistent_classification() {
        let hierarchy = vec![Level::Interior, Level::Boundary, Level::Prescribed];
        let mut prescribed = BTreeMap::new();
        prescribed.insert(3, [1.0, 2.0, 3.0]);
        let classifier = NodeClassifier::new(hierarchy, prescribed).unwrap();
        assert_eq!(classifier.level(1), Level::Interior);
        assert_eq!(classifier.level(3), Level::Prescribed);
        assert_eq!(classifier.prescribed_coord(3), Some([1.0, 2.0, 3.0]));
        assert_eq!(classifier.prescribed_coord(1), None);
    }

    #[test]
    fn from_mesh_topology_classifies_by_degree() {
        let degree = |n: NodeId| if n == 1 { 6 } else { 3 };
        let classifier = NodeClassifier::from_mesh_topology(2, degree).unwrap();
        assert_eq!(classifier.level(1), Level::Interior);
        assert_eq!(classifier.level(2), Level::Boundary);
    }

    #[test]
    fn with_prescribed_promotes_existing_level() {
        let degree = |_: NodeId| 3usize;
        let classifier = NodeClassifier::from_mesh_topology(2, degree).unwrap();
        let mut prescribed = BTreeMap::new();
        prescribed.insert(2, [5.0, 5.0, 5.0]);
        let classifier = classifier.with_prescribed(prescribed).unwrap();
        assert_eq!(classifier.level(2), Level::Prescribed);
        assert_eq!(classifier.prescribed_coord(2), Some([5.0, 5.0, 5.0]));
    }
}
