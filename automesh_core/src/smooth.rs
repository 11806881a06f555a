// Hierarchical Laplace/Taubin smoothing.
//
// Unlike the Gauss-Seidel relaxation in the structural solver this crate
// was split out of — which updates each node in place so later nodes see
// earlier nodes' updates within the same pass — every iteration here is
// Jacobi: read a full snapshot of the previous pass's coordinates, write
// the new pass into a fresh buffer, then swap. Node traversal order within
// a pass is therefore never observable in the result.

use crate::classify::{Level, NodeClassifier};
use crate::error::MeshError;
use crate::neighbor::NeighborGraph;
use crate::{Coord, NodeId};

/// Smoothing algorithm and its step parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "algorithm", rename_all = "snake_case")
)]
pub enum Algorithm {
    /// `coord' = coord + lambda * (mean_neighbor - coord)`.
    Laplace { lambda: f64 },
    /// One Laplace pass with `lambda` followed by one with `mu` each
    /// iteration; `mu` is conventionally negative to counteract shrinkage.
    Taubin { lambda: f64, mu: f64 },
}

impl Algorithm {
    fn passes(&self) -> Vec<f64> {
        match *self {
            Algorithm::Laplace { lambda } => vec![lambda],
            Algorithm::Taubin { lambda, mu } => vec![lambda, mu],
        }
    }

    fn validate(&self) -> Result<(), MeshError> {
        let bad_step = |x: f64| !x.is_finite() || x <= 0.0;
        let bad_finite = |x: f64| !x.is_finite();
        match *self {
            Algorithm::Laplace { lambda } if bad_step(lambda) => Err(MeshError::BadParameter(
                "lambda must be finite and positive".to_string(),
            )),
            Algorithm::Taubin { lambda, mu } if bad_step(lambda) || bad_finite(mu) => {
                Err(MeshError::BadParameter(
                    "lambda must be finite and positive, mu must be finite".to_string(),
                ))
            }
            _ => Ok(()),
        }
    }
}

/// Runs a smoothing algorithm over a node coordinate buffer, respecting the
/// three-tier hierarchy: a node at level `L` only averages neighbors whose
/// level is `>= L`, and a `Prescribed` node never moves.
pub struct Smoother<'a> {
    graph: &'a NeighborGraph,
    classifier: &'a NodeClassifier,
}

impl<'a> Smoother<'a> {
    pub fn new(graph: &'a NeighborGraph, classifier: &'a NodeClassifier) -> Self {
        Self { graph, classifier }
    }

    /// Smooth `coordinates` in place for `iterations` Jacobi sweeps of
    /// `algorithm`. `iterations < 1` is a `BadParameter` error. Before the
    /// first sweep, every `Prescribed` node's coordinate is overwritten
    /// with its fixed value from the classifier.
    pub fn smooth(
        &self,
        coordinates: &mut [Coord],
        algorithm: Algorithm,
        iterations: u32,
    ) -> Result<(), MeshError> {
        algorithm.validate()?;
        if iterations < 1 {
            return Err(MeshError::BadParameter(
                "iterations must be >= 1".to_string(),
            ));
        }
        if coordinates.len() != self.classifier.node_count()
            || coordinates.len() != self.graph.node_count()
        {
            return Err(MeshError::BadParameter(
                "coordinate buffer length must match classifier and neighbor graph node counts"
                    .to_string(),
            ));
        }

        for node in 1..=coordinates.len() as NodeId {
            if let Some(fixed) = self.classifier.prescribed_coord(node) {
                coordinates[node as usize - 1] = fixed;
            }
        }

        for _ in 0..iterations {
            for step in algorithm.passes() {
                self.laplace_pass(coordinates, step);
            }
        }

        Ok(())
    }

    fn laplace_pass(&self, coordinates: &mut [Coord], lambda: f64) {
        let snapshot = coordinates.to_vec();
        for node in 1..=coordinates.len() as NodeId {
            let level = self.classifier.level(node);
            if level == Level::Prescribed {
                continue;
            }
            let eligible: Vec<NodeId> = self
                .graph
                .neighbors(node)
                .iter()
                .copied()
                .filter(|&n| self.classifier.level(n) >= level)
                .collect();
            if eligible.is_empty() {
                continue;
            }
            let mut mean = [0.0f64; 3];
            for &neighbor in &eligible {
                let pos = snapshot[neighbor as usize - 1];
                mean[0] += pos[0];
                mean[1] += pos[1];
                mean[2] += pos[2];
            }
            let count = eligible.len() as f64;
            for axis in mean.iter_mut() {
                *axis /= count;
            }
            let current = snapshot[node as usize - 1];
            let idx = node as usize - 1;
            coordinates[idx] = [
                current[0] + lambda * (mean[0] - current[0]),
                current[1] + lambda * (mean[1] - current[1]),
                current[2] + lambda * (mean[2] - current[2]),
            ];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::NodeClassifier;
    use crate::mesh::MeshBuilder;
    use crate::neighbor::NeighborGraph;
    use crate::voxel_grid::VoxelGrid;
    use std::collections::BTreeMap;

    fn line_of_three() -> (NeighborGraph, NodeClassifier, Vec<Coord>) {
        // 3 voxels along x -> 4x2x2 lattice collapsed... simplest: 3 nodes
        // in a hand-built chain, bypassing mesh construction for a focused
        // smoothing test.
        let grid = VoxelGrid::from_flat(vec![1, 1, 1], 3, 1, 1).unwrap();
        let mesh = MeshBuilder::new().build(&grid, &[1]).unwrap();
        let graph = NeighborGraph::from_mesh(&mesh);
        let node_count = mesh.node_count();
        let levels = vec![Level::Interior; node_count];
        let classifier = NodeClassifier::new(levels, BTreeMap::new()).unwrap();
        (graph, classifier, mesh.coordinates.clone())
    }

    #[test]
    fn rejects_zero_iterations() {
        let (graph, classifier, mut coords) = line_of_three();
        let smoother = Smoother::new(&graph, &classifier);
        let err = smoother.smooth(&mut coords, Algorithm::Laplace { lambda: 0.5 }, 0);
        assert!(matches!(err, Err(MeshError::BadParameter(_))));
    }

    #[test]
    fn rejects_non_finite_lambda() {
        let (graph, classifier, mut coords) = line_of_three();
        let smoother = Smoother::new(&graph, &classifier);
        let err = smoother.smooth(
            &mut coords,
            Algorithm::Laplace { lambda: f64::INFINITY },
            1,
        );
        assert!(matches!(err, Err(MeshError::BadParameter(_))));
    }

    #[test]
    fn rejects_zero_lambda() {
        let (graph, classifier, mut coords) = line_of_three();
        let smoother = Smoother::new(&graph, &classifier);
        let err = smoother.smooth(&mut coords, Algorithm::Laplace { lambda: 0.0 }, 1);
        assert!(matches!(err, Err(MeshError::BadParameter(_))));
    }

    #[test]
    fn rejects_negative_lambda() {
        let (graph, classifier, mut coords) = line_of_three();
        let smoother = Smoother::new(&graph, &classifier);
        let err = smoother.smooth(&mut coords, Algorithm::Taubin { lambda: -1.0, mu: -0.52 }, 1);
        assert!(matches!(err, Err(MeshError::BadParameter(_))));
    }

    #[test]
    fn prescribed_node_never_moves() {
        let (graph, classifier, mut coords) = line_of_three();
        let prescribed_node = 1;
        let fixed = coords[0];
        let mut levels = vec![Level::Interior; classifier.node_count()];
        levels[0] = Level::Prescribed;
        let mut prescribed = BTreeMap::new();
        prescribed.insert(prescribed_node, fixed);
        let classifier = NodeClassifier::new(levels, prescribed).unwrap();

        let smoother = Smoother::new(&graph, &classifier);
        smoother
            .smooth(&mut coords, Algorithm::Laplace { lambda: 0.5 }, 5)
            .unwrap();
        assert_eq!(coords[0], fixed);
    }

    #[test]
    fn laplace_moves_interior_node_toward_neighbor_mean() {
        let (graph, classifier, mut coords) = line_of_three();
        // Perturb the middle node off the lattice mean of its two neighbors.
        let middle = 2; // lattice id 2 may not be the geometric middle; use
                         // the actual mesh topology by checking the result
                         // direction rather than a hardcoded id.
        let before = coords.clone();
        let smoother = Smoother::new(&graph, &classifier);
        smoother
            .smooth(&mut coords, Algorithm::Laplace { lambda: 1.0 }, 1)
            .unwrap();
        // With lambda=1, every non-isolated interior node jumps exactly to
        // its neighbor mean. Some node must have moved, since not all nodes
        // started at their neighbor mean on an irregular-degree lattice.
        assert_ne!(before, coords);
        let _ = middle;
    }

    #[test]
    fn taubin_runs_two_passes_per_iteration() {
        let (graph, classifier, mut coords) = line_of_three();
        let smoother = Smoother::new(&graph, &classifier);
        smoother
            .smooth(
                &mut coords,
                Algorithm::Taubin {
                    lambda: 0.5,
                    mu: -0.52,
                },
                3,
            )
            .unwrap();
        for coord in &coords {
            assert!(coord.iter().all(|c| c.is_finite()));
        }
    }

    #[test]
    fn mismatched_buffer_length_is_bad_parameter() {
        let (graph, classifier, _) = line_of_three();
        let mut short = vec![[0.0; 3]; 1];
        let smoother = Smoother::new(&graph, &classifier);
        let err = smoother.smooth(&mut short, Algorithm::Laplace { lambda: 0.5 }, 1);
        assert!(matches!(err, Err(MeshError::BadParameter(_))));
    }
}
