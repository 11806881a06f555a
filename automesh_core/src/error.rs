// Fatal error taxonomy for the automesh core.
//
// All fatal errors are surfaced to the caller; the core never retries,
// logs, or masks an error (see lib.rs's determinism/purity constraint).
// `automesh_io` and `automesh_cli` map each variant to a distinct process
// exit code.

use crate::{Label, NodeId};

/// Errors raised by `automesh_core` operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    /// A lattice-corner coordinate fell outside `[0, Nx] x [0, Ny] x [0, Nz]`.
    #[error("lattice coordinate ({i}, {j}, {k}) out of range for shape ({nx}, {ny}, {nz})")]
    OutOfRange {
        i: i64,
        j: i64,
        k: i64,
        nx: u32,
        ny: u32,
        nz: u32,
    },

    /// The voxel grid was empty or not 3-dimensional, or an SPN element
    /// count did not match the declared shape.
    #[error("{0}")]
    InputShape(String),

    /// A requested inclusion label does not appear anywhere in the grid.
    #[error("label {0} not present in voxel grid")]
    UnknownLabel(Label),

    /// No voxel survived inclusion filtering.
    #[error("no voxel survived inclusion filtering; mesh would be empty")]
    EmptyMesh,

    /// The declared `PRESCRIBED` node count did not match the prescribed
    /// coordinate table, or a prescribed id had a non-`PRESCRIBED` level.
    #[error("{0}")]
    ClassificationMismatch(String),

    /// An out-of-domain numeric parameter: iteration count `< 1`,
    /// non-finite `scale`/`translate`, or a non-positive Laplace step.
    #[error("{0}")]
    BadParameter(String),

    /// A mesh referenced a node id outside `[1, node_count]` (invariant I1),
    /// or some id in `[1, node_count]` was never referenced (invariant I2).
    #[error("node id {node} invalid for mesh with {node_count} nodes")]
    InvalidNodeId { node: NodeId, node_count: usize },
}
