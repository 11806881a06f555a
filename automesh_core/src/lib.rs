// automesh_core — pure Rust voxel-to-hex-mesh conversion and smoothing.
//
// This crate contains all core algorithms for automesh: the dense voxel
// grid, the lattice corner indexer, the mesh builder (inclusion + node
// compaction), the neighbor graph, the node hierarchy classifier, and the
// Laplace/Taubin smoother. It has zero file-I/O or CLI dependencies and can
// be tested and benchmarked headless.
//
// Module overview:
// - `error.rs`:      `MeshError` — the fatal error taxonomy for the whole core.
// - `voxel_grid.rs`: `VoxelGrid` — dense 3D array of material labels.
// - `lattice.rs`:    Pure arithmetic mapping lattice-corner coordinates to
//                    1-based global node ids and per-voxel hex connectivity.
// - `mesh.rs`:       `Mesh`, `Block`, `Element` + `MeshBuilder` (inclusion,
//                    grouping, node compaction, coordinate materialization).
// - `neighbor.rs`:   `NeighborGraph` — per-node edge-adjacency derived from
//                    hex connectivity.
// - `classify.rs`:   `Level`, `NodeClassifier` — the three-tier hierarchy
//                    (INTERIOR/BOUNDARY/PRESCRIBED) that gates smoothing.
// - `smooth.rs`:     `Smoother`, `Algorithm` — hierarchical Laplace/Taubin
//                    iteration over node coordinates.
// - `edges.rs`:      `edge_pairs` — unique unordered edge set, used by
//                    visualization collaborators and as a test seam.
//
// The companion crate `automesh_io` reads/writes `.npy`/`.spn`/`.inp` and
// converts file-format data into/out of the types defined here. That
// boundary is enforced at the compiler level: this crate never performs
// file I/O.
//
// **Critical constraint: determinism.** Every operation here is a pure
// function over owned buffers. No randomness, no system time, no OS
// entropy, and no hash-based collections where ordering would otherwise
// become platform-dependent — dense arrays keyed by node id are used
// instead.

pub mod classify;
pub mod edges;
pub mod error;
pub mod lattice;
pub mod mesh;
pub mod neighbor;
pub mod smooth;
pub mod voxel_grid;

pub use classify::{Level, NodeClassifier};
pub use edges::edge_pairs;
pub use error::MeshError;
pub use lattice::{lattice_coord, lattice_id, voxel_corners};
pub use mesh::{Block, Element, Mesh, MeshBuilder};
pub use neighbor::NeighborGraph;
pub use smooth::{Algorithm, Smoother};
pub use voxel_grid::VoxelGrid;

/// A 1-based global node identifier, shared by lattice nodes (pre-compaction)
/// and mesh nodes (post-compaction).
pub type NodeId = u32;

/// A 1-based block (material) label. Never zero — see `MeshError::InputShape`
/// and `Mesh` invariant I4.
pub type Label = u32;

/// A physical 3D coordinate, stored as 64-bit floats so exact-equality
/// fiducial tests are reproducible bit-for-bit.
pub type Coord = [f64; 3];
