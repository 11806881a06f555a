// Mesh data model and the voxel-to-hex-mesh builder.
//
// `MeshBuilder::build` runs a four-stage algorithm: collect (lex-order voxel
// traversal, inclusion filter), group (by ascending block label, preserving
// lex order within a block), compact (drop unused lattice nodes, renumber
// survivors 1..|U| by ascending original lattice id), and materialize
// (affine-transform each surviving node's recovered `(i,j,k)` into a
// physical coordinate).
//
// Node ids are assigned purely by ascending original lattice id — which
// block first referenced a node never affects its compacted id.

use std::collections::BTreeMap;

use crate::error::MeshError;
use crate::lattice::{lattice_coord, voxel_corners};
use crate::voxel_grid::VoxelGrid;
use crate::{Coord, Label, NodeId};

/// One hex element: 8 compacted node ids in the fixed canonical winding.
pub type Element = [NodeId; 8];

/// All elements sharing a material label, in lex voxel order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    pub label: Label,
    pub elements: Vec<Element>,
}

/// A built hexahedral mesh: block-grouped connectivity plus 1-indexed node
/// coordinates. Every node id in `[1, node_count]` is referenced by at
/// least one element, and every element references only ids in that range,
/// for any `Mesh` returned by `MeshBuilder::build`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mesh {
    /// Ascending by `Block::label`.
    pub blocks: Vec<Block>,
    /// `coordinates[i]` is the physical position of node id `i + 1`.
    pub coordinates: Vec<Coord>,
}

impl Mesh {
    /// Number of nodes in the mesh.
    pub fn node_count(&self) -> usize {
        self.coordinates.len()
    }

    /// Physical coordinate of `node` (1-based). `None` if out of range.
    pub fn coordinate(&self, node: NodeId) -> Option<Coord> {
        self.coordinates.get(node.checked_sub(1)? as usize).copied()
    }

    /// Total element count across all blocks.
    pub fn element_count(&self) -> usize {
        self.blocks.iter().map(|b| b.elements.len()).sum()
    }

    /// Iterate `(label, element)` pairs in block emission order: ascending
    /// block label, then lex voxel order within a block. This is the order
    /// `automesh_io`'s INP writer uses to assign globally 1-based ascending
    /// element ids.
    pub fn iter_elements(&self) -> impl Iterator<Item = (Label, &Element)> {
        self.blocks
            .iter()
            .flat_map(|b| b.elements.iter().map(move |e| (b.label, e)))
    }

    /// Validate that every referenced node id falls in `[1, node_count]`
    /// and that every id in that range is referenced by at least one
    /// element (no orphan nodes survive compaction).
    pub fn validate_node_density(&self) -> Result<(), MeshError> {
        let node_count = self.node_count();
        let mut seen = vec![false; node_count];
        for (_, element) in self.iter_elements() {
            for &node in element {
                let idx = node.checked_sub(1).ok_or(MeshError::InvalidNodeId {
                    node,
                    node_count,
                })? as usize;
                let slot = seen.get_mut(idx).ok_or(MeshError::InvalidNodeId {
                    node,
                    node_count,
                })?;
                *slot = true;
            }
        }
        if let Some(idx) = seen.iter().position(|&s| !s) {
            return Err(MeshError::InvalidNodeId {
                node: idx as NodeId + 1,
                node_count,
            });
        }
        Ok(())
    }
}

/// Builds a `Mesh` from a `VoxelGrid`, an inclusion set of material labels,
/// and an affine transform from lattice-corner integer coordinates to
/// physical space.
pub struct MeshBuilder {
    scale: Coord,
    translate: Coord,
}

impl MeshBuilder {
    /// `scale` and `translate` default to `(1,1,1)` and `(0,0,0)`.
    pub fn new() -> Self {
        Self {
            scale: [1.0, 1.0, 1.0],
            translate: [0.0, 0.0, 0.0],
        }
    }

    pub fn with_scale(mut self, scale: Coord) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_translate(mut self, translate: Coord) -> Self {
        self.translate = translate;
        self
    }

    /// Run the build algorithm. `included` need not be sorted or deduped.
    pub fn build(&self, grid: &VoxelGrid, included: &[Label]) -> Result<Mesh, MeshError> {
        for component in self.scale.iter().chain(self.translate.iter()) {
            if !component.is_finite() {
                return Err(MeshError::BadParameter(
                    "scale and translate components must be finite".to_string(),
                ));
            }
        }

        for &label in included {
            if label == 0 {
                return Err(MeshError::BadParameter(
                    "0 is never a valid block label".to_string(),
                ));
            }
            if !grid.contains_label(label) {
                return Err(MeshError::UnknownLabel(label));
            }
        }

        let (nx, ny, nz) = grid.shape();
        let included: std::collections::BTreeSet<Label> = included.iter().copied().collect();

        // Stage 1+2: collect in lex order, grouped by ascending label via a
        // BTreeMap keyed by label (ascending iteration order is free).
        let mut by_label: BTreeMap<Label, Vec<[u32; 8]>> = BTreeMap::new();
        for ((ix, iy, iz), label) in grid.iter_lex() {
            if !included.contains(&label) {
                continue;
            }
            let corners = voxel_corners(ix as i64, iy as i64, iz as i64, nx, ny, nz)?;
            by_label.entry(label).or_default().push(corners);
        }

        if by_label.is_empty() {
            return Err(MeshError::EmptyMesh);
        }

        // Stage 3: compact. Collect every referenced original lattice id,
        // sort+dedup, assign 1..|U| by ascending original id.
        let mut referenced: Vec<u32> = by_label
            .values()
            .flat_map(|elems| elems.iter().flatten().copied())
            .collect();
        referenced.sort_unstable();
        referenced.dedup();

        let mut remap: BTreeMap<u32, NodeId> = BTreeMap::new();
        for (new_id, &original_id) in referenced.iter().enumerate() {
            remap.insert(original_id, new_id as NodeId + 1);
        }

        let blocks: Vec<Block> = by_label
            .into_iter()
            .map(|(label, elems)| Block {
                label,
                elements: elems
                    .into_iter()
                    .map(|corners| corners.map(|id| remap[&id]))
                    .collect(),
            })
            .collect();

        // Stage 4: materialize coordinates in compacted order.
        let mut coordinates = Vec::with_capacity(referenced.len());
        for &original_id in &referenced {
            let (i, j, k) = lattice_coord(original_id, nx, ny, nz)?;
            coordinates.push([
                self.translate[0] + self.scale[0] * i as f64,
                self.translate[1] + self.scale[1] * j as f64,
                self.translate[2] + self.scale[2] * k as f64,
            ]);
        }

        Ok(Mesh { blocks, coordinates })
    }
}

impl Default for MeshBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_from(labels: &[u32], nx: u32, ny: u32, nz: u32) -> VoxelGrid {
        VoxelGrid::from_flat(labels.to_vec(), nx, ny, nz).unwrap()
    }

    #[test]
    fn s1_single_voxel() {
        let grid = grid_from(&[11], 1, 1, 1);
        let mesh = MeshBuilder::new().build(&grid, &[11]).unwrap();
        assert_eq!(mesh.element_count(), 1);
        assert_eq!(mesh.node_count(), 8);
        let (_, element) = mesh.iter_elements().next().unwrap();
        // Per lattice.rs's winding resolution: (1,2,4,3,5,6,8,7).
        assert_eq!(*element, [1, 2, 4, 3, 5, 6, 8, 7]);
        assert_eq!(mesh.coordinate(1).unwrap(), [0.0, 0.0, 0.0]);
        assert_eq!(mesh.coordinate(8).unwrap(), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn s2_double_along_x() {
        let grid = grid_from(&[11, 11], 2, 1, 1);
        let mesh = MeshBuilder::new().build(&grid, &[11]).unwrap();
        assert_eq!(mesh.element_count(), 2);
        assert_eq!(mesh.node_count(), 12);
        mesh.validate_node_density().unwrap();

        let mut xs: Vec<f64> = mesh.coordinates.iter().map(|c| c[0]).collect();
        xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        xs.dedup_by(|a, b| (*a - *b).abs() < 1e-12);
        assert_eq!(xs, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn s3_quadruple_with_voids_compacts_to_16_nodes() {
        let grid = grid_from(&[99, 0, 0, 99], 4, 1, 1);
        let mesh = MeshBuilder::new().build(&grid, &[99]).unwrap();
        assert_eq!(mesh.element_count(), 2);
        assert_eq!(mesh.node_count(), 16);
        mesh.validate_node_density().unwrap();
    }

    #[test]
    fn s4_two_blocks_ascending_label_then_lex_order() {
        let grid = grid_from(&[100, 101, 101, 100], 4, 1, 1);
        let mesh = MeshBuilder::new().build(&grid, &[100, 101]).unwrap();
        assert_eq!(mesh.blocks.len(), 2);
        assert_eq!(mesh.blocks[0].label, 100);
        assert_eq!(mesh.blocks[1].label, 101);
        assert_eq!(mesh.blocks[0].elements.len(), 2);
        assert_eq!(mesh.blocks[1].elements.len(), 2);

        // Node ids are assigned by ascending original lattice id, so block
        // 100's two elements (voxels 0 and 3) reference ids interleaved
        // with block 101's (voxels 1 and 2), not two contiguous ranges.
        let max_in_block_100 = mesh.blocks[0]
            .elements
            .iter()
            .flatten()
            .copied()
            .max()
            .unwrap();
        let min_in_block_101 = mesh.blocks[1]
            .elements
            .iter()
            .flatten()
            .copied()
            .min()
            .unwrap();
        assert!(
            max_in_block_100 > min_in_block_101,
            "block 100's node ids should interleave with block 101's"
        );
    }

    #[test]
    fn unknown_label_is_an_error() {
        let grid = grid_from(&[11], 1, 1, 1);
        assert_eq!(
            MeshBuilder::new().build(&grid, &[42]),
            Err(MeshError::UnknownLabel(42))
        );
    }

    #[test]
    fn zero_label_in_included_is_an_error() {
        let grid = grid_from(&[0], 1, 1, 1);
        assert!(matches!(
            MeshBuilder::new().build(&grid, &[0]),
            Err(MeshError::BadParameter(_))
        ));
    }

    #[test]
    fn empty_inclusion_result_is_an_error() {
        let grid = grid_from(&[0], 1, 1, 1);
        // label 0 is present but not included -> nothing survives.
        assert_eq!(
            MeshBuilder::new().build(&grid, &[]),
            Err(MeshError::EmptyMesh)
        );
    }

    #[test]
    fn non_finite_scale_is_bad_parameter() {
        let grid = grid_from(&[11], 1, 1, 1);
        let err = MeshBuilder::new()
            .with_scale([f64::NAN, 1.0, 1.0])
            .build(&grid, &[11]);
        assert!(matches!(err, Err(MeshError::BadParameter(_))));
    }

    #[test]
    fn conformity_shared_face_same_node_ids() {
        // Two adjacent voxels share a face; both elements must reference the
        // same 4 node ids for that face.
        let grid = grid_from(&[11, 11], 2, 1, 1);
        let mesh = MeshBuilder::new().build(&grid, &[11]).unwrap();
        let e0 = mesh.blocks[0].elements[0];
        let e1 = mesh.blocks[0].elements[1];
        // local corners 2,3,6,7 (index 1,2,5,6) of voxel 0 sit on the shared
        // face, matching local corners 1,4,5,8 (index 0,3,4,7) of voxel 1.
        assert_eq!(e0[1], e1[0]);
        assert_eq!(e0[2], e1[3]);
        assert_eq!(e0[5], e1[4]);
        assert_eq!(e0[6], e1[7]);
    }
}
