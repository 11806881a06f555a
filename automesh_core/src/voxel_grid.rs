// Dense 3D voxel grid: the segmented input to the mesh pipeline.
//
// Storage is a flat `Vec<Label>` indexed `[z][y][x]` (x fastest), mirroring
// the lattice convention where x is the fastest-varying axis. This gives
// O(1) label lookup with no bounds-check branch in the hot path of
// `MeshBuilder::build` beyond a single `debug_assert` on construction.
//
// Out-of-bounds reads are not silently defaulted — `MeshBuilder` only ever
// indexes voxels it enumerated itself, so an out-of-range access here would
// be a programming error, not routine traversal past a chunk edge.

use crate::{Label, error::MeshError};

/// Dense 3D array of material labels, shape `(Nz, Ny, Nx)`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoxelGrid {
    /// Flat storage: index = x + y * nx + z * nx * ny.
    labels: Vec<Label>,
    nx: u32,
    ny: u32,
    nz: u32,
}

impl VoxelGrid {
    /// Build a grid from a flat `[z][y][x]`-ordered (x fastest) label
    /// sequence. Fails with `MeshError::InputShape` if any extent is zero
    /// or the sequence length does not match `nx*ny*nz`.
    pub fn from_flat(labels: Vec<Label>, nx: u32, ny: u32, nz: u32) -> Result<Self, MeshError> {
        if nx == 0 || ny == 0 || nz == 0 {
            return Err(MeshError::InputShape(format!(
                "voxel grid must have non-zero extents in all 3 dimensions, got ({nx}, {ny}, {nz})"
            )));
        }
        let expected = nx as usize * ny as usize * nz as usize;
        if labels.len() != expected {
            return Err(MeshError::InputShape(format!(
                "expected {expected} voxel labels for shape ({nx}, {ny}, {nz}), got {}",
                labels.len()
            )));
        }
        Ok(Self { labels, nx, ny, nz })
    }

    /// Voxel extents `(nx, ny, nz)`.
    pub fn shape(&self) -> (u32, u32, u32) {
        (self.nx, self.ny, self.nz)
    }

    fn index(&self, ix: u32, iy: u32, iz: u32) -> usize {
        debug_assert!(ix < self.nx && iy < self.ny && iz < self.nz);
        ix as usize + iy as usize * self.nx as usize + iz as usize * (self.nx as usize * self.ny as usize)
    }

    /// Read the material label at voxel `(ix, iy, iz)`. Panics if the
    /// coordinate is out of bounds — callers are expected to iterate within
    /// `shape()`, per this module's doc comment.
    pub fn get(&self, ix: u32, iy: u32, iz: u32) -> Label {
        self.labels[self.index(ix, iy, iz)]
    }

    /// Iterate all voxels in the lexicographic `(iz, iy, ix)` traversal
    /// order required for element collection, yielding `((ix, iy, iz),
    /// label)`.
    pub fn iter_lex(&self) -> impl Iterator<Item = ((u32, u32, u32), Label)> + '_ {
        let (nx, ny, nz) = (self.nx, self.ny, self.nz);
        (0..nz).flat_map(move |iz| {
            (0..ny).flat_map(move |iy| (0..nx).map(move |ix| (ix, iy, iz)))
        }).map(move |(ix, iy, iz)| ((ix, iy, iz), self.get(ix, iy, iz)))
    }

    /// Whether `label` appears anywhere in the grid.
    pub fn contains_label(&self, label: Label) -> bool {
        self.labels.iter().any(|&l| l == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_flat_rejects_zero_extent() {
        assert!(matches!(
            VoxelGrid::from_flat(vec![], 0, 1, 1),
            Err(MeshError::InputShape(_))
        ));
    }

    #[test]
    fn from_flat_rejects_length_mismatch() {
        assert!(matches!(
            VoxelGrid::from_flat(vec![1, 2, 3], 2, 2, 1),
            Err(MeshError::InputShape(_))
        ));
    }

    #[test]
    fn get_reads_x_fastest() {
        // nx=2, ny=1, nz=1: flat [a, b] -> (0,0,0)=a, (1,0,0)=b.
        let grid = VoxelGrid::from_flat(vec![10, 20], 2, 1, 1).unwrap();
        assert_eq!(grid.get(0, 0, 0), 10);
        assert_eq!(grid.get(1, 0, 0), 20);
    }

    #[test]
    fn iter_lex_visits_x_then_y_then_z() {
        let grid = VoxelGrid::from_flat((0..8).collect(), 2, 2, 2).unwrap();
        let visited: Vec<_> = grid.iter_lex().map(|(c, _)| c).collect();
        assert_eq!(
            visited,
            vec![
                (0, 0, 0),
                (1, 0, 0),
                (0, 1, 0),
                (1, 1, 0),
                (0, 0, 1),
                (1, 0, 1),
                (0, 1, 1),
                (1, 1, 1),
            ]
        );
    }

    #[test]
    fn contains_label() {
        let grid = VoxelGrid::from_flat(vec![0, 99, 0, 99], 4, 1, 1).unwrap();
        assert!(grid.contains_label(99));
        assert!(!grid.contains_label(5));
    }
}
