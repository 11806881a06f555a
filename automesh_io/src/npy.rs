// `.npy` collaborator: reads/writes a `VoxelGrid` as a 3-D NumPy array.
//
// Axis order on disk is `[Nz][Ny][Nx]` (z slowest-varying), matching the
// original tooling's slice-stacking convention of building a voxel volume
// as 2-D `(y, x)` slices stacked along a new leading `z` axis. dtype is
// read by trying each unsigned integer width the format allows, widest
// last, and widening whatever matches to the `u32` labels `automesh_core`
// uses internally.

use std::path::Path;

use automesh_core::voxel_grid::VoxelGrid;
use ndarray::Array3;
use ndarray_npy::{ReadNpyExt, WriteNpyExt};

use crate::error::IoError;

fn io_err(path: &Path, source: std::io::Error) -> IoError {
    IoError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Read a `.npy` file into a `VoxelGrid`. The array must be rank 3.
pub fn read_npy(path: &Path) -> Result<VoxelGrid, IoError> {
    let array = read_array(path)?;
    let (nz, ny, nx) = array.dim();
    tracing::debug!(nx, ny, nz, path = %path.display(), "read .npy voxel array");

    let mut labels = Vec::with_capacity(nx * ny * nz);
    for iz in 0..nz {
        for iy in 0..ny {
            for ix in 0..nx {
                labels.push(array[[iz, iy, ix]]);
            }
        }
    }
    VoxelGrid::from_flat(labels, nx as u32, ny as u32, nz as u32).map_err(IoError::Mesh)
}

fn read_array(path: &Path) -> Result<Array3<u32>, IoError> {
    let file = std::fs::File::open(path).map_err(|e| io_err(path, e))?;
    if let Ok(array) = Array3::<u32>::read_npy(&file) {
        return Ok(array);
    }
    let file = std::fs::File::open(path).map_err(|e| io_err(path, e))?;
    if let Ok(array) = Array3::<u8>::read_npy(&file) {
        return Ok(array.mapv(u32::from));
    }
    let file = std::fs::File::open(path).map_err(|e| io_err(path, e))?;
    if let Ok(array) = Array3::<u16>::read_npy(&file) {
        return Ok(array.mapv(u32::from));
    }
    let file = std::fs::File::open(path).map_err(|e| io_err(path, e))?;
    if let Ok(array) = Array3::<u64>::read_npy(&file) {
        let shape = array.raw_dim();
        let flat: Option<Vec<u32>> = array.iter().map(|&v| u32::try_from(v).ok()).collect();
        return flat
            .map(|flat| Array3::from_shape_vec(shape, flat).unwrap())
            .ok_or_else(|| IoError::Npy("label value exceeds u32 range".to_string()));
    }
    Err(IoError::Npy(format!(
        "unsupported dtype or rank (expected a rank-3 unsigned integer array) in {}",
        path.display()
    )))
}

/// Write a `VoxelGrid` to a `.npy` file as a `[Nz][Ny][Nx]` `u32` array.
pub fn write_npy(path: &Path, grid: &VoxelGrid) -> Result<(), IoError> {
    let (nx, ny, nz) = grid.shape();
    let mut array = Array3::<u32>::zeros((nz as usize, ny as usize, nx as usize));
    for ((ix, iy, iz), label) in grid.iter_lex() {
        array[[iz as usize, iy as usize, ix as usize]] = label;
    }
    let mut file = std::fs::File::create(path).map_err(|e| io_err(path, e))?;
    array
        .write_npy(&mut file)
        .map_err(|e| IoError::Npy(format!("failed to write {}: {e}", path.display())))?;
    tracing::info!(path = %path.display(), nx, ny, nz, "wrote .npy voxel array");
    Ok(())
}
