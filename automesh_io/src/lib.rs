// automesh_io — file-format collaborators for automesh_core.
//
// This crate is the only place in the workspace that touches the
// filesystem. It translates `.npy`, `.spn`, and `.inp` files to and from
// `automesh_core`'s pure types; it contains no mesh algorithms itself.
//
// - `npy.rs`: 3-D NumPy array of voxel labels (`VoxelGrid` round-trip).
// - `spn.rs`: whitespace-separated ASCII integer voxel labels.
// - `inp.rs`: Abaqus-style ASCII mesh export/import (`Mesh` round-trip).
// - `error.rs`: `IoError`, layered on `automesh_core::MeshError`.

pub mod error;
pub mod inp;
pub mod npy;
pub mod spn;

pub use error::IoError;

use std::path::Path;

use automesh_core::mesh::Mesh;
use automesh_core::voxel_grid::VoxelGrid;

/// Recognized input voxel-grid format, inferred from a file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoxelFormat {
    Npy,
    Spn,
}

/// Infer a `VoxelFormat` from a path's extension.
pub fn infer_voxel_format(path: &Path) -> Result<VoxelFormat, IoError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("npy") => Ok(VoxelFormat::Npy),
        Some(ext) if ext.eq_ignore_ascii_case("spn") => Ok(VoxelFormat::Spn),
        _ => Err(IoError::UnknownExtension(path.display().to_string())),
    }
}

/// Read a voxel grid from `.npy` or `.spn`, inferring format from the
/// extension. `.spn` requires `shape` since the format carries no header.
pub fn read_voxel_grid(path: &Path, shape: Option<(u32, u32, u32)>) -> Result<VoxelGrid, IoError> {
    match infer_voxel_format(path)? {
        VoxelFormat::Npy => npy::read_npy(path),
        VoxelFormat::Spn => {
            let (nx, ny, nz) = shape.ok_or_else(|| {
                IoError::Spn("reading a .spn file requires an explicit shape".to_string())
            })?;
            spn::read_spn(path, nx, ny, nz)
        }
    }
}

/// Write a voxel grid to `.npy` or `.spn`, inferring format from the
/// extension.
pub fn write_voxel_grid(path: &Path, grid: &VoxelGrid) -> Result<(), IoError> {
    match infer_voxel_format(path)? {
        VoxelFormat::Npy => npy::write_npy(path, grid),
        VoxelFormat::Spn => spn::write_spn(path, grid),
    }
}

/// Write a built mesh to `.inp`.
pub fn write_mesh(path: &Path, mesh: &Mesh) -> Result<(), IoError> {
    inp::write_inp(path, mesh)
}

/// Read a mesh back from `.inp`.
pub fn read_mesh(path: &Path) -> Result<Mesh, IoError> {
    inp::read_inp(path)
}
