// `.spn` collaborator: whitespace-separated ASCII decimal labels in lex
// `(x, y, z)` order, x fastest, with an explicit caller-supplied shape
// (the format carries no header). An optional leading `#`-prefixed comment
// line, seen in some fixture files, is discarded before parsing.

use std::path::Path;

use automesh_core::voxel_grid::VoxelGrid;

use crate::error::IoError;

fn io_err(path: &Path, source: std::io::Error) -> IoError {
    IoError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Read a `.spn` file. `(nx, ny, nz)` must be supplied by the caller since
/// the format has no header.
pub fn read_spn(path: &Path, nx: u32, ny: u32, nz: u32) -> Result<VoxelGrid, IoError> {
    let text = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let body = text
        .strip_prefix('#')
        .and_then(|rest| rest.split_once('\n'))
        .map(|(_, rest)| rest)
        .unwrap_or(&text);

    let labels = body
        .split_whitespace()
        .map(|token| {
            token
                .parse::<u32>()
                .map_err(|e| IoError::Spn(format!("could not parse label {token:?}: {e}")))
        })
        .collect::<Result<Vec<u32>, IoError>>()?;

    tracing::debug!(
        nx,
        ny,
        nz,
        count = labels.len(),
        path = %path.display(),
        "read .spn voxel array"
    );
    VoxelGrid::from_flat(labels, nx, ny, nz).map_err(IoError::Mesh)
}

/// Write a `VoxelGrid` to a `.spn` file, one label per line, in lex
/// `(x, y, z)` order (x fastest).
pub fn write_spn(path: &Path, grid: &VoxelGrid) -> Result<(), IoError> {
    let mut body = String::new();
    for (_, label) in grid.iter_lex() {
        body.push_str(&label.to_string());
        body.push('\n');
    }
    std::fs::write(path, body).map_err(|e| io_err(path, e))?;
    let (nx, ny, nz) = grid.shape();
    tracing::info!(path = %path.display(), nx, ny, nz, "wrote .spn voxel array");
    Ok(())
}
