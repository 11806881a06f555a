// Maps the fatal error taxonomy to process exit codes.

use automesh_core::MeshError;
use automesh_io::IoError;

pub const SUCCESS: i32 = 0;
pub const INPUT_SHAPE: i32 = 2;
pub const UNKNOWN_LABEL: i32 = 3;
pub const EMPTY_MESH: i32 = 4;
pub const CLASSIFICATION_MISMATCH: i32 = 5;
pub const BAD_PARAMETER: i32 = 6;
pub const IO: i32 = 7;
pub const CLI_USAGE: i32 = 64;

pub fn for_mesh_error(error: &MeshError) -> i32 {
    match error {
        MeshError::InputShape(_) => INPUT_SHAPE,
        MeshError::UnknownLabel(_) => UNKNOWN_LABEL,
        MeshError::EmptyMesh => EMPTY_MESH,
        MeshError::ClassificationMismatch(_) => CLASSIFICATION_MISMATCH,
        MeshError::BadParameter(_) => BAD_PARAMETER,
        MeshError::OutOfRange { .. } | MeshError::InvalidNodeId { .. } => BAD_PARAMETER,
    }
}

pub fn for_io_error(error: &IoError) -> i32 {
    match error {
        IoError::Io { .. } => IO,
        IoError::Npy(_) | IoError::Spn(_) | IoError::Inp(_) | IoError::UnknownExtension(_) => {
            INPUT_SHAPE
        }
        IoError::Mesh(inner) => for_mesh_error(inner),
    }
}
