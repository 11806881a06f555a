// File-format error taxonomy, layered on top of `automesh_core::MeshError`.

use automesh_core::MeshError;

/// Errors raised while reading or writing a voxel/mesh file format.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Underlying filesystem failure.
    #[error("I/O error reading/writing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A `.npy` file failed to parse or carried an unsupported dtype/rank.
    #[error("invalid .npy file: {0}")]
    Npy(String),

    /// A `.spn` file's token count did not match its declared shape, or a
    /// token failed to parse as an unsigned integer.
    #[error("invalid .spn file: {0}")]
    Spn(String),

    /// An `.inp` file was malformed: missing `*NODE`/`*ELEMENT` keyword,
    /// wrong node count per element, or an unparsable numeric field.
    #[error("invalid .inp file: {0}")]
    Inp(String),

    /// A filename had an extension `automesh_io` does not recognize.
    #[error("unrecognized file extension for {0:?}; expected .npy, .spn, or .inp")]
    UnknownExtension(String),

    /// Propagated from `automesh_core`.
    #[error(transparent)]
    Mesh(#[from] MeshError),
}
