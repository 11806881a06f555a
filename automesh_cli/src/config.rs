// Typed smoothing/build configuration, loadable from a JSON file and
// overridable by CLI flags — the smallest useful re-expression of the
// original tool's named scalar/vector parameters as a typed Rust struct
// instead of free-form config.

use automesh_core::Label;
use serde::Deserialize;

/// Parameters controlling `MeshBuilder`, deserializable from
/// `--config <path>.json`. Every field is optional so a config file may
/// specify a subset, with CLI flags filling in or overriding the rest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildConfig {
    pub included: Option<Vec<Label>>,
    pub scale: Option<[f64; 3]>,
    pub translate: Option<[f64; 3]>,
}

/// Parameters controlling `Smoother`, deserializable from
/// `--config <path>.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SmoothingConfig {
    pub algorithm: Option<String>,
    pub lambda: Option<f64>,
    pub mu: Option<f64>,
    pub iterations: Option<u32>,
}

/// Load a `BuildConfig` or `SmoothingConfig` from a JSON file.
pub fn load<T: for<'de> Deserialize<'de>>(path: &std::path::Path) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&text)
        .map_err(|e| anyhow::anyhow!("failed to parse config {}: {e}", path.display()))
}
