pub mod analyze;
pub mod check;

use anyhow::Context;
use core_model::Model;

/// Load a model file, attaching the path to any error
pub fn load(file_path: &str) -> anyhow::Result<Model> {
    app_utils::load_model_from_file(file_path)
        .with_context(|| format!("Failed to load model from {}", file_path))
}
