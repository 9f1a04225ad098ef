pub mod buffer;
pub mod error;
pub mod generator;
pub mod names;
pub mod order;
pub mod types;

pub use buffer::Buffer;
pub use error::{CodegenError, Result};
pub use generator::Generator;

use std::path::Path;
use tessera_model::Model;

/// Generates the Ruby types file for `model` under `out_dir`, wrapped in the
/// module named by `namespace`.
pub fn generate(model: &Model, namespace: &str, out_dir: &Path) -> Result<()> {
    let generator = Generator::new(namespace);
    generator.generate(model, out_dir)
}
