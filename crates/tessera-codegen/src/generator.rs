//! The driver for one output unit: forward declarations first, then the full
//! class bodies in the same inheritance order, then the enum modules, all
//! wrapped in the configured SDK namespace and written as a single file.

use std::fs;
use std::path::Path;

use tessera_model::Model;
use tracing::{debug, info};

use crate::buffer::Buffer;
use crate::error::Result;
use crate::{names, order, types};

pub struct Generator {
    namespace: String,
}

impl Generator {
    /// Creates a generator for the SDK module named by `namespace`, which
    /// may be `::`-separated.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// Generates the types file for `model` under `out_dir`. The buffer is
    /// created here and discarded when the unit is written, so concurrent
    /// units never share state.
    pub fn generate(&self, model: &Model, out_dir: &Path) -> Result<()> {
        info!(
            "Generating types for module {} in {}",
            self.namespace,
            out_dir.display()
        );

        fs::create_dir_all(out_dir)?;

        let file_name = format!("{}/types", names::module_path(&self.namespace));
        let mut buffer = Buffer::new(file_name);
        self.generate_source(model, &mut buffer);
        buffer.write(out_dir)?;

        info!("Types generation completed successfully");
        Ok(())
    }

    fn generate_source(&self, model: &Model, buffer: &mut Buffer) {
        buffer.add_line("##");
        buffer.add_line(
            "# These forward declarations are required in order to avoid circular dependencies.",
        );
        buffer.add_line("#");
        buffer.begin_module(&self.namespace);
        buffer.blank_line();

        // The declarations need to appear in inheritance order, otherwise
        // base symbols would be undefined when a derived class is read.
        let sorted = order::inheritance_order(model);

        for struct_type in &sorted {
            types::generate_class_declaration(buffer, struct_type);
            buffer.add_line("end");
            buffer.blank_line();
        }

        for struct_type in &sorted {
            debug!("Generating struct {}", struct_type.name);
            types::generate_struct(buffer, struct_type);
        }

        for enum_type in model.enum_types() {
            debug!("Generating enum {}", enum_type.name);
            types::generate_enum(buffer, enum_type);
        }

        buffer.end_module(&self.namespace);
        buffer.blank_line();
    }
}
