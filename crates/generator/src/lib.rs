//! Service adapter generation for protoc-gen-rest
//!
//! This crate turns `FileDefinition` IR into the final `.rest.pb.go` files:
//! - the emitter renders a raw file with marker-delimited regions
//! - the splicer prunes unused imports and reassembles the regions
//! - the assembler renames the file after the plugin
//!
//! Streaming methods are emitted as signature-only stubs that return zero
//! values; only unary methods are bridged to the server implementation.

mod assembler;
mod emitter;
pub mod markers;
mod splicer;
mod templates;

pub use assembler::{assemble, rename_output};
pub use emitter::ServiceEmitter;
pub use markers::MarkerOffsets;
pub use splicer::{retain_used_imports, splice, SplicedFile};

use protoc_gen_rest_common::{FileDefinition, GeneratedFile, PluginConfig, Result};
use tracing::{debug, info};

/// Service adapter generator
///
/// Holds the configuration for one plugin run; every file is processed
/// independently, in the order given.
pub struct RestGenerator {
    config: PluginConfig,
    emitter: ServiceEmitter,
}

impl RestGenerator {
    /// Create a new generator from the run's configuration
    pub fn new(config: PluginConfig) -> Result<Self> {
        let emitter = ServiceEmitter::new()?;
        Ok(Self { config, emitter })
    }

    /// Generate one output file per input file that declares services
    ///
    /// Any failure aborts the whole run; no partial list is returned.
    pub fn generate(&self, files: &[FileDefinition]) -> Result<Vec<GeneratedFile>> {
        let mut generated = Vec::new();

        for file in files {
            if file.services.is_empty() {
                debug!(file = %file.name, "no services, skipping");
                continue;
            }

            let raw = self.emitter.emit(file, &self.config)?;
            let content = splice(&raw.name, &raw.content, &self.config)?;
            let output = assemble(raw, content, &self.config.plugin_name);

            debug!(file = %file.name, output = %output.name, "generated service adapters");
            generated.push(output);
        }

        info!(files = generated.len(), "generation complete");
        Ok(generated)
    }
}

/// Generate service adapters (convenience function)
pub fn generate_files(config: PluginConfig, files: &[FileDefinition]) -> Result<Vec<GeneratedFile>> {
    RestGenerator::new(config)?.generate(files)
}
