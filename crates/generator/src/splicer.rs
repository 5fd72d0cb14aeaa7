//! Import resolver and splicer
//!
//! Cuts a raw emitted file apart at its markers, keeps only the generated
//! imports the adapter code actually uses, and reassembles:
//!
//! ```text
//! preamble + kept generated imports + adapter import block + service region
//! ```
//!
//! Usage is detected textually: an import aliased `pkg` is kept only when
//! the service region contains `*pkg.`, i.e. some handler declares a pointer
//! to a type from that package. This is exact for the small, fixed set of
//! shapes the emitter produces.

use crate::markers::MarkerOffsets;
use protoc_gen_rest_common::{GeneratorError, ImportLine, PluginConfig, Result};
use tracing::trace;

/// A raw file taken apart at its markers, ready to be written back out once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplicedFile<'a> {
    /// Header comments and package clause
    pub preamble: &'a str,
    /// Generated imports that survived filtering
    pub imports: Vec<ImportLine>,
    /// The adapter's import block, verbatim
    pub package_imports: &'a str,
    /// Adapter code, markers excluded
    pub services: &'a str,
}

impl<'a> SplicedFile<'a> {
    /// Split `content` at its markers and filter the generated imports
    pub fn parse(file: &str, content: &'a str) -> Result<Self> {
        let offsets = MarkerOffsets::locate(file, content)?;
        let services = offsets.service_region(content);

        if services.trim().is_empty() {
            return Err(GeneratorError::Marker {
                file: file.to_string(),
                message: "service region is empty".to_string(),
            });
        }

        Ok(Self {
            preamble: offsets.preamble(content),
            imports: retain_used_imports(offsets.generated_imports(content), services),
            package_imports: offsets.package_imports(content),
            services,
        })
    }

    /// Serialize the final file, swapping in this plugin's attribution
    pub fn render(&self, config: &PluginConfig) -> String {
        let mut out = String::with_capacity(
            self.preamble.len() + self.package_imports.len() + self.services.len() + 256,
        );

        out.push_str(self.preamble);
        for import in &self.imports {
            out.push_str(&import.to_string());
            out.push('\n');
        }
        if !self.imports.is_empty() {
            out.push('\n');
        }
        out.push_str(self.package_imports);
        out.push_str(self.services.trim_matches('\n'));
        out.push('\n');

        out.replace(config.source_attribution(), &config.attribution())
    }
}

/// Splice one raw file into its final content
pub fn splice(file: &str, content: &str, config: &PluginConfig) -> Result<String> {
    Ok(SplicedFile::parse(file, content)?.render(config))
}

/// Keep the generated imports the service text dereferences as `*alias.`
///
/// Blank (`_`) imports and imports of the protobuf runtime are always
/// dropped, whether or not they look used.
pub fn retain_used_imports(generated: &str, services: &str) -> Vec<ImportLine> {
    generated
        .lines()
        .filter_map(ImportLine::parse)
        .filter(|import| {
            if import.is_blank() || import.is_protobuf_internal() {
                trace!(path = %import.path, "dropping runtime import");
                return false;
            }

            let used = services.contains(&format!("*{}.", import.alias()));
            if !used {
                trace!(alias = import.alias(), path = %import.path, "dropping unused import");
            }
            used
        })
        .collect()
}
