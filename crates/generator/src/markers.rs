//! Sentinel markers delimiting the regions of a raw generated file
//!
//! Once the emitter's output is flattened to text, these markers are the
//! only way to tell the import list from the adapter code. They must appear
//! in this order:
//!
//! `import` <= `import (` <= `// Reference imports` <= `//Start Services` <= `//End Services`

use protoc_gen_rest_common::{GeneratorError, Result};

/// First single-line import written by the base generator
pub const IMPORT: &str = "import";
/// Start of the adapter's parenthesized import block
pub const IMPORT_BLOCK: &str = "import (";
/// Start of the dependency-forcing `var _` statements
pub const REFERENCE_IMPORTS: &str = "// Reference imports";
pub const START_SERVICES: &str = "//Start Services";
pub const END_SERVICES: &str = "//End Services";

/// Byte offsets of every marker in one raw file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerOffsets {
    pub import: usize,
    pub import_block: usize,
    pub reference_imports: usize,
    pub services_start: usize,
    pub services_end: usize,
}

impl MarkerOffsets {
    /// Locate every marker in `content`, enforcing presence, uniqueness and order
    pub fn locate(file: &str, content: &str) -> Result<Self> {
        let offsets = Self {
            import: find_import_keyword(file, content)?,
            import_block: find_unique(file, content, IMPORT_BLOCK)?,
            reference_imports: find_unique(file, content, REFERENCE_IMPORTS)?,
            services_start: find_unique(file, content, START_SERVICES)?,
            services_end: find_unique(file, content, END_SERVICES)?,
        };

        let ordered = [
            (IMPORT, offsets.import),
            (IMPORT_BLOCK, offsets.import_block),
            (REFERENCE_IMPORTS, offsets.reference_imports),
            (START_SERVICES, offsets.services_start),
            (END_SERVICES, offsets.services_end),
        ];
        for pair in ordered.windows(2) {
            let ((before, before_at), (after, after_at)) = (pair[0], pair[1]);
            if before_at > after_at {
                return Err(marker_error(
                    file,
                    format!("\"{}\" appears after \"{}\"", before, after),
                ));
            }
        }

        Ok(offsets)
    }

    /// Everything ahead of the first import: header comments and package clause
    pub fn preamble<'a>(&self, content: &'a str) -> &'a str {
        &content[..self.import]
    }

    /// Single-line imports the base generator wrote
    pub fn generated_imports<'a>(&self, content: &'a str) -> &'a str {
        &content[self.import..self.import_block]
    }

    /// The adapter's own import block, verbatim
    pub fn package_imports<'a>(&self, content: &'a str) -> &'a str {
        &content[self.import_block..self.reference_imports]
    }

    /// Adapter code between the service markers, markers excluded
    pub fn service_region<'a>(&self, content: &'a str) -> &'a str {
        &content[self.services_start + START_SERVICES.len()..self.services_end]
    }
}

/// Offset of the first line that starts with the `import` keyword
fn find_import_keyword(file: &str, content: &str) -> Result<usize> {
    content
        .match_indices(IMPORT)
        .map(|(at, _)| at)
        .find(|&at| {
            let line_start = at == 0 || content.as_bytes()[at - 1] == b'\n';
            let keyword_end = matches!(
                content.as_bytes().get(at + IMPORT.len()),
                Some(b' ' | b'\t' | b'"' | b'(')
            );
            line_start && keyword_end
        })
        .ok_or_else(|| marker_error(file, format!("missing \"{}\"", IMPORT)))
}

/// Offset of a marker that must occur exactly once
fn find_unique(file: &str, content: &str, marker: &str) -> Result<usize> {
    let mut matches = content.match_indices(marker).map(|(at, _)| at);
    let first = matches
        .next()
        .ok_or_else(|| marker_error(file, format!("missing \"{}\"", marker)))?;

    if matches.next().is_some() {
        return Err(marker_error(
            file,
            format!("\"{}\" appears more than once", marker),
        ));
    }

    Ok(first)
}

fn marker_error(file: &str, message: String) -> GeneratorError {
    GeneratorError::Marker {
        file: file.to_string(),
        message,
    }
}
