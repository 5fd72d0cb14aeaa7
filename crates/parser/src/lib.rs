//! Request parsing for protoc-gen-rest
//!
//! This crate handles the plugin side of the `protoc` protocol and turns the
//! descriptors it receives into the intermediate representation
//! (`FileDefinition`) the generator works from.
//!
//! ## Parsing Strategy
//!
//! All `proto_file` descriptors of the request are loaded into a
//! `prost_reflect::DescriptorPool`, so message types referenced by a method
//! can be traced back to the file (and Go package) that declares them.
//! Only the files named in `file_to_generate` are converted.

mod protobuf;
mod request;
mod type_mapper;

pub use protobuf::{output_file_name, ProtobufParser};
pub use request::{decode_request, error_response, read_request, success_response, write_response};
pub use type_mapper::{go_type_name, resolve_go_package, FileImports, ResolvedPackage};

use prost_types::compiler::CodeGeneratorRequest;
use protoc_gen_rest_common::{FileDefinition, PluginConfig, Result};

/// Parse the plugin configuration and the files to generate from a request
///
/// # Returns
/// * `PluginConfig` - configuration built from the request parameter
/// * `Vec<FileDefinition>` - one entry per file to generate, in request order
pub fn parse_request(request: &CodeGeneratorRequest) -> Result<(PluginConfig, Vec<FileDefinition>)> {
    let parser = ProtobufParser::from_request(request)?;
    let config = PluginConfig::from_parameter(request.parameter())?;
    let files = parser.parse(&config)?;
    Ok((config, files))
}
