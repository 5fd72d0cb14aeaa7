//! Common types and utilities for protoc-gen-rest
//!
//! This crate contains shared data structures, error types, and utilities
//! used across the parser, generator, and plugin binary.

mod config;
mod imports;
mod naming;

pub use config::{OutputPaths, PluginConfig, RuntimePackage, PLUGIN_NAME};
pub use imports::ImportLine;
pub use naming::{camel_case, clean_package_name, unexport};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while running the plugin
///
/// Every variant is fatal: the run is aborted and no partial file list is
/// returned to `protoc`.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode CodeGeneratorRequest: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("Failed to encode CodeGeneratorResponse: {0}")]
    Encode(#[from] prost::EncodeError),

    #[error("no files to generate")]
    NoFilesToGenerate,

    #[error("Invalid parameter: {0}")]
    Parameter(String),

    #[error("File to generate not found in request: {0}")]
    UnknownFile(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Marker error in {file}: {message}")]
    Marker { file: String, message: String },

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for plugin operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Resolved Go package of a proto file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoPackage {
    /// Import path (e.g., "github.com/acme/api/greeter")
    pub import_path: String,

    /// Package name used in the `package` clause (e.g., "greeter")
    pub name: String,
}

/// A message type as it is printed in generated Go code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    /// Package alias when the type lives in another Go package
    pub package_alias: Option<String>,

    /// Go identifier of the message (nested messages joined with `_`)
    pub name: String,
}

impl TypeRef {
    /// Type local to the file's own Go package
    pub fn local(name: impl Into<String>) -> Self {
        Self {
            package_alias: None,
            name: name.into(),
        }
    }

    /// Type qualified by an imported package alias
    pub fn qualified(alias: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package_alias: Some(alias.into()),
            name: name.into(),
        }
    }

    /// Qualified Go name, e.g. `empty.Empty` or `HelloRequest`
    pub fn go_name(&self) -> String {
        match &self.package_alias {
            Some(alias) => format!("{}.{}", alias, self.name),
            None => self.name.clone(),
        }
    }
}

/// Which of the three handler shapes a method is emitted as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodShape {
    /// Single request, single response
    Unary,
    /// Single request, stream of responses
    ServerStreaming,
    /// Stream of requests, with or without a response stream
    ClientStreaming,
}

/// RPC method in the intermediate representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDefinition {
    /// Method name as declared in the .proto file
    pub name: String,
    pub input_type: TypeRef,
    pub output_type: TypeRef,
    pub client_streaming: bool,
    pub server_streaming: bool,
}

impl MethodDefinition {
    pub fn shape(&self) -> MethodShape {
        match (self.client_streaming, self.server_streaming) {
            (false, false) => MethodShape::Unary,
            (false, true) => MethodShape::ServerStreaming,
            (true, _) => MethodShape::ClientStreaming,
        }
    }
}

/// RPC service in the intermediate representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDefinition {
    /// Service name as declared in the .proto file
    pub name: String,

    /// Methods in declaration order
    pub methods: Vec<MethodDefinition>,
}

/// One .proto file to generate, with everything the emitter needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDefinition {
    /// Proto file name relative to the include path (e.g., "greeter/v1/greeter.proto")
    pub name: String,

    /// Proto package (e.g., "greeter.v1")
    pub package: String,

    pub go_package: GoPackage,

    /// Name of the Go file the base generator writes for this proto file
    /// (e.g., "github.com/acme/api/greeter/greeter.pb.go")
    pub output_name: String,

    /// Imports the base Go generator would write for this file,
    /// in emission order
    pub generated_imports: Vec<ImportLine>,

    /// Services in declaration order
    pub services: Vec<ServiceDefinition>,
}

/// A generated output file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    pub name: String,
    pub content: String,
}
