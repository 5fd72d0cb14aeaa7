//! CodeGeneratorRequest parser

use prost_reflect::DescriptorPool;
use prost_types::compiler::CodeGeneratorRequest;
use prost_types::FileDescriptorSet;
use protoc_gen_rest_common::{FileDefinition, GeneratorError, PluginConfig, Result};

/// Protobuf/gRPC service parser
///
/// Indexes every file descriptor sent by `protoc` and converts the files it
/// was asked to generate into `FileDefinition` IR.
pub struct ProtobufParser {
    /// Descriptor pool for reflection
    pool: DescriptorPool,

    /// Files named in `file_to_generate`, in request order
    files_to_generate: Vec<String>,
}

impl ProtobufParser {
    /// Build a parser from a decoded request
    ///
    /// Fails with `GeneratorError::NoFilesToGenerate` when the request names
    /// no files, before any descriptor is examined.
    ///
    /// # Example
    /// ```rust,ignore
    /// let request = read_request(std::io::stdin().lock())?;
    /// let parser = ProtobufParser::from_request(&request)?;
    /// let files = parser.parse(&PluginConfig::default())?;
    /// ```
    pub fn from_request(request: &CodeGeneratorRequest) -> Result<Self> {
        if request.file_to_generate.is_empty() {
            return Err(GeneratorError::NoFilesToGenerate);
        }

        let file_descriptor_set = FileDescriptorSet {
            file: request.proto_file.clone(),
        };

        // Create descriptor pool
        let pool = DescriptorPool::from_file_descriptor_set(file_descriptor_set).map_err(|e| {
            GeneratorError::Parse(format!("Failed to create DescriptorPool: {}", e))
        })?;

        Ok(Self {
            pool,
            files_to_generate: request.file_to_generate.clone(),
        })
    }

    /// Convert every file to generate into FileDefinition IR
    pub fn parse(&self, config: &PluginConfig) -> Result<Vec<FileDefinition>> {
        self.files_to_generate
            .iter()
            .map(|name| {
                super::converter::convert_file(&self.pool, name, &self.files_to_generate, config)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost_types::FileDescriptorProto;

    #[test]
    fn test_empty_request_rejected() {
        let request = CodeGeneratorRequest::default();
        let result = ProtobufParser::from_request(&request);
        assert!(matches!(result, Err(GeneratorError::NoFilesToGenerate)));
    }

    #[test]
    fn test_unknown_file_rejected() {
        let request = CodeGeneratorRequest {
            file_to_generate: vec!["missing.proto".to_string()],
            proto_file: vec![FileDescriptorProto {
                name: Some("present.proto".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };

        let parser = ProtobufParser::from_request(&request).unwrap();
        let result = parser.parse(&PluginConfig::default());
        assert!(matches!(result, Err(GeneratorError::UnknownFile(name)) if name == "missing.proto"));
    }
}
