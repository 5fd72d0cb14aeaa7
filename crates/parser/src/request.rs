//! Plugin wire protocol: one request in, one response out

use prost::Message;
use prost_types::compiler::code_generator_response::File;
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};
use protoc_gen_rest_common::{GeneratedFile, Result};
use std::io::{Read, Write};
use tracing::debug;

/// Read and decode a complete `CodeGeneratorRequest`
pub fn read_request<R: Read>(mut reader: R) -> Result<CodeGeneratorRequest> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    debug!(bytes = bytes.len(), "read request");
    decode_request(&bytes)
}

/// Decode a `CodeGeneratorRequest` from bytes
pub fn decode_request(bytes: &[u8]) -> Result<CodeGeneratorRequest> {
    Ok(CodeGeneratorRequest::decode(bytes)?)
}

/// Response carrying the generated files
pub fn success_response(files: Vec<GeneratedFile>) -> CodeGeneratorResponse {
    CodeGeneratorResponse {
        file: files
            .into_iter()
            .map(|file| File {
                name: Some(file.name),
                content: Some(file.content),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

/// Response reporting a fatal error; carries no files
pub fn error_response(message: impl Into<String>) -> CodeGeneratorResponse {
    CodeGeneratorResponse {
        error: Some(message.into()),
        ..Default::default()
    }
}

/// Encode a response and write it out in one piece
pub fn write_response<W: Write>(response: &CodeGeneratorResponse, mut writer: W) -> Result<()> {
    let mut bytes = Vec::with_capacity(response.encoded_len());
    response.encode(&mut bytes)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    debug!(bytes = bytes.len(), files = response.file.len(), "wrote response");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use protoc_gen_rest_common::GeneratorError;

    #[test]
    fn test_read_request() {
        let request = CodeGeneratorRequest {
            file_to_generate: vec!["greeter.proto".to_string()],
            parameter: Some("paths=source_relative".to_string()),
            ..Default::default()
        };

        let decoded = read_request(request.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn test_malformed_request() {
        let result = decode_request(&[0xff, 0xff, 0xff]);
        assert!(matches!(result, Err(GeneratorError::Decode(_))));
    }

    #[test]
    fn test_write_response() {
        let response = success_response(vec![GeneratedFile {
            name: "greeter.rest.pb.go".to_string(),
            content: "package greeter\n".to_string(),
        }]);

        let mut out = Vec::new();
        write_response(&response, &mut out).unwrap();

        let decoded = CodeGeneratorResponse::decode(out.as_slice()).unwrap();
        assert_eq!(decoded.error, None);
        assert_eq!(decoded.file.len(), 1);
        assert_eq!(decoded.file[0].name(), "greeter.rest.pb.go");
    }

    #[test]
    fn test_error_response_has_no_files() {
        let response = error_response("no files to generate");
        assert_eq!(response.error.as_deref(), Some("no files to generate"));
        assert!(response.file.is_empty());
    }
}
