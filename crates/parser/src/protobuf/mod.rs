//! Protobuf/gRPC service parser
//!
//! Parses the `CodeGeneratorRequest` sent by `protoc` to extract the service
//! definitions of every file the plugin was asked to generate.
//!
//! ## Example
//! ```rust,ignore
//! use protoc_gen_rest_parser::ProtobufParser;
//!
//! let parser = ProtobufParser::from_request(&request)?;
//! let files = parser.parse(&config)?;
//! ```

mod converter;
mod parser;

pub use converter::output_file_name;
pub use parser::ProtobufParser;
