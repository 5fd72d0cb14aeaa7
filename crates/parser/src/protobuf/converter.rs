//! Converts protobuf descriptors to FileDefinition IR

use crate::type_mapper::{resolve_file_package, FileImports, ResolvedPackage};
use prost_reflect::{DescriptorPool, FileDescriptor, ServiceDescriptor};
use protoc_gen_rest_common::{
    FileDefinition, GeneratorError, MethodDefinition, OutputPaths, PluginConfig, Result,
    ServiceDefinition,
};
use tracing::debug;

/// Convert one file named in `file_to_generate` to FileDefinition
pub fn convert_file(
    pool: &DescriptorPool,
    file_name: &str,
    generated: &[String],
    config: &PluginConfig,
) -> Result<FileDefinition> {
    let file = pool
        .get_file_by_name(file_name)
        .ok_or_else(|| GeneratorError::UnknownFile(file_name.to_string()))?;

    let resolved = resolve_file_package(&file, generated, config);
    let mut imports = FileImports::new(config, generated, &resolved.package);
    add_dependencies(&file, &mut imports, generated, config);

    let services = file
        .services()
        .map(|service| convert_service(&service, &mut imports))
        .collect::<Vec<_>>();

    debug!(
        file = file_name,
        go_package = %resolved.package.import_path,
        services = services.len(),
        "converted file descriptor"
    );

    Ok(FileDefinition {
        name: file_name.to_string(),
        package: file.package_name().to_string(),
        output_name: output_file_name(file_name, &resolved, config.paths),
        go_package: resolved.package,
        generated_imports: imports.into_lines(),
        services,
    })
}

/// Register every direct dependency in declaration order
fn add_dependencies(
    file: &FileDescriptor,
    imports: &mut FileImports<'_>,
    generated: &[String],
    config: &PluginConfig,
) {
    let weak = &file.file_descriptor_proto().weak_dependency;

    for (index, dependency) in file.dependencies().enumerate() {
        let is_weak = weak.iter().any(|&w| w as usize == index);
        let resolved = resolve_file_package(&dependency, generated, config);
        imports.add_dependency(&resolved.package, is_weak);
    }
}

/// Convert a gRPC service, keeping methods in declaration order
fn convert_service(service: &ServiceDescriptor, imports: &mut FileImports<'_>) -> ServiceDefinition {
    let methods = service
        .methods()
        .map(|method| MethodDefinition {
            name: method.name().to_string(),
            input_type: imports.type_ref(&method.input()),
            output_type: imports.type_ref(&method.output()),
            client_streaming: method.is_client_streaming(),
            server_streaming: method.is_server_streaming(),
        })
        .collect();

    ServiceDefinition {
        name: service.name().to_string(),
        methods,
    }
}

/// Name of the `.pb.go` file the base generator writes for a proto file
///
/// Examples:
/// - "greeter.proto" -> "greeter.pb.go"
/// - "api/greeter.proto" with `go_package = "github.com/acme/greeter"`
///   -> "github.com/acme/greeter/greeter.pb.go"
/// - same with `paths=source_relative` -> "api/greeter.pb.go"
pub fn output_file_name(file_name: &str, resolved: &ResolvedPackage, paths: OutputPaths) -> String {
    let stem = file_name
        .strip_suffix(".protodevel")
        .or_else(|| file_name.strip_suffix(".proto"))
        .unwrap_or(file_name);
    let name = format!("{}.pb.go", stem);

    match paths {
        OutputPaths::Import if resolved.explicit_path => {
            let base = name.rsplit('/').next().unwrap_or(&name);
            format!("{}/{}", resolved.package.import_path, base)
        }
        _ => name,
    }
}
