//! Service code emitter
//!
//! Renders the raw Go file for one proto file: the base generator's header
//! and single-line imports, the adapter import block, the reference-imports
//! block, and every service adapter between the `//Start Services` and
//! `//End Services` markers.

use crate::templates::{self, SERVICE_TEMPLATE};
use protoc_gen_rest_common::{
    camel_case, FileDefinition, GeneratedFile, GeneratorError, MethodDefinition, MethodShape,
    PluginConfig, Result, RuntimePackage, ServiceDefinition,
};
use serde::Serialize;
use tera::Tera;
use tracing::trace;

/// Template view of one service
#[derive(Debug, Serialize)]
struct ServiceContext {
    name: String,
    methods: Vec<MethodContext>,
}

/// Template view of one RPC method
#[derive(Debug, Serialize)]
struct MethodContext {
    name: String,
    /// Internal handler identifier, `_GreeterServer_SayHello_Handler`.
    /// Streaming paths never register it.
    handler: String,
    input: String,
    output: String,
    shape: MethodShape,
    stream_client: String,
}

impl MethodContext {
    fn new(service_name: &str, method: &MethodDefinition) -> Self {
        let name = camel_case(&method.name);
        Self {
            handler: format!("_{}Server_{}_Handler", service_name, name),
            stream_client: format!("{}_{}Client", service_name, name),
            input: method.input_type.go_name(),
            output: method.output_type.go_name(),
            shape: method.shape(),
            name,
        }
    }
}

impl ServiceContext {
    fn new(service: &ServiceDefinition) -> Self {
        let name = camel_case(&service.name);
        let methods = service
            .methods
            .iter()
            .map(|method| MethodContext::new(&name, method))
            .collect();
        Self { name, methods }
    }
}

/// Renders raw service adapter files
pub struct ServiceEmitter {
    tera: Tera,
}

impl ServiceEmitter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            tera: templates::load_templates()?,
        })
    }

    /// Emit the raw, marker-delimited file for `file`
    ///
    /// The returned record is named after the base generator's output
    /// (`greeter.pb.go`); splicing and renaming happen afterwards.
    pub fn emit(&self, file: &FileDefinition, config: &PluginConfig) -> Result<GeneratedFile> {
        let services: Vec<ServiceContext> = file.services.iter().map(ServiceContext::new).collect();

        for service in &services {
            for method in &service.methods {
                trace!(handler = %method.handler, shape = ?method.shape, "emitting handler");
            }
        }

        let generated_imports: Vec<String> =
            file.generated_imports.iter().map(ToString::to_string).collect();

        let mut context = tera::Context::new();
        context.insert("attribution", config.source_attribution());
        context.insert("source", &file.name);
        context.insert("go_package", &file.go_package.name);
        context.insert("generated_imports", &generated_imports);
        context.insert("package_imports", &package_imports(config));
        context.insert("context", &config.context.alias);
        context.insert("call_options", &config.call_options.alias);
        context.insert("server_mux", &config.server_mux.alias);
        context.insert("services", &services);

        let content = self
            .tera
            .render(SERVICE_TEMPLATE, &context)
            .map_err(|e| GeneratorError::Generation(format!("Template error: {:?}", e)))?;

        Ok(GeneratedFile {
            name: file.output_name.clone(),
            content,
        })
    }
}

/// Packages every adapter block imports, with `import_prefix` applied
fn package_imports(config: &PluginConfig) -> Vec<RuntimePackage> {
    [&config.server_mux, &config.call_options, &config.context]
        .into_iter()
        .map(|package| RuntimePackage {
            alias: package.alias.clone(),
            path: config.prefixed(&package.path),
        })
        .collect()
}
