//! Plugin configuration
//!
//! Everything the emitter and splicer need to know about package names and
//! output layout is resolved once, from the `protoc` parameter string, into a
//! [`PluginConfig`] that is passed around by reference.

use crate::{GeneratorError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Identifier inserted into output file names (`foo.rest.pb.go`)
pub const PLUGIN_NAME: &str = "rest";

/// Attribution written by the base Go generator
const BASE_GENERATOR: &str = "protoc-gen-go";

/// How output file paths are derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputPaths {
    /// Place output under the Go import path of the package
    #[default]
    Import,
    /// Place output next to the .proto file it came from
    SourceRelative,
}

/// An import the generated adapters always depend on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimePackage {
    /// Alias the package is referenced by in generated code
    pub alias: String,
    pub path: String,
}

impl RuntimePackage {
    fn new(alias: &str, path: &str) -> Self {
        Self {
            alias: alias.to_string(),
            path: path.to_string(),
        }
    }
}

/// Read-only configuration for one plugin run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Plugin identifier, used for file renaming and attribution
    pub plugin_name: String,

    /// Cancellable request-scoped context package
    pub context: RuntimePackage,

    /// Package declaring the RPC call-options type
    pub call_options: RuntimePackage,

    /// Package declaring the server multiplexer
    pub server_mux: RuntimePackage,

    /// Prefix prepended to every non-standard-library import path
    pub import_prefix: String,

    /// `M<file>=<import path>` overrides, keyed by proto file name
    pub import_map: BTreeMap<String, String>,

    /// Go import path for generated files that neither `go_package` nor an
    /// `M` override places
    pub import_path: Option<String>,

    pub paths: OutputPaths,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            plugin_name: PLUGIN_NAME.to_string(),
            context: RuntimePackage::new("context", "golang.org/x/net/context"),
            call_options: RuntimePackage::new("grpc", "google.golang.org/grpc"),
            server_mux: RuntimePackage::new(
                "runtime",
                "github.com/grpc-ecosystem/grpc-gateway/runtime",
            ),
            import_prefix: String::new(),
            import_map: BTreeMap::new(),
            import_path: None,
            paths: OutputPaths::default(),
        }
    }
}

impl PluginConfig {
    /// Build the configuration from the request's parameter string
    ///
    /// The parameter is a comma-separated list of `key=value` pairs, using
    /// the same keys `protoc-gen-go` understands:
    /// - `import_prefix=<prefix>`
    /// - `import_path=<path>`
    /// - `paths=import` or `paths=source_relative`
    /// - `M<file.proto>=<import path>`
    /// - `plugins=<list>` and `annotate_code` (accepted and ignored)
    ///
    /// Any other key is logged and skipped, so a parameter string shared
    /// with other Go plugins still works. A bad `paths` value is an error.
    ///
    /// # Example
    /// ```
    /// use protoc_gen_rest_common::{OutputPaths, PluginConfig};
    ///
    /// let config = PluginConfig::from_parameter("paths=source_relative,Mfoo.proto=example.com/foo").unwrap();
    /// assert_eq!(config.paths, OutputPaths::SourceRelative);
    /// assert_eq!(config.import_map["foo.proto"], "example.com/foo");
    /// ```
    pub fn from_parameter(parameter: &str) -> Result<Self> {
        let mut config = Self::default();

        for option in parameter.split(',').map(str::trim).filter(|o| !o.is_empty()) {
            let (key, value) = option.split_once('=').unwrap_or((option, ""));

            match key {
                "import_prefix" => config.import_prefix = value.to_string(),
                "import_path" => {
                    config.import_path = Some(value.trim_end_matches('/'))
                        .filter(|path| !path.is_empty())
                        .map(str::to_string)
                }
                "paths" => {
                    config.paths = match value {
                        "import" => OutputPaths::Import,
                        "source_relative" => OutputPaths::SourceRelative,
                        other => {
                            return Err(GeneratorError::Parameter(format!(
                                "unknown paths mode \"{}\" (expected import or source_relative)",
                                other
                            )))
                        }
                    }
                }
                "plugins" | "annotate_code" => {}
                _ if key.len() > 1 && key.starts_with('M') => {
                    if value.is_empty() {
                        return Err(GeneratorError::Parameter(format!(
                            "missing import path for {}",
                            key
                        )));
                    }
                    config.import_map.insert(key[1..].to_string(), value.to_string());
                }
                _ => warn!(option, "ignoring unknown parameter"),
            }
        }

        Ok(config)
    }

    /// Attribution token the base generator writes into file headers
    pub fn source_attribution(&self) -> &str {
        BASE_GENERATOR
    }

    /// Attribution token this plugin writes instead
    pub fn attribution(&self) -> String {
        format!("protoc-gen-{}", self.plugin_name)
    }

    /// Apply `import_prefix` to an import path
    ///
    /// Standard library paths (no dot in the first segment) are left alone.
    pub fn prefixed(&self, path: &str) -> String {
        let first_segment = path.split('/').next().unwrap_or(path);
        if self.import_prefix.is_empty() || !first_segment.contains('.') {
            return path.to_string();
        }
        format!("{}/{}", self.import_prefix.trim_end_matches('/'), path)
    }

    /// Aliases the generated code claims before any dependency is imported
    pub fn reserved_aliases(&self) -> [&str; 3] {
        [
            self.context.alias.as_str(),
            self.call_options.alias.as_str(),
            self.server_mux.alias.as_str(),
        ]
    }
}
