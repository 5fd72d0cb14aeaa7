//! Type mapping from proto descriptors to Go packages and identifiers
//!
//! Maps each proto file to the Go package its generated code lives in, and
//! each message to the `TypeRef` it is printed as from a given file.

use prost_reflect::{FileDescriptor, MessageDescriptor};
use protoc_gen_rest_common::{
    camel_case, clean_package_name, GoPackage, ImportLine, PluginConfig, TypeRef,
};
use std::collections::{BTreeMap, BTreeSet};

/// Imports the base Go generator writes at the top of every file
const STANDARD_PREAMBLE: &[(&str, &str)] = &[
    ("proto", "github.com/golang/protobuf/proto"),
    ("fmt", "fmt"),
    ("math", "math"),
];

/// Go package of a proto file, plus whether its import path was stated
/// explicitly (`go_package` with a path, or an `M` override)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPackage {
    pub package: GoPackage,
    pub explicit_path: bool,
}

/// Resolve the Go package for a proto file
///
/// Precedence: `M<file>=<path>` override, then the `go_package` option
/// (`path;name`, `path`, or a bare package name). A file still without an
/// import path goes to `import_path` when one is given, and otherwise to its
/// own directory, named after the proto package (or file base name).
///
/// `import_path` only applies to files being generated; callers pass `None`
/// for everything else.
///
/// # Examples
/// ```
/// use protoc_gen_rest_common::PluginConfig;
/// use protoc_gen_rest_parser::resolve_go_package;
///
/// let config = PluginConfig::default();
/// let resolved = resolve_go_package(
///     "greeter/greeter.proto",
///     "helloworld",
///     Some("github.com/acme/api/greeter;greeterpb"),
///     None,
///     &config,
/// );
/// assert_eq!(resolved.package.import_path, "github.com/acme/api/greeter");
/// assert_eq!(resolved.package.name, "greeterpb");
/// ```
pub fn resolve_go_package(
    file_name: &str,
    proto_package: &str,
    go_package: Option<&str>,
    import_path: Option<&str>,
    config: &PluginConfig,
) -> ResolvedPackage {
    if let Some(path) = config.import_map.get(file_name) {
        return explicit(path, last_segment(path));
    }

    let unplaced = |name: &str| match import_path {
        Some(path) => explicit(path, name),
        None => implicit(file_name, name),
    };

    match go_package.filter(|opt| !opt.is_empty()) {
        Some(opt) => {
            if let Some((path, name)) = opt.split_once(';') {
                if path.is_empty() {
                    unplaced(name)
                } else {
                    explicit(path, name)
                }
            } else if opt.contains('/') {
                explicit(opt, last_segment(opt))
            } else {
                unplaced(opt)
            }
        }
        None => match import_path {
            Some(path) => explicit(path, last_segment(path)),
            None if !proto_package.is_empty() => implicit(file_name, proto_package),
            None => implicit(file_name, file_stem(file_name)),
        },
    }
}

/// Resolve the Go package of a file from the descriptor pool
///
/// `generated` lists the files named in `file_to_generate`; only those pick
/// up the configured `import_path`.
pub fn resolve_file_package(
    file: &FileDescriptor,
    generated: &[String],
    config: &PluginConfig,
) -> ResolvedPackage {
    let proto = file.file_descriptor_proto();
    let go_package = proto.options.as_ref().and_then(|o| o.go_package.as_deref());
    let import_path = config
        .import_path
        .as_deref()
        .filter(|_| generated.iter().any(|name| name == file.name()));
    resolve_go_package(file.name(), file.package_name(), go_package, import_path, config)
}

/// Go identifier of a message: CamelCase of its nesting path joined by `_`
pub fn go_type_name(message: &MessageDescriptor) -> String {
    let mut names = vec![message.name().to_string()];
    let mut parent = message.parent_message();
    while let Some(outer) = parent {
        names.push(outer.name().to_string());
        parent = outer.parent_message();
    }
    names.reverse();
    camel_case(&names.join("_"))
}

fn explicit(path: &str, name: &str) -> ResolvedPackage {
    ResolvedPackage {
        package: GoPackage {
            import_path: path.to_string(),
            name: clean_package_name(name),
        },
        explicit_path: true,
    }
}

fn implicit(file_name: &str, name: &str) -> ResolvedPackage {
    let dir = file_name.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("");
    ResolvedPackage {
        package: GoPackage {
            import_path: dir.to_string(),
            name: clean_package_name(name),
        },
        explicit_path: false,
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn file_stem(file_name: &str) -> &str {
    let base = last_segment(file_name);
    base.split('.').next().unwrap_or(base)
}

/// Import list and alias registry for one generated file
///
/// Aliases are handed out first-come first-served; a name already taken gets
/// a numeric suffix (`context1`), so two packages never share an alias.
pub struct FileImports<'a> {
    config: &'a PluginConfig,
    generated: &'a [String],
    own_path: String,
    used_aliases: BTreeSet<String>,
    alias_by_path: BTreeMap<String, String>,
    index_by_path: BTreeMap<String, usize>,
    lines: Vec<ImportLine>,
}

impl<'a> FileImports<'a> {
    /// Start with the standard preamble, reserving the runtime aliases
    ///
    /// `generated` is the request's `file_to_generate` list.
    pub fn new(config: &'a PluginConfig, generated: &'a [String], own_package: &GoPackage) -> Self {
        let mut imports = Self {
            config,
            generated,
            own_path: own_package.import_path.clone(),
            used_aliases: config
                .reserved_aliases()
                .iter()
                .map(|alias| alias.to_string())
                .collect(),
            alias_by_path: BTreeMap::new(),
            index_by_path: BTreeMap::new(),
            lines: Vec::new(),
        };

        for (alias, path) in STANDARD_PREAMBLE {
            let path = config.prefixed(path);
            imports.used_aliases.insert(alias.to_string());
            imports.alias_by_path.insert(path.clone(), alias.to_string());
            imports.push(ImportLine::new(*alias, path));
        }

        imports
    }

    /// Record a dependency file's package; weak dependencies become blank imports
    pub fn add_dependency(&mut self, package: &GoPackage, weak: bool) {
        if package.import_path == self.own_path {
            return;
        }

        if weak {
            let path = self.config.prefixed(&package.import_path);
            if !self.index_by_path.contains_key(&path) {
                self.push(ImportLine::new("_", path));
            }
        } else {
            self.alias_for(package);
        }
    }

    /// How `message` is printed from this file, importing its package if needed
    pub fn type_ref(&mut self, message: &MessageDescriptor) -> TypeRef {
        let name = go_type_name(message);
        let resolved = resolve_file_package(&message.parent_file(), self.generated, self.config);

        if resolved.package.import_path == self.own_path {
            TypeRef::local(name)
        } else {
            TypeRef::qualified(self.alias_for(&resolved.package), name)
        }
    }

    /// Import lines in emission order
    pub fn into_lines(self) -> Vec<ImportLine> {
        self.lines
    }

    fn alias_for(&mut self, package: &GoPackage) -> String {
        let path = self.config.prefixed(&package.import_path);
        if let Some(alias) = self.alias_by_path.get(&path) {
            return alias.clone();
        }

        let mut alias = package.name.clone();
        let mut suffix = 1;
        while self.used_aliases.contains(&alias) {
            alias = format!("{}{}", package.name, suffix);
            suffix += 1;
        }

        self.used_aliases.insert(alias.clone());
        self.alias_by_path.insert(path.clone(), alias.clone());

        match self.index_by_path.get(&path) {
            // Previously imported for side effects only
            Some(&index) => self.lines[index].alias = Some(alias.clone()),
            None => self.push(ImportLine::new(alias.clone(), path)),
        }

        alias
    }

    fn push(&mut self, line: ImportLine) {
        self.index_by_path.insert(line.path.clone(), self.lines.len());
        self.lines.push(line);
    }
}
