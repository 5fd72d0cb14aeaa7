//! Go import declarations

use serde::{Deserialize, Serialize};
use std::fmt;

/// Import paths owned by the protobuf runtime. Generated service adapters
/// never reference these directly.
const PROTOBUF_INTERNAL_PATHS: &[&str] = &[
    "github.com/golang/protobuf/proto",
    "google.golang.org/protobuf/proto",
    "google.golang.org/protobuf/runtime/",
    "google.golang.org/protobuf/reflect/",
];

/// A single Go import declaration: `import alias "path"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportLine {
    /// Explicit identifier before the path, if any (`_` for blank imports)
    pub alias: Option<String>,
    pub path: String,
}

impl ImportLine {
    pub fn new(alias: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            alias: Some(alias.into()),
            path: path.into(),
        }
    }

    pub fn unaliased(path: impl Into<String>) -> Self {
        Self {
            alias: None,
            path: path.into(),
        }
    }

    /// Parse one line of Go import syntax
    ///
    /// Accepts `import alias "path"`, `import "path"` and the bare
    /// `alias "path"` form used inside a parenthesized block. Returns `None`
    /// for blank lines, comments and anything else that is not an import.
    ///
    /// # Example
    /// ```
    /// use protoc_gen_rest_common::ImportLine;
    ///
    /// let line = ImportLine::parse(r#"import empty "github.com/golang/protobuf/ptypes/empty""#).unwrap();
    /// assert_eq!(line.alias(), "empty");
    /// ```
    pub fn parse(line: &str) -> Option<Self> {
        let mut rest = line.trim();
        if let Some(stripped) = rest.strip_prefix("import") {
            if !stripped.starts_with(char::is_whitespace) && !stripped.starts_with('"') {
                return None;
            }
            rest = stripped.trim_start();
        }

        if rest.is_empty() || rest.starts_with("//") || rest == "(" || rest == ")" {
            return None;
        }

        let (alias, quoted) = if rest.starts_with('"') {
            (None, rest)
        } else {
            let (alias, quoted) = rest.split_once(char::is_whitespace)?;
            (Some(alias.to_string()), quoted.trim_start())
        };

        let path = quoted.strip_prefix('"')?;
        let end = path.find('"')?;

        Some(Self {
            alias,
            path: path[..end].to_string(),
        })
    }

    /// Identifier the imported package is referenced by: the explicit alias,
    /// or the last path segment when none is given
    pub fn alias(&self) -> &str {
        match &self.alias {
            Some(alias) => alias,
            None => self.path.rsplit('/').next().unwrap_or(&self.path),
        }
    }

    /// Blank imports exist only for their side effects
    pub fn is_blank(&self) -> bool {
        self.alias.as_deref() == Some("_")
    }

    /// Whether this import points at the protobuf runtime itself
    pub fn is_protobuf_internal(&self) -> bool {
        self.alias.as_deref() == Some("proto")
            || PROTOBUF_INTERNAL_PATHS.iter().any(|internal| {
                self.path == *internal
                    || (internal.ends_with('/') && self.path.starts_with(internal))
            })
    }
}

impl fmt::Display for ImportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "import {} \"{}\"", alias, self.path),
            None => write!(f, "import \"{}\"", self.path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliased_import() {
        let line = ImportLine::parse(r#"import empty "github.com/golang/protobuf/ptypes/empty""#);
        assert_eq!(
            line,
            Some(ImportLine::new("empty", "github.com/golang/protobuf/ptypes/empty"))
        );
    }

    #[test]
    fn test_parse_unaliased_import() {
        let line = ImportLine::parse(r#"import "github.com/acme/api/common""#).unwrap();
        assert_eq!(line.alias, None);
        assert_eq!(line.alias(), "common");
    }

    #[test]
    fn test_parse_block_entry() {
        let line = ImportLine::parse("\truntime \"github.com/grpc-ecosystem/grpc-gateway/runtime\"").unwrap();
        assert_eq!(line.alias(), "runtime");
    }

    #[test]
    fn test_parse_rejects_non_imports() {
        assert_eq!(ImportLine::parse(""), None);
        assert_eq!(ImportLine::parse("   "), None);
        assert_eq!(ImportLine::parse("import ("), None);
        assert_eq!(ImportLine::parse("// a comment"), None);
        assert_eq!(ImportLine::parse("importer \"x\""), None);
    }

    #[test]
    fn test_blank_and_internal() {
        assert!(ImportLine::parse(r#"import _ "github.com/acme/weak""#).unwrap().is_blank());
        assert!(ImportLine::new("proto", "github.com/golang/protobuf/proto").is_protobuf_internal());
        assert!(ImportLine::new("protoimpl", "google.golang.org/protobuf/runtime/protoimpl")
            .is_protobuf_internal());
        assert!(!ImportLine::new("empty", "github.com/golang/protobuf/ptypes/empty")
            .is_protobuf_internal());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ImportLine::new("fmt", "fmt").to_string(),
            r#"import fmt "fmt""#
        );
        assert_eq!(
            ImportLine::unaliased("math").to_string(),
            r#"import "math""#
        );
    }
}
