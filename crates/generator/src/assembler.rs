//! Output assembler: final names and contents of generated files

use protoc_gen_rest_common::GeneratedFile;

/// Compound extension written by the base Go generator
const GO_PROTO_EXTENSION: &str = ".pb.go";

/// Insert the plugin token before the file's extension
///
/// `.pb.go` counts as a single extension; otherwise the last `.` of the final
/// path segment starts the extension. Names without one are unchanged.
///
/// # Examples
/// ```
/// use protoc_gen_rest_generator::rename_output;
///
/// assert_eq!(rename_output("foo.pb.go", "rest"), "foo.rest.pb.go");
/// assert_eq!(rename_output("a.b.pb.go", "rest"), "a.b.rest.pb.go");
/// assert_eq!(rename_output("Makefile", "rest"), "Makefile");
/// ```
pub fn rename_output(name: &str, token: &str) -> String {
    let (dir, base) = match name.rsplit_once('/') {
        Some((dir, base)) => (Some(dir), base),
        None => (None, name),
    };

    let renamed = match base.strip_suffix(GO_PROTO_EXTENSION) {
        Some(stem) if !stem.is_empty() => format!("{}.{}{}", stem, token, GO_PROTO_EXTENSION),
        _ => match base.rsplit_once('.') {
            Some((stem, extension)) => format!("{}.{}.{}", stem, token, extension),
            None => return name.to_string(),
        },
    };

    match dir {
        Some(dir) => format!("{}/{}", dir, renamed),
        None => renamed,
    }
}

/// Apply spliced content and the plugin's name to a raw file record
pub fn assemble(mut file: GeneratedFile, content: String, token: &str) -> GeneratedFile {
    file.name = rename_output(&file.name, token);
    file.content = content;
    file
}
