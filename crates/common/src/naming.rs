//! Go identifier rules shared by the parser and the emitter

/// Convert a proto identifier to an exported Go identifier
///
/// Follows the base Go generator: an underscore followed by a lowercase
/// letter is dropped and the letter capitalised, a leading underscore
/// becomes `X`, digits are kept as-is, and every other word start is
/// upper-cased.
///
/// # Examples
/// ```
/// use protoc_gen_rest_common::camel_case;
///
/// assert_eq!(camel_case("say_hello"), "SayHello");
/// assert_eq!(camel_case("_my_field"), "XMyField");
/// assert_eq!(camel_case("Outer_Inner"), "Outer_Inner");
/// ```
pub fn camel_case(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len() + 1);
    let mut i = 0;

    if bytes.first() == Some(&b'_') {
        out.push('X');
        i += 1;
    }

    while i < bytes.len() {
        let c = bytes[i];
        if c == b'_' && i + 1 < bytes.len() && bytes[i + 1].is_ascii_lowercase() {
            i += 1;
            continue;
        }
        if c.is_ascii_digit() {
            out.push(c as char);
            i += 1;
            continue;
        }

        out.push(c.to_ascii_uppercase() as char);
        while i + 1 < bytes.len() && bytes[i + 1].is_ascii_lowercase() {
            i += 1;
            out.push(bytes[i] as char);
        }
        i += 1;
    }

    out
}

/// Lower-case the first character of an identifier (`Greeter` -> `greeter`)
pub fn unexport(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Turn an arbitrary string into a valid Go package name
pub fn clean_package_name(name: &str) -> String {
    let mut cleaned: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if cleaned.chars().next().map_or(true, |c| c.is_ascii_digit()) {
        cleaned.insert(0, '_');
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("Greeter"), "Greeter");
        assert_eq!(camel_case("greeter"), "Greeter");
        assert_eq!(camel_case("say_hello"), "SayHello");
        assert_eq!(camel_case("SayHello"), "SayHello");
        assert_eq!(camel_case("get_v2_item"), "GetV2Item");
        assert_eq!(camel_case("_leading"), "XLeading");
        assert_eq!(camel_case("ALL_CAPS"), "ALL_CAPS");
        assert_eq!(camel_case(""), "");
    }

    #[test]
    fn test_unexport() {
        assert_eq!(unexport("Greeter"), "greeter");
        assert_eq!(unexport("HTTPProxy"), "hTTPProxy");
        assert_eq!(unexport(""), "");
    }

    #[test]
    fn test_clean_package_name() {
        assert_eq!(clean_package_name("greeter"), "greeter");
        assert_eq!(clean_package_name("greeter-api"), "greeter_api");
        assert_eq!(clean_package_name("v1.beta"), "v1_beta");
        assert_eq!(clean_package_name("2fa"), "_2fa");
    }
}
