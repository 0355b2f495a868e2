//! JSON Pointer fragments (RFC 6901) used as `$ref` keys.
//!
//! Segments are `/`-separated, with `~` escaped as `~0` and `/` escaped as `~1`.
//! Every reference the generator resolves is a document-local fragment such as
//! `#/definitions/Nested`; the root document itself is `#`.

/// Reference to the root document.
pub const ROOT: &str = "#";

/// Appends a segment to a JSON Pointer path, applying RFC 6901 escaping.
///
/// Escaping rules: `~` -> `~0`, `/` -> `~1`
pub fn push_segment(path: &mut String, segment: &str) {
    path.push('/');
    for c in segment.chars() {
        match c {
            '~' => path.push_str("~0"),
            '/' => path.push_str("~1"),
            other => path.push(other),
        }
    }
}

/// `$ref` key for the entry `name` of the definitions block `block`
/// (`definitions` or `$defs`).
#[must_use]
pub fn definition_ref(block: &str, name: &str) -> String {
    let mut result: String = ROOT.to_string();
    push_segment(&mut result, block);
    push_segment(&mut result, name);
    result
}

/// Last segment of a pointer with RFC 6901 escaping undone.
/// `#/definitions/a~1b` -> `a/b`; the root pointer has no segment.
#[must_use]
pub fn last_segment(pointer: &str) -> Option<String> {
    let (_, segment) = pointer.rsplit_once('/')?;
    Some(segment.replace("~1", "/").replace("~0", "~"))
}
