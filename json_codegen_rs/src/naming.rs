//! Identifier checks and class naming.
//!
//! Class names are normalized once, when the module is built, so duplicate
//! detection sees exactly the names the renderers print.

use std::sync::LazyLock;

use heck::ToUpperCamelCase;
use regress::Regex;

/// Identifiers valid in Python 2 and JavaScript alike.
static PORTABLE_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern compiles")
});

/// JavaScript `IdentifierName` restricted to ASCII.
static JS_IDENTIFIER_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier pattern compiles")
});

const PYTHON2_KEYWORDS: &[&str] = &[
    "and", "as", "assert", "break", "class", "continue", "def", "del", "elif", "else", "except",
    "exec", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda", "not", "or",
    "pass", "print", "raise", "return", "try", "while", "with", "yield", "None", "True", "False",
];

const JS_RESERVED_WORDS: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "implements", "import", "in", "instanceof", "interface", "let", "new", "null", "package",
    "private", "protected", "public", "return", "static", "super", "switch", "this", "throw",
    "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Whether `name` can be written as `self.<name>` in Python 2. Names with a
/// leading `__` (and no trailing `__`) are mangled inside a class body, so
/// they do not qualify.
pub fn is_python_attribute(name: &str) -> bool {
    let mangled: bool = name.starts_with("__") && !name.ends_with("__");
    PORTABLE_IDENTIFIER.find(name).is_some() && !PYTHON2_KEYWORDS.contains(&name) && !mangled
}

/// Whether `name` can be written as `this.<name>` in JavaScript. Reserved
/// words are fine after a dot; `__proto__` is not, as assigning it replaces
/// the prototype.
pub fn is_js_property(name: &str) -> bool {
    JS_IDENTIFIER_NAME.find(name).is_some() && !is_js_proto(name)
}

/// The one key whose plain assignment does not create an own property.
pub fn is_js_proto(name: &str) -> bool {
    name == "__proto__"
}

fn is_class_identifier(name: &str) -> bool {
    PORTABLE_IDENTIFIER.find(name).is_some()
        && !PYTHON2_KEYWORDS.contains(&name)
        && !JS_RESERVED_WORDS.contains(&name)
}

/// Class name for a definition title: the title itself, or its
/// `UpperCamelCase` form when the title is not a usable identifier.
pub fn class_identifier(title: &str) -> String {
    if is_class_identifier(title) {
        return title.to_string();
    }
    let camel: String = title.to_upper_camel_case();
    if camel.is_empty() || camel.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{camel}")
    } else {
        camel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_identifier_keeps_valid_titles() {
        assert_eq!("HTTPRequest", class_identifier("HTTPRequest"));
    }

    #[test]
    fn class_identifier_camel_cases_invalid_titles() {
        assert_eq!("TheWidgetSchema", class_identifier("The Widget Schema"));
        assert_eq!("FooBarBaz", class_identifier("foo-bar-baz"));
    }

    #[test]
    fn class_identifier_guards_leading_digit() {
        assert_eq!("_3dPoint", class_identifier("3d point"));
    }

    #[test]
    fn class_identifier_avoids_keywords() {
        assert_eq!("Class", class_identifier("class"));
    }

    #[test]
    fn python_attribute_rejects_keywords_and_punctuation() {
        assert!(is_python_attribute("first_name"));
        assert!(!is_python_attribute("from"));
        assert!(!is_python_attribute("foo-bar"));
        assert!(!is_python_attribute("2fa"));
    }

    #[test]
    fn python_attribute_rejects_mangled_names() {
        assert!(!is_python_attribute("__secret"));
        assert!(is_python_attribute("__init__"));
        assert!(is_python_attribute("_private"));
    }

    #[test]
    fn js_property_allows_reserved_words_and_dollar() {
        assert!(is_js_property("default"));
        assert!(is_js_property("$id"));
        assert!(!is_js_property("foo-bar"));
        assert!(!is_js_property(""));
    }

    #[test]
    fn js_property_rejects_proto() {
        assert!(!is_js_property("__proto__"));
        assert!(is_js_proto("__proto__"));
        assert!(is_js_property("__proto"));
    }
}
