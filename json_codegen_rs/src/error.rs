use std::error;
use std::fmt;

/// Error type for class generation.
///
/// Every variant is fatal: generation either produces complete output or
/// nothing at all.
#[derive(Debug)]
pub enum CodegenError {
    /// I/O error (e.g., reading the schema file, writing the output file).
    IoError(std::io::Error),

    /// JSON parsing error.
    JsonError(serde_json::Error),

    /// The document parsed but cannot be used as a schema.
    InvalidSchema(String),

    /// A `$ref` did not resolve to the root or to any known definition.
    UnresolvedReference {
        reference: String,
        definition: String,
        property: String,
    },

    /// The schema uses a construct the generator does not support.
    UnsupportedSchema {
        definition: String,
        property: String,
        reason: String,
    },

    /// A definition that must become a class has no `title`.
    MissingTitle { reference: String },

    /// Two emitted classes would share a name.
    DuplicateClass { name: String },

    /// The requested output language is not in the supported set.
    UnknownLanguage(String),
}

impl error::Error for CodegenError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::IoError(io_error) => Some(io_error),
            Self::JsonError(json_error) => Some(json_error),
            _ => None,
        }
    }
}

impl fmt::Display for CodegenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IoError(io_error) => fmt::Display::fmt(io_error, f),
            Self::JsonError(json_error) => fmt::Display::fmt(json_error, f),
            Self::InvalidSchema(message) => write!(f, "Invalid schema: {message}"),
            Self::UnresolvedReference {
                reference,
                definition,
                property,
            } => write!(
                f,
                "Unresolved reference {reference:?} in {definition}.{property}"
            ),
            Self::UnsupportedSchema {
                definition,
                property,
                reason,
            } => write!(f, "Unsupported schema at {definition}.{property}: {reason}"),
            Self::MissingTitle { reference } => {
                write!(f, "Definition {reference:?} needs a \"title\" to become a class")
            }
            Self::DuplicateClass { name } => {
                write!(f, "More than one definition generates class {name}")
            }
            Self::UnknownLanguage(language) => write!(f, "Language {language} not supported"),
        }
    }
}

impl From<std::io::Error> for CodegenError {
    fn from(io_error: std::io::Error) -> Self {
        Self::IoError(io_error)
    }
}

impl From<serde_json::Error> for CodegenError {
    fn from(json_error: serde_json::Error) -> Self {
        Self::JsonError(json_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_schema_names_definition_and_property() {
        let err = CodegenError::UnsupportedSchema {
            definition: "Order".to_string(),
            property: "lines".to_string(),
            reason: "tuple items for type \"array\" are not supported".to_string(),
        };
        let actual: String = err.to_string();
        let expected: &str = "Unsupported schema at Order.lines: tuple items for type \"array\" are not supported";
        assert_eq!(expected, actual);
    }

    #[test]
    fn unresolved_reference_quotes_the_reference() {
        let err = CodegenError::UnresolvedReference {
            reference: "#/definitions/Missing".to_string(),
            definition: "Test".to_string(),
            property: "nested".to_string(),
        };
        let actual: String = err.to_string();
        let expected: &str = "Unresolved reference \"#/definitions/Missing\" in Test.nested";
        assert_eq!(expected, actual);
    }

    #[test]
    fn unknown_language_names_the_value() {
        let actual: String = CodegenError::UnknownLanguage("cobol".to_string()).to_string();
        assert_eq!("Language cobol not supported", actual);
    }
}
