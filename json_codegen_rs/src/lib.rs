//! Generate data-model classes from JSON Schema.
//!
//! One class is generated per titled definition (plus the root, when it has a
//! title). Each class's constructor takes an untyped key/value payload and
//! populates its fields: reading required keys directly, optional keys
//! null-safely, substituting defaults for null, and passing nested values
//! through the constructors of the classes they reference.
//!
//! The pipeline is [`load_schema`] → [`build_module`] → [`render`]; the
//! [`ResolvedModule`] in the middle is language-agnostic.

mod codegen;
mod error;
mod json_pointer;
mod module;
mod naming;
mod plan;
mod render;
mod resolve;
mod schema;
mod settings;

pub use error::CodegenError;
pub use module::{ClassDef, FieldDef, ResolvedModule, build_module};
pub use plan::{AccessPlan, PropertyType, Read, Shape};
pub use render::render;
pub use schema::{JsonSchema, load_schema};
pub use settings::{GenerateSettings, Language};

use std::io::Write;
use std::path::Path;

/// Generate source text from a JSON Schema string.
///
/// # Errors
///
/// Returns `CodegenError` if the schema JSON is invalid, a `$ref` does not
/// resolve, or the schema uses an unsupported construct.
pub fn generate(schema_json: &str, settings: &GenerateSettings) -> Result<String, CodegenError> {
    codegen::generate(schema_json, settings)
}

/// Generate source text from a JSON Schema string and write to `writer`.
///
/// The writer can be any type implementing `Write`, such as `File`, `Vec<u8>`, or
/// `Cursor<Vec<u8>>`, enabling easy unit testing without file system interaction.
/// Nothing is written unless generation succeeds.
///
/// # Errors
///
/// Returns `CodegenError` if the schema JSON is invalid, a `$ref` does not
/// resolve, the schema uses an unsupported construct, or writing to the writer fails.
pub fn generate_to_writer<W: Write>(
    schema_json: &str,
    writer: &mut W,
    settings: &GenerateSettings,
) -> Result<(), CodegenError> {
    codegen::generate_to_writer(schema_json, writer, settings)
}

/// Generate source text from a JSON Schema file and write it to an output file.
///
/// The output file is only created once generation has succeeded.
///
/// # Errors
///
/// Returns `CodegenError` if reading the input file fails, generation fails,
/// or writing the output file fails.
pub fn generate_from_file(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    settings: &GenerateSettings,
) -> Result<(), CodegenError> {
    let schema_json: String = std::fs::read_to_string(input_path)?;
    let code: String = generate(&schema_json, settings)?;
    std::fs::write(output_path, code)?;
    Ok(())
}
