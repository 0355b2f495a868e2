//! Generation pipeline: load, build, render into memory, then write.

use crate::error::CodegenError;
use crate::module::{ResolvedModule, build_module};
use crate::render::render;
use crate::schema::{JsonSchema, load_schema};
use crate::settings::GenerateSettings;
use std::io::Write;

/// Generate source text for `schema_json`.
///
/// The whole pipeline runs before anything is returned, so a failure never
/// leaves partial output behind.
pub fn generate(schema_json: &str, settings: &GenerateSettings) -> Result<String, CodegenError> {
    let schema: JsonSchema = load_schema(schema_json)?;
    let module: ResolvedModule = build_module(&schema)?;

    let mut output: Vec<u8> = Vec::new();
    render(&module, settings, &mut output)?;
    String::from_utf8(output)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
}

/// Generate source text for `schema_json` and write it to `writer`.
pub fn generate_to_writer<W: Write>(
    schema_json: &str,
    writer: &mut W,
    settings: &GenerateSettings,
) -> Result<(), CodegenError> {
    let code: String = generate(schema_json, settings)?;
    writer.write_all(code.as_bytes())?;
    Ok(())
}
