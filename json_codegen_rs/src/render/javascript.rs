//! JavaScript renderer, also used for Flow output.

use std::io::Write;

use super::{class_name, flow, literal};
use crate::naming::{is_js_property, is_js_proto};
use crate::module::{ClassDef, FieldDef, ResolvedModule};
use crate::plan::{AccessPlan, Read, Shape};

/// Which flavor of JavaScript to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Dialect {
    Plain,
    Flow,
}

/// `data["<key>"]`
fn lookup(key: &str) -> String {
    format!("data[{}]", literal::javascript_string(key))
}

fn read_expression(key: &str, read: &Read) -> String {
    match read {
        Read::Required => format!("requireKey(data, {})", literal::javascript_string(key)),
        Read::Optional => format!("{} ?? null", lookup(key)),
        Read::Defaulted(default) => format!("{} ?? {}", lookup(key), literal::javascript(default)),
    }
}

/// The read, parenthesized when it contains an operator.
fn read_operand(key: &str, read: &Read) -> String {
    match read {
        Read::Required => read_expression(key, read),
        Read::Optional | Read::Defaulted(_) => format!("({})", read_expression(key, read)),
    }
}

fn field_expression(plan: &AccessPlan, prefix: &str) -> String {
    match plan {
        AccessPlan::UniformMap {
            key,
            value_class: Some(class),
        } => format!(
            "Object.fromEntries(Object.entries({} ?? {{}}).map(([k, v]) => [k, new {}(v)]))",
            lookup(key),
            class_name(prefix, class)
        ),
        AccessPlan::UniformMap {
            key,
            value_class: None,
        } => format!("{} ?? {{}}", lookup(key)),
        AccessPlan::Value {
            key, read, shape, ..
        } => match shape {
            Shape::Unchanged => read_expression(key, read),
            Shape::ConstructEach(class) => format!(
                "{}.map((v) => new {}(v))",
                read_operand(key, read),
                class_name(prefix, class)
            ),
            Shape::ConstructUnlessNull(class) => {
                // `== null` already covers a missing key.
                let value: String = match read {
                    Read::Optional => lookup(key),
                    Read::Required | Read::Defaulted(_) => read_operand(key, read),
                };
                format!(
                    "{value} == null ? null : new {}({value})",
                    class_name(prefix, class)
                )
            }
        },
    }
}

fn member(name: &str) -> String {
    if is_js_property(name) {
        format!("this.{name}")
    } else {
        format!("this[{}]", literal::javascript_string(name))
    }
}

fn emit_field<W: Write>(field: &FieldDef, prefix: &str, writer: &mut W) -> std::io::Result<()> {
    if is_js_proto(&field.name) {
        // Plain assignment would replace the prototype.
        return writeln!(
            writer,
            "    Object.defineProperty(this, {}, {{ value: {}, enumerable: true, writable: true, configurable: true }});",
            literal::javascript_string(&field.name),
            field_expression(&field.plan, prefix)
        );
    }
    writeln!(
        writer,
        "    {} = {};",
        member(&field.name),
        field_expression(&field.plan, prefix)
    )
}

fn emit_doc_comment<W: Write>(writer: &mut W, description: Option<&str>) -> std::io::Result<()> {
    let Some(description) = description else {
        return Ok(());
    };
    writeln!(writer, "/**")?;
    for line in description.lines() {
        let line: String = line.replace("*/", "*\\/");
        if line.trim().is_empty() {
            writeln!(writer, " *")?;
        } else {
            writeln!(writer, " * {line}")?;
        }
    }
    writeln!(writer, " */")
}

fn emit_class<W: Write>(
    class: &ClassDef,
    prefix: &str,
    dialect: Dialect,
    writer: &mut W,
) -> std::io::Result<()> {
    emit_doc_comment(writer, class.description.as_deref())?;
    let name: String = class_name(prefix, &class.name);
    if class.fields.is_empty() {
        return writeln!(writer, "export class {name} {{}}");
    }

    writeln!(writer, "export class {name} {{")?;
    if dialect == Dialect::Flow {
        for field in &class.fields {
            let declared: String = if is_js_property(&field.name) {
                field.name.clone()
            } else {
                literal::javascript_string(&field.name)
            };
            writeln!(
                writer,
                "  {declared}: {};",
                flow::field_type(&field.plan, prefix)
            )?;
        }
        writeln!(writer)?;
        writeln!(writer, "  constructor(data: ?Object) {{")?;
    } else {
        writeln!(writer, "  constructor(data) {{")?;
    }
    writeln!(writer, "    data = data || {{}};")?;
    for field in &class.fields {
        emit_field(field, prefix, writer)?;
    }
    writeln!(writer, "  }}")?;
    writeln!(writer, "}}")
}

fn emit_require_key<W: Write>(dialect: Dialect, writer: &mut W) -> std::io::Result<()> {
    match dialect {
        Dialect::Plain => writeln!(writer, "function requireKey(data, key) {{")?,
        Dialect::Flow => writeln!(
            writer,
            "function requireKey(data: Object, key: string): any {{"
        )?,
    }
    writeln!(
        writer,
        "  if (!Object.prototype.hasOwnProperty.call(data, key)) {{"
    )?;
    writeln!(
        writer,
        "    throw new TypeError(\"Missing required key: \" + key);"
    )?;
    writeln!(writer, "  }}")?;
    writeln!(writer, "  return data[key];")?;
    writeln!(writer, "}}")
}

pub(super) fn emit_module<W: Write>(
    module: &ResolvedModule,
    prefix: &str,
    dialect: Dialect,
    writer: &mut W,
) -> std::io::Result<()> {
    if dialect == Dialect::Flow {
        writeln!(writer, "// @flow")?;
    }
    writeln!(writer, "// Generated by json-codegen-rs. Do not edit manually.")?;
    if module.has_required_reads() {
        writeln!(writer)?;
        emit_require_key(dialect, writer)?;
    }
    for class in &module.classes {
        writeln!(writer)?;
        emit_class(class, prefix, dialect, writer)?;
    }
    Ok(())
}
