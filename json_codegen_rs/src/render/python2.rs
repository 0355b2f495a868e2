//! Python 2 renderer.

use std::io::Write;

use super::{class_name, literal};
use crate::naming::is_python_attribute;
use crate::module::{ClassDef, FieldDef, ResolvedModule};
use crate::plan::{AccessPlan, Read, Shape};

/// `data.get('<key>')`
fn get(key: &str) -> String {
    format!("data.get({})", literal::python_string(key))
}

fn read_expression(key: &str, read: &Read) -> String {
    match read {
        Read::Required => format!("data[{}]", literal::python_string(key)),
        Read::Optional => get(key),
        Read::Defaulted(default) => {
            let lookup: String = get(key);
            format!(
                "{} if {lookup} is None else {lookup}",
                literal::python(default)
            )
        }
    }
}

/// The read, parenthesized when it is a conditional expression.
fn read_operand(key: &str, read: &Read) -> String {
    let expression: String = read_expression(key, read);
    if matches!(read, Read::Defaulted(_)) {
        format!("({expression})")
    } else {
        expression
    }
}

fn field_expression(plan: &AccessPlan, prefix: &str) -> String {
    match plan {
        AccessPlan::UniformMap {
            key,
            value_class: Some(class),
        } => format!(
            "{{k: {}(v) for k, v in ({} or {{}}).iteritems()}}",
            class_name(prefix, class),
            get(key)
        ),
        AccessPlan::UniformMap {
            key,
            value_class: None,
        } => format!("{} or {{}}", get(key)),
        AccessPlan::Value {
            key, read, shape, ..
        } => match shape {
            Shape::Unchanged => read_expression(key, read),
            Shape::ConstructEach(class) => format!(
                "[{}(v) for v in {}]",
                class_name(prefix, class),
                read_operand(key, read)
            ),
            Shape::ConstructUnlessNull(class) => {
                let value: String = read_operand(key, read);
                format!(
                    "None if {value} is None else {}({value})",
                    class_name(prefix, class)
                )
            }
        },
    }
}

fn emit_field<W: Write>(field: &FieldDef, prefix: &str, writer: &mut W) -> std::io::Result<()> {
    let value: String = field_expression(&field.plan, prefix);
    if is_python_attribute(&field.name) {
        writeln!(writer, "        self.{} = {value}", field.name)
    } else {
        writeln!(
            writer,
            "        setattr(self, {}, {value})",
            literal::python_string(&field.name)
        )
    }
}

fn emit_class<W: Write>(class: &ClassDef, prefix: &str, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "class {}(object):", class_name(prefix, &class.name))?;
    if let Some(description) = class.description.as_deref() {
        let body: String = literal::python_docstring(description).replace('\n', "\n    ");
        writeln!(writer, "    \"\"\"{body}\"\"\"")?;
        if class.fields.is_empty() {
            return Ok(());
        }
        writeln!(writer)?;
    }

    if class.fields.is_empty() {
        return writeln!(writer, "    pass");
    }

    writeln!(writer, "    def __init__(self, data=None):")?;
    writeln!(writer, "        data = data or {{}}")?;
    for field in &class.fields {
        emit_field(field, prefix, writer)?;
    }
    Ok(())
}

pub(super) fn emit_module<W: Write>(
    module: &ResolvedModule,
    prefix: &str,
    writer: &mut W,
) -> std::io::Result<()> {
    writeln!(writer, "# Generated by json-codegen-rs. Do not edit manually.")?;
    writeln!(
        writer,
        "from __future__ import unicode_literals, print_function, division"
    )?;
    for class in &module.classes {
        writeln!(writer)?;
        writeln!(writer)?;
        emit_class(class, prefix, writer)?;
    }
    Ok(())
}
