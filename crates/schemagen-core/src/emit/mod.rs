//! C# / Entity Framework Core emission from a [`SchemaPlan`].
//!
//! One generated unit per target, laid out as:
//!
//! ```text
//! header + usings + namespace
//!  ├─ enums      (enums.rs)
//!  ├─ entities   (entity.rs)
//!  └─ context    (mapping.rs)
//! ```
//!
//! Emission is pure string building. Identical plans produce byte-identical
//! text.

mod entity;
mod enums;
mod mapping;

pub use entity::emit_entity;
pub use enums::emit_enum;
pub use mapping::emit_context;

use crate::config::GeneratorConfig;
use crate::model::TargetDescriptor;
use crate::plan::SchemaPlan;

const USINGS: &[&str] = &[
    "System",
    "System.Collections.Generic",
    "System.ComponentModel.DataAnnotations",
    "System.ComponentModel.DataAnnotations.Schema",
    "Microsoft.EntityFrameworkCore",
    "Microsoft.EntityFrameworkCore.Metadata.Builders",
];

/// Emit the complete unit for one target.
pub fn emit_unit(plan: &SchemaPlan<'_>, target: &TargetDescriptor, config: &GeneratorConfig) -> String {
    let mut code = String::new();

    if config.emit_header {
        code.push_str("// <auto-generated />\n");
        code.push_str("#nullable disable\n\n");
    }

    for using in USINGS {
        code.push_str(&format!("using {};\n", using));
    }
    code.push('\n');

    if !target.namespace.is_empty() {
        code.push_str(&format!("namespace {};\n\n", target.namespace));
    }

    for enum_model in &plan.model.enums {
        emit_enum(&mut code, enum_model);
        code.push('\n');
    }

    for entity in &plan.entities {
        emit_entity(&mut code, entity, config);
        code.push('\n');
    }

    emit_context(&mut code, plan, target);

    code
}

/// Quote a value as a C# string literal.
pub(crate) fn string_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');
    for c in value.chars() {
        match c {
            '"' => literal.push_str("\\\""),
            '\\' => literal.push_str("\\\\"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            c => literal.push(c),
        }
    }
    literal.push('"');
    literal
}

/// Comma-separated string literals, e.g. `"TaskId", "ProjectId"`.
pub(crate) fn string_literals(values: &[String]) -> String {
    values
        .iter()
        .map(|v| string_literal(v))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Append a `/// <summary>` block for a schema note.
pub(crate) fn push_summary(code: &mut String, indent: &str, note: Option<&str>) {
    let Some(note) = note.map(str::trim).filter(|n| !n.is_empty()) else {
        return;
    };

    code.push_str(&format!("{indent}/// <summary>\n"));
    for line in note.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            code.push_str(&format!("{indent}///\n"));
        } else {
            code.push_str(&format!("{indent}/// {}\n", xml_escape(line)));
        }
    }
    code.push_str(&format!("{indent}/// </summary>\n"));
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
