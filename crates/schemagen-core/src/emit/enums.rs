//! Enum emission.

use crate::model::EnumModel;

/// Emit a C# enum, values in declared order.
pub fn emit_enum(code: &mut String, enum_model: &EnumModel) {
    code.push_str(&format!("public enum {}\n", enum_model.name));
    code.push_str("{\n");

    let count = enum_model.values.len();
    for (i, value) in enum_model.values.iter().enumerate() {
        code.push_str(&format!("    {}", value));
        if i + 1 < count {
            code.push(',');
        }
        code.push('\n');
    }

    code.push_str("}\n");
}
