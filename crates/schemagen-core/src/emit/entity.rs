//! Entity class emission: data annotations, scalar properties, navigations.

use super::{push_summary, string_literal};
use crate::config::GeneratorConfig;
use crate::plan::{EntityPlan, NavigationPlan, PropertyPlan};

/// Emit one entity class.
pub fn emit_entity(code: &mut String, entity: &EntityPlan<'_>, config: &GeneratorConfig) {
    push_summary(code, "", entity.table.note.as_deref());

    code.push_str(&format!("[Table({})]\n", string_literal(&entity.table.name)));

    if let Some(key) = entity.key.as_ref().filter(|_| entity.has_composite_key()) {
        code.push_str(&format!("[PrimaryKey({})]\n", nameof_list(&key.properties)));
    }

    for index in &entity.indexes {
        code.push_str(&format!(
            "[Index({}, Name = {}, IsUnique = {})]\n",
            nameof_list(&index.properties),
            string_literal(&index.name),
            index.unique
        ));
    }

    code.push_str(&format!("public partial class {}\n", entity.name));
    code.push_str("{\n");

    let mut members: Vec<String> = Vec::new();

    let collections: Vec<&NavigationPlan> = entity.collections().collect();
    if !collections.is_empty() {
        let mut constructor = format!("    public {}()\n    {{\n", entity.name);
        for navigation in collections {
            constructor.push_str(&format!(
                "        {} = new {}<{}>();\n",
                navigation.name, config.collection_type, navigation.target_entity
            ));
        }
        constructor.push_str("    }\n");
        members.push(constructor);
    }

    for property in &entity.properties {
        members.push(property_member(property));
    }

    for navigation in &entity.navigations {
        members.push(navigation_member(navigation));
    }

    code.push_str(&members.join("\n"));
    code.push_str("}\n");
}

fn property_member(property: &PropertyPlan<'_>) -> String {
    let mut member = String::new();
    push_summary(&mut member, "    ", property.column.note.as_deref());

    if property.is_key {
        member.push_str("    [Key]\n");
    }
    if property.column.increment {
        member.push_str("    [DatabaseGenerated(DatabaseGeneratedOption.Identity)]\n");
    }
    member.push_str(&format!(
        "    [Column({})]\n",
        string_literal(&property.column.name)
    ));
    if property.required {
        member.push_str("    [Required]\n");
    }
    if let Some(length) = property.ty.length {
        member.push_str(&format!("    [MaxLength({length})]\n"));
    }
    match property.ty.precision {
        Some((precision, Some(scale))) => {
            member.push_str(&format!("    [Precision({precision}, {scale})]\n"));
        }
        Some((precision, None)) => {
            member.push_str(&format!("    [Precision({precision})]\n"));
        }
        None => {}
    }

    member.push_str(&format!(
        "    public {} {} {{ get; set; }}\n",
        property.type_name(),
        property.name
    ));
    member
}

fn navigation_member(navigation: &NavigationPlan) -> String {
    if navigation.is_collection() {
        format!(
            "    [InverseProperty({})]\n    public virtual ICollection<{}> {} {{ get; set; }}\n",
            string_literal(&navigation.inverse),
            navigation.target_entity,
            navigation.name
        )
    } else {
        format!(
            "    public virtual {} {} {{ get; set; }}\n",
            navigation.target_entity, navigation.name
        )
    }
}

fn nameof_list(properties: &[String]) -> String {
    properties
        .iter()
        .map(|p| format!("nameof({p})"))
        .collect::<Vec<_>>()
        .join(", ")
}
