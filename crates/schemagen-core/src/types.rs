//! Schema type to C# type mappings.
//!
//! # Type Mappings
//!
//! | Schema | C# (required) | C# (nullable) |
//! |--------|---------------|---------------|
//! | `int`, `integer` | `int` | `int?` |
//! | `bigint` | `long` | `long?` |
//! | `varchar`, `text`, `json` | `string` | `string` |
//! | `boolean`, `bit` | `bool` | `bool?` |
//! | `decimal(10,2)` | `decimal` + `[Precision(10, 2)]` | `decimal?` |
//! | `uuid` | `Guid` | `Guid?` |
//! | `int[]` | `int[]` | `int[]` |
//!
//! Unrecognized schema types fall back to `string`.

/// Closed set of target scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Int32,
    Int64,
    Int16,
    Byte,
    String,
    Bool,
    Decimal,
    Single,
    Double,
    DateTime,
    DateTimeOffset,
    TimeSpan,
    Guid,
}

impl ScalarType {
    /// Look up a bare schema type name (no size suffix, no array marker),
    /// case-insensitively.
    pub fn from_schema_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "int" | "integer" => ScalarType::Int32,
            "bigint" => ScalarType::Int64,
            "smallint" => ScalarType::Int16,
            "tinyint" => ScalarType::Byte,
            "bit" | "boolean" => ScalarType::Bool,
            "decimal" | "numeric" | "money" => ScalarType::Decimal,
            "float" | "real" => ScalarType::Single,
            "double" => ScalarType::Double,
            "datetime" | "datetime2" | "date" | "timestamp" => ScalarType::DateTime,
            "datetimeoffset" => ScalarType::DateTimeOffset,
            "time" => ScalarType::TimeSpan,
            "uuid" | "uniqueidentifier" => ScalarType::Guid,
            // varchar, text, char, nvarchar, nchar, json, jsonb and unknowns
            _ => ScalarType::String,
        }
    }

    /// C# keyword or type name.
    pub fn csharp_name(self) -> &'static str {
        match self {
            ScalarType::Int32 => "int",
            ScalarType::Int64 => "long",
            ScalarType::Int16 => "short",
            ScalarType::Byte => "byte",
            ScalarType::String => "string",
            ScalarType::Bool => "bool",
            ScalarType::Decimal => "decimal",
            ScalarType::Single => "float",
            ScalarType::Double => "double",
            ScalarType::DateTime => "DateTime",
            ScalarType::DateTimeOffset => "DateTimeOffset",
            ScalarType::TimeSpan => "TimeSpan",
            ScalarType::Guid => "Guid",
        }
    }

    /// Value types need a `?` to hold null; `string` is a reference type.
    pub fn is_value_type(self) -> bool {
        self != ScalarType::String
    }
}

/// A resolved column type: a scalar or an array of column types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    Scalar(ScalarType),
    Array(Box<ColumnType>),
}

impl ColumnType {
    /// Render the C# type.
    ///
    /// Nullable value-typed scalars are wrapped as `T?`. Arrays are reference
    /// types and never get a `?`, and their element type is always rendered
    /// non-nullable.
    pub fn render(&self, nullable: bool) -> String {
        match self {
            ColumnType::Scalar(scalar) if nullable && scalar.is_value_type() => {
                format!("{}?", scalar.csharp_name())
            }
            ColumnType::Scalar(scalar) => scalar.csharp_name().to_string(),
            ColumnType::Array(element) => format!("{}[]", element.render(false)),
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, ColumnType::Scalar(ScalarType::String))
    }
}

/// A column type together with the size facets parsed from its suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    pub ty: ColumnType,

    /// `n` from `varchar(n)`; only set for string columns
    pub length: Option<u32>,

    /// `(p, s)` from `decimal(p, s)`; only set for decimal columns
    pub precision: Option<(u32, Option<u32>)>,
}

/// Resolve a declared schema type such as `varchar(500)`, `decimal(10,2)` or
/// `int[]`.
///
/// The size suffix is removed before the scalar lookup. An array marker is
/// applied to the resolved element type; facets of array elements are
/// dropped.
pub fn resolve_type(type_name: &str) -> ResolvedType {
    let trimmed = type_name.trim();

    if let Some(element) = trimmed.strip_suffix("[]") {
        let element = resolve_type(element);
        return ResolvedType {
            ty: ColumnType::Array(Box::new(element.ty)),
            length: None,
            precision: None,
        };
    }

    let (base, args) = split_size_suffix(trimmed);
    let scalar = ScalarType::from_schema_name(base);

    let length = match (scalar, args.as_slice()) {
        (ScalarType::String, [n]) => Some(*n),
        _ => None,
    };
    let precision = match (scalar, args.as_slice()) {
        (ScalarType::Decimal, [p]) => Some((*p, None)),
        (ScalarType::Decimal, [p, s]) => Some((*p, Some(*s))),
        _ => None,
    };

    ResolvedType {
        ty: ColumnType::Scalar(scalar),
        length,
        precision,
    }
}

/// Split `name(a, b)` into `name` and its numeric arguments. Non-numeric
/// arguments such as `max` yield no arguments.
fn split_size_suffix(type_name: &str) -> (&str, Vec<u32>) {
    let Some(open) = type_name.find('(') else {
        return (type_name, Vec::new());
    };
    let base = type_name[..open].trim();
    let inner = type_name[open + 1..].trim_end().trim_end_matches(')');

    let args: Option<Vec<u32>> = inner
        .split(',')
        .map(|arg| arg.trim().parse::<u32>().ok())
        .collect();

    (base, args.unwrap_or_default())
}
