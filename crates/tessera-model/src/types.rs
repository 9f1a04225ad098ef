use serde::{Deserialize, Serialize};

/// The built-in scalar kinds of the model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Primitive {
    Boolean,
    String,
    Integer,
    Decimal,
    Date,
}

impl Primitive {
    /// The Ruby type name used in generated documentation comments.
    pub fn ruby_name(&self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::String => "string",
            Primitive::Integer => "Integer",
            Primitive::Decimal => "float",
            Primitive::Date => "DateTime",
        }
    }
}

/// The kinds a list element can have. Enum and struct referents are by name,
/// resolved against the [`Model`] that owns the member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ElementType {
    Primitive(Primitive),
    Enum(String),
    Struct(String),
}

/// The type of a struct member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum MemberType {
    Primitive(Primitive),
    Enum(String),
    Struct(String),
    List(ElementType),
}

/// An attribute or link of a struct. Both share the same accessor shape in
/// the generated code, so they share one representation here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StructMember {
    pub name: String,
    pub member_type: MemberType,
}

impl StructMember {
    pub fn new(name: impl Into<String>, member_type: MemberType) -> Self {
        Self {
            name: name.into(),
            member_type,
        }
    }
}

/// A named record type with zero or one base struct. The base, if present,
/// names another struct in the same model; the base graph is expected to be
/// acyclic (upstream guarantee, not checked here).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StructType {
    pub name: String,
    pub base: Option<String>,
    pub attributes: Vec<StructMember>,
    pub links: Vec<StructMember>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnumValue {
    pub name: String,
}

impl EnumValue {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// An enumerated type. Values keep their declared order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnumType {
    pub name: String,
    pub values: Vec<EnumValue>,
}

/// The complete set of declared types for one generation run. Immutable once
/// handed to a generator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Model {
    pub structs: Vec<StructType>,
    pub enums: Vec<EnumType>,
}

impl Model {
    pub fn new() -> Self {
        Self {
            structs: Vec::new(),
            enums: Vec::new(),
        }
    }

    pub fn struct_types(&self) -> impl Iterator<Item = &StructType> {
        self.structs.iter()
    }

    pub fn enum_types(&self) -> impl Iterator<Item = &EnumType> {
        self.enums.iter()
    }

    pub fn find_struct(&self, name: &str) -> Option<&StructType> {
        self.structs.iter().find(|s| s.name == name)
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_ruby_name() {
        assert_eq!(Primitive::Boolean.ruby_name(), "boolean");
        assert_eq!(Primitive::String.ruby_name(), "string");
        assert_eq!(Primitive::Integer.ruby_name(), "Integer");
        assert_eq!(Primitive::Decimal.ruby_name(), "float");
        assert_eq!(Primitive::Date.ruby_name(), "DateTime");
    }

    #[test]
    fn test_find_struct() {
        let mut model = Model::new();
        model.structs.push(StructType {
            name: "Vm".to_string(),
            base: None,
            attributes: vec![],
            links: vec![],
        });

        assert!(model.find_struct("Vm").is_some());
        assert!(model.find_struct("Host").is_none());
    }

    #[test]
    fn test_model_round_trip() {
        let model = Model {
            structs: vec![StructType {
                name: "Disk".to_string(),
                base: Some("Device".to_string()),
                attributes: vec![StructMember::new(
                    "size",
                    MemberType::Primitive(Primitive::Integer),
                )],
                links: vec![StructMember::new(
                    "snapshots",
                    MemberType::List(ElementType::Struct("Snapshot".to_string())),
                )],
            }],
            enums: vec![EnumType {
                name: "DiskStatus".to_string(),
                values: vec![EnumValue::new("OK"), EnumValue::new("LOCKED")],
            }],
        };

        let json = serde_json::to_string(&model).unwrap();
        let parsed: Model = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, model);
    }
}
