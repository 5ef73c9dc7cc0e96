//! AST types produced by the parser.
//!
//! Each type serializes to the JSON shape downstream generators consume, so
//! field names on the wire are camelCase (`keyType`, `defaultValue`, ...).
//! Nothing here is resolved: a typedef name stays a plain [`Type::Named`]
//! and a [`Reference`] is never looked up.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

// ──────────────────────────────────────────────
// Types
// ──────────────────────────────────────────────

/// Thrift base types. A collection literal is never valid against one.
pub const BASE_TYPES: &[&str] = &[
    "bool", "byte", "i8", "i16", "i32", "i64", "double", "string", "binary", "void",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Type {
    /// Base type or custom identifier, possibly dotted (`shared.Work`).
    Named(String),
    Container(ContainerType),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "lowercase")]
pub enum ContainerType {
    Map {
        #[serde(rename = "keyType")]
        key_type: Box<Type>,
        #[serde(rename = "valueType")]
        value_type: Box<Type>,
    },
    List {
        #[serde(rename = "valueType")]
        value_type: Box<Type>,
    },
    Set {
        #[serde(rename = "valueType")]
        value_type: Box<Type>,
    },
}

impl Type {
    pub fn named(name: impl Into<String>) -> Self {
        Type::Named(name.into())
    }

    pub fn map(key_type: Type, value_type: Type) -> Self {
        Type::Container(ContainerType::Map {
            key_type: Box::new(key_type),
            value_type: Box::new(value_type),
        })
    }

    pub fn list(value_type: Type) -> Self {
        Type::Container(ContainerType::List {
            value_type: Box::new(value_type),
        })
    }

    pub fn set(value_type: Type) -> Self {
        Type::Container(ContainerType::Set {
            value_type: Box::new(value_type),
        })
    }

    pub fn is_base(&self) -> bool {
        matches!(self, Type::Named(n) if BASE_TYPES.contains(&n.as_str()))
    }
}

impl ContainerType {
    pub fn name(&self) -> &'static str {
        match self {
            ContainerType::Map { .. } => "map",
            ContainerType::List { .. } => "list",
            ContainerType::Set { .. } => "set",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Named(n) => f.write_str(n),
            Type::Container(ContainerType::Map {
                key_type,
                value_type,
            }) => write!(f, "map<{},{}>", key_type, value_type),
            Type::Container(ContainerType::List { value_type }) => {
                write!(f, "list<{}>", value_type)
            }
            Type::Container(ContainerType::Set { value_type }) => write!(f, "set<{}>", value_type),
        }
    }
}

// ──────────────────────────────────────────────
// Literal values
// ──────────────────────────────────────────────

/// A literal as written in a const, a default value or an enum item.
///
/// Whole numbers that fit in `i64` are always `Int`, including ones written
/// in e-notation (`-3e4`). An empty map literal serializes to `[]` and reads
/// back as an empty `List`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    // Sequences are tried before `Ref` so a nested list of strings is never
    // read back as a reference.
    List(Vec<Value>),
    Map(Vec<MapEntry>),
    Ref(Reference),
}

/// Dotted identifier used as a value, e.g. `Color.RED` or `MAX_SIZE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Reference {
    #[serde(rename = "=")]
    pub segments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapEntry {
    pub key: Value,
    pub value: Value,
}

impl Value {
    /// Normalize a coerced number: whole values inside the `i64` range
    /// become `Int`, everything else stays `Float`.
    pub fn from_f64(n: f64) -> Self {
        if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
            Value::Int(n as i64)
        } else {
            Value::Float(n)
        }
    }
}

// ──────────────────────────────────────────────
// Fields, functions, enum items
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldOption {
    Required,
    Optional,
}

/// One member of a struct, union or exception body, or of a function's
/// argument or throws list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option: Option<FieldOption>,
    #[serde(rename = "type")]
    pub ty: Type,
    pub name: String,
    #[serde(
        rename = "defaultValue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub args: Vec<Field>,
    pub name: String,
    pub oneway: bool,
    pub throws: Vec<Field>,
    #[serde(rename = "type")]
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumItem {
    pub name: String,
    /// Explicit `= value` only; implicit numbering is not computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

// ──────────────────────────────────────────────
// Declaration payloads
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    #[serde(rename = "serviceName")]
    pub service_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Include {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Typedef {
    #[serde(rename = "type")]
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Const {
    #[serde(rename = "type")]
    pub ty: Type,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enum {
    pub items: Vec<EnumItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    pub functions: IndexMap<String, Function>,
}

// ──────────────────────────────────────────────
// Top-level declarations
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstructKind {
    Namespace,
    Include,
    Typedef,
    Const,
    Enum,
    Struct,
    Union,
    Exception,
    Service,
}

impl ConstructKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ConstructKind::Namespace => "namespace",
            ConstructKind::Include => "include",
            ConstructKind::Typedef => "typedef",
            ConstructKind::Const => "const",
            ConstructKind::Enum => "enum",
            ConstructKind::Struct => "struct",
            ConstructKind::Union => "union",
            ConstructKind::Exception => "exception",
            ConstructKind::Service => "service",
        }
    }
}

impl fmt::Display for ConstructKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed top-level construct, keyed the way it lands in the document:
/// namespaces by scope, includes by path basename, everything else by name.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Namespace { scope: String, namespace: Namespace },
    Include { key: String, include: Include },
    Typedef { name: String, typedef: Typedef },
    Const { name: String, constant: Const },
    Enum { name: String, enumeration: Enum },
    Struct { name: String, fields: Vec<Field> },
    Union { name: String, fields: Vec<Field> },
    Exception { name: String, fields: Vec<Field> },
    Service { name: String, service: Service },
}

impl Declaration {
    pub fn kind(&self) -> ConstructKind {
        match self {
            Declaration::Namespace { .. } => ConstructKind::Namespace,
            Declaration::Include { .. } => ConstructKind::Include,
            Declaration::Typedef { .. } => ConstructKind::Typedef,
            Declaration::Const { .. } => ConstructKind::Const,
            Declaration::Enum { .. } => ConstructKind::Enum,
            Declaration::Struct { .. } => ConstructKind::Struct,
            Declaration::Union { .. } => ConstructKind::Union,
            Declaration::Exception { .. } => ConstructKind::Exception,
            Declaration::Service { .. } => ConstructKind::Service,
        }
    }

    /// Document key of this declaration.
    pub fn key(&self) -> &str {
        match self {
            Declaration::Namespace { scope, .. } => scope,
            Declaration::Include { key, .. } => key,
            Declaration::Typedef { name, .. }
            | Declaration::Const { name, .. }
            | Declaration::Enum { name, .. }
            | Declaration::Struct { name, .. }
            | Declaration::Union { name, .. }
            | Declaration::Exception { name, .. }
            | Declaration::Service { name, .. } => name,
        }
    }
}

/// Document key for an include path: the last path segment with one
/// trailing `.thrift` removed. A segment that is exactly `.thrift` is kept.
pub fn include_key(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    let segment = trimmed.rsplit('/').next().unwrap_or(trimmed);
    match segment.strip_suffix(".thrift") {
        Some(stem) if !stem.is_empty() => stem.to_owned(),
        _ => segment.to_owned(),
    }
}
