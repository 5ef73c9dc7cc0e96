//! The assembled output document.
//!
//! Every construct kind maps declared names to a shaped payload. struct,
//! union and exception bodies are bare field arrays; all other kinds are
//! records. Maps keep insertion order, and re-declaring a name replaces the
//! payload in place ("last one wins").

use crate::ast::{Const, Declaration, Enum, Field, Include, Namespace, Service, Typedef};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// JSON Schema (draft 2020-12) describing the serialized [`Document`].
pub const DOCUMENT_SCHEMA: &str = include_str!("../../../schema/thrift-document.schema.json");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    #[serde(rename = "namespace", skip_serializing_if = "IndexMap::is_empty")]
    pub namespaces: IndexMap<String, Namespace>,
    #[serde(rename = "include", skip_serializing_if = "IndexMap::is_empty")]
    pub includes: IndexMap<String, Include>,
    #[serde(rename = "typedef", skip_serializing_if = "IndexMap::is_empty")]
    pub typedefs: IndexMap<String, Typedef>,
    #[serde(rename = "const", skip_serializing_if = "IndexMap::is_empty")]
    pub consts: IndexMap<String, Const>,
    #[serde(rename = "enum", skip_serializing_if = "IndexMap::is_empty")]
    pub enums: IndexMap<String, Enum>,
    #[serde(rename = "struct", skip_serializing_if = "IndexMap::is_empty")]
    pub structs: IndexMap<String, Vec<Field>>,
    #[serde(rename = "union", skip_serializing_if = "IndexMap::is_empty")]
    pub unions: IndexMap<String, Vec<Field>>,
    #[serde(rename = "exception", skip_serializing_if = "IndexMap::is_empty")]
    pub exceptions: IndexMap<String, Vec<Field>>,
    #[serde(rename = "service", skip_serializing_if = "IndexMap::is_empty")]
    pub services: IndexMap<String, Service>,
}

impl Document {
    /// Project one declaration into its place in the document.
    pub fn insert(&mut self, declaration: Declaration) {
        match declaration {
            Declaration::Namespace { scope, namespace } => {
                self.namespaces.insert(scope, namespace);
            }
            Declaration::Include { key, include } => {
                self.includes.insert(key, include);
            }
            Declaration::Typedef { name, typedef } => {
                self.typedefs.insert(name, typedef);
            }
            Declaration::Const { name, constant } => {
                self.consts.insert(name, constant);
            }
            Declaration::Enum { name, enumeration } => {
                self.enums.insert(name, enumeration);
            }
            Declaration::Struct { name, fields } => {
                self.structs.insert(name, fields);
            }
            Declaration::Union { name, fields } => {
                self.unions.insert(name, fields);
            }
            Declaration::Exception { name, fields } => {
                self.exceptions.insert(name, fields);
            }
            Declaration::Service { name, service } => {
                self.services.insert(name, service);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
            && self.includes.is_empty()
            && self.typedefs.is_empty()
            && self.consts.is_empty()
            && self.enums.is_empty()
            && self.structs.is_empty()
            && self.unions.is_empty()
            && self.exceptions.is_empty()
            && self.services.is_empty()
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        // String keys and finite numbers only; serialization cannot fail.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{EnumItem, Type, Value};
    use serde_json::json;

    fn field(id: i64, ty: &str, name: &str) -> Field {
        Field {
            id: Some(id),
            option: None,
            ty: Type::named(ty),
            name: name.to_owned(),
            default_value: None,
        }
    }

    #[test]
    fn struct_like_kinds_project_to_bare_arrays() {
        let mut doc = Document::default();
        doc.insert(Declaration::Struct {
            name: "S".into(),
            fields: vec![field(1, "string", "a")],
        });
        doc.insert(Declaration::Exception {
            name: "E".into(),
            fields: vec![field(1, "i32", "code")],
        });
        assert_eq!(
            doc.to_json_value(),
            json!({
                "struct": { "S": [{ "id": 1, "type": "string", "name": "a" }] },
                "exception": { "E": [{ "id": 1, "type": "i32", "name": "code" }] }
            })
        );
    }

    #[test]
    fn redeclaration_replaces_payload_and_keeps_position() {
        let mut doc = Document::default();
        for (name, value) in [("A", 1), ("B", 2), ("A", 3)] {
            doc.insert(Declaration::Enum {
                name: name.into(),
                enumeration: Enum {
                    items: vec![EnumItem {
                        name: "x".into(),
                        value: Some(Value::Int(value)),
                    }],
                },
            });
        }
        let names: Vec<&str> = doc.enums.keys().map(String::as_str).collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(doc.enums["A"].items[0].value, Some(Value::Int(3)));
    }

    #[test]
    fn empty_document_serializes_to_empty_object() {
        let doc = Document::default();
        assert!(doc.is_empty());
        assert_eq!(doc.to_json_value(), json!({}));
    }
}
