//! Literal values.
//!
//! The declared type of the slot being filled is passed down explicitly so a
//! collection literal can be checked against it: `[...]` needs a `list` or
//! `set`, `{...}` needs a `map`. Custom type names may be typedef aliases of
//! containers and are never resolved, so they accept either literal.

use super::Parser;
use crate::ast::{ContainerType, MapEntry, Reference, Type, Value, BASE_TYPES};
use crate::error::PResult;

impl<'a> Parser<'a> {
    pub(super) fn parse_value(&mut self, expected: Option<&Type>) -> PResult<Value> {
        // Hex and e-notation share a prefix with plain numbers, so the most
        // specific form is tried first.
        self.any_of(&[
            &|p: &mut Parser<'a>| p.cur.hex(),
            &|p: &mut Parser<'a>| p.cur.e_notation(),
            &|p: &mut Parser<'a>| p.cur.number(),
            &|p: &mut Parser<'a>| p.cur.string_value(p.options.escapes).map(Value::Str),
            &Self::boolean_value,
            &|p: &mut Parser<'a>| p.list_value(expected),
            &|p: &mut Parser<'a>| p.map_value(expected),
            &|p: &mut Parser<'a>| p.parse_reference().map(Value::Ref),
        ])
    }

    fn boolean_value(&mut self) -> PResult<Value> {
        self.any_of(&[
            &|p: &mut Parser<'a>| p.cur.keyword("true").map(|_| Value::Bool(true)),
            &|p: &mut Parser<'a>| p.cur.keyword("false").map(|_| Value::Bool(false)),
        ])
    }

    /// `name ('.' name)*`. The name reader already absorbs dots, so the
    /// extra segments only appear when the dots are spaced out.
    pub(super) fn parse_reference(&mut self) -> PResult<Reference> {
        let mut segments = vec![self.cur.name()?];
        segments.extend(self.repeat(|p| {
            p.cur.byte(b'.')?;
            p.cur.name()
        }));
        Ok(Reference { segments })
    }

    fn list_value(&mut self, expected: Option<&Type>) -> PResult<Value> {
        self.nested(|p| {
            p.cur.byte(b'[')?;
            let element = element_type(expected);
            let items = p.repeat(|p| {
                let value = p.parse_value(element)?;
                p.cur.separator();
                Ok(value)
            });
            p.cur.byte(b']')?;
            check_literal(p, expected, Literal::List)?;
            Ok(Value::List(items))
        })
    }

    fn map_value(&mut self, expected: Option<&Type>) -> PResult<Value> {
        self.nested(|p| {
            p.cur.byte(b'{')?;
            let (key_type, value_type) = entry_types(expected);
            let entries = p.repeat(|p| {
                let key = p.parse_value(key_type)?;
                p.cur.byte(b':')?;
                let value = p.parse_value(value_type)?;
                p.cur.separator();
                Ok(MapEntry { key, value })
            });
            p.cur.byte(b'}')?;
            check_literal(p, expected, Literal::Map)?;
            Ok(Value::Map(entries))
        })
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Literal {
    List,
    Map,
}

fn check_literal(p: &mut Parser<'_>, expected: Option<&Type>, literal: Literal) -> PResult<()> {
    let declared = match expected {
        None => "undefined",
        Some(Type::Container(c)) => c.name(),
        Some(Type::Named(n)) if BASE_TYPES.contains(&n.as_str()) => n.as_str(),
        Some(Type::Named(_)) => return Ok(()),
    };
    let accepted = match literal {
        Literal::List => matches!(declared, "list" | "set"),
        Literal::Map => declared == "map",
    };
    if accepted {
        Ok(())
    } else {
        Err(p.cur.miss(format!("invalid {} value", declared)))
    }
}

/// Declared type for the items of a `[...]` literal. An opaque custom name
/// is handed down unchanged so nested literals stay unchecked.
fn element_type(expected: Option<&Type>) -> Option<&Type> {
    match expected {
        Some(Type::Container(ContainerType::List { value_type }))
        | Some(Type::Container(ContainerType::Set { value_type })) => Some(value_type),
        Some(t @ Type::Named(_)) if !t.is_base() => Some(t),
        _ => None,
    }
}

fn entry_types(expected: Option<&Type>) -> (Option<&Type>, Option<&Type>) {
    match expected {
        Some(Type::Container(ContainerType::Map {
            key_type,
            value_type,
        })) => (Some(key_type), Some(value_type)),
        Some(t @ Type::Named(_)) if !t.is_base() => (Some(t), Some(t)),
        _ => (None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{EscapeMode, ParseOptions};

    fn value_with(src: &str, expected: Option<&Type>, options: &ParseOptions) -> PResult<Value> {
        let mut p = Parser::new(src.as_bytes(), options);
        p.parse_value(expected)
    }

    fn value(src: &str, expected: Option<&Type>) -> PResult<Value> {
        value_with(src, expected, &ParseOptions::default())
    }

    fn ints(ns: &[i64]) -> Value {
        Value::List(ns.iter().copied().map(Value::Int).collect())
    }

    #[test]
    fn numeric_forms_disambiguate() {
        assert_eq!(value("0x7fff", None).unwrap(), Value::Int(32767));
        assert_eq!(value("0x7fffffff", None).unwrap(), Value::Int(2147483647));
        assert_eq!(value("-3e4", None).unwrap(), Value::Int(-30000));
        assert_eq!(value("2.147483647e9", None).unwrap(), Value::Int(2147483647));
        assert_eq!(value("12.5", None).unwrap(), Value::Float(12.5));
    }

    #[test]
    fn booleans_strings_and_references() {
        assert_eq!(value("true", None).unwrap(), Value::Bool(true));
        assert_eq!(value("false", None).unwrap(), Value::Bool(false));
        assert_eq!(value("'x'", None).unwrap(), Value::Str("x".into()));
        assert_eq!(
            value("Color.RED", None).unwrap(),
            Value::Ref(Reference {
                segments: vec!["Color.RED".into()]
            })
        );
        assert_eq!(
            value("Color . RED", None).unwrap(),
            Value::Ref(Reference {
                segments: vec!["Color".into(), "RED".into()]
            })
        );
    }

    #[test]
    fn list_literal_needs_list_or_set_type() {
        let list = Type::list(Type::named("i32"));
        let set = Type::set(Type::named("i32"));
        let map = Type::map(Type::named("i32"), Type::named("i32"));
        assert_eq!(value("[1, 2; 3,]", Some(&list)).unwrap(), ints(&[1, 2, 3]));
        assert_eq!(value("[1 2]", Some(&set)).unwrap(), ints(&[1, 2]));
        assert!(value("[1]", Some(&map)).is_err());
        assert!(value("[1]", Some(&Type::named("i32"))).is_err());
        assert!(value("[1]", None).is_err());
    }

    #[test]
    fn map_literal_needs_map_type() {
        let map = Type::map(Type::named("i16"), Type::named("string"));
        assert_eq!(
            value("{1:'a',2:'b'}", Some(&map)).unwrap(),
            Value::Map(vec![
                MapEntry {
                    key: Value::Int(1),
                    value: Value::Str("a".into())
                },
                MapEntry {
                    key: Value::Int(2),
                    value: Value::Str("b".into())
                },
            ])
        );
        assert!(value("{1:'a'}", Some(&Type::set(Type::named("i16")))).is_err());
        assert!(value("{1:'a'}", Some(&Type::list(Type::named("i16")))).is_err());
    }

    #[test]
    fn invalid_literal_message_names_declared_kind() {
        let map = Type::map(Type::named("i32"), Type::named("i32"));
        let options = ParseOptions::default();
        let mut p = Parser::new(b"[1]", &options);
        assert!(p.parse_value(Some(&map)).is_err());
        assert_eq!(
            p.cur.furthest().map(|m| m.message.as_str()),
            Some("invalid map value")
        );
    }

    #[test]
    fn nested_literals_follow_element_types() {
        let ty = Type::list(Type::list(Type::named("i32")));
        assert_eq!(
            value("[[1], [2, 3]]", Some(&ty)).unwrap(),
            Value::List(vec![ints(&[1]), ints(&[2, 3])])
        );
        let bad = Type::list(Type::named("i32"));
        assert!(value("[[1]]", Some(&bad)).is_err());
    }

    #[test]
    fn custom_type_names_accept_any_collection() {
        let alias = Type::named("IntList");
        assert_eq!(value("[1]", Some(&alias)).unwrap(), ints(&[1]));
        assert!(value("{1: [2]}", Some(&alias)).is_ok());
    }

    #[test]
    fn escapes_follow_options() {
        let decode = ParseOptions {
            escapes: EscapeMode::Decode,
            ..ParseOptions::default()
        };
        assert_eq!(
            value(r"'a\nb'", None).unwrap(),
            Value::Str(r"a\nb".into())
        );
        assert_eq!(
            value_with(r"'a\nb'", None, &decode).unwrap(),
            Value::Str("a\nb".into())
        );
    }

    #[test]
    fn malformed_number_run_reads_as_reference() {
        assert_eq!(
            value("1.2.3", None).unwrap(),
            Value::Ref(Reference {
                segments: vec!["1.2.3".into()]
            })
        );
    }
}
