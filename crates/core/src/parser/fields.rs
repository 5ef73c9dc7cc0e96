use super::Parser;
use crate::ast::{Field, FieldOption, Function, Type, Value};
use crate::error::PResult;
use indexmap::IndexMap;

impl<'a> Parser<'a> {
    // -- Field lists (struct, union, exception, args, throws) ---

    /// `open` field* `close`.
    pub(super) fn parse_field_block(&mut self, open: u8, close: u8) -> PResult<Vec<Field>> {
        self.cur.byte(open)?;
        let fields = self.repeat(Self::parse_field);
        self.cur.byte(close)?;
        Ok(fields)
    }

    fn parse_field(&mut self) -> PResult<Field> {
        let id = self.optional(Self::parse_field_id).flatten();
        let option = self.optional(|p| {
            p.any_of(&[
                &|p: &mut Parser<'a>| p.cur.keyword("required").map(|_| FieldOption::Required),
                &|p: &mut Parser<'a>| p.cur.keyword("optional").map(|_| FieldOption::Optional),
            ])
        });
        let ty = self.parse_type()?;
        let name = self.cur.name()?;
        let default_value = self.parse_assignment(Some(&ty));
        self.cur.separator();
        Ok(Field {
            id,
            option,
            ty,
            name,
            default_value,
        })
    }

    /// `id ':'`. An id written with a leading `+` is consumed but not
    /// recorded, so the field comes out without an id.
    fn parse_field_id(&mut self) -> PResult<Option<i64>> {
        let plus = self.cur.eat(b'+');
        let value = self.cur.number()?;
        let id = match value {
            Value::Int(id) if !(plus && id < 0) => id,
            _ => return Err(self.cur.miss("field id must be an integer")),
        };
        self.cur.byte(b':')?;
        Ok(if plus { None } else { Some(id) })
    }

    /// Optional `= value`, checked against `declared`.
    pub(super) fn parse_assignment(&mut self, declared: Option<&Type>) -> Option<Value> {
        self.optional(|p| {
            p.cur.byte(b'=')?;
            p.parse_value(declared)
        })
    }

    // -- Service functions --------------------------------------

    /// `{` function* `}`, keyed by function name.
    pub(super) fn parse_function_block(&mut self) -> PResult<IndexMap<String, Function>> {
        self.cur.byte(b'{')?;
        let functions = self.repeat_keyed(Self::parse_function, |f| f.name.clone());
        self.cur.byte(b'}')?;
        Ok(functions)
    }

    fn parse_function(&mut self) -> PResult<Function> {
        let oneway = self.optional(|p| p.cur.keyword("oneway")).is_some();
        let ty = self.parse_type()?;
        let name = self.cur.name()?;
        let args = self.parse_field_block(b'(', b')')?;
        let throws = self.parse_throws()?;
        self.cur.separator();
        Ok(Function {
            args,
            name,
            oneway,
            throws,
            ty,
        })
    }

    /// Optional `throws ( field* )`. Once `throws` is read the parenthesized
    /// list is mandatory.
    fn parse_throws(&mut self) -> PResult<Vec<Field>> {
        if self.optional(|p| p.cur.keyword("throws")).is_none() {
            return Ok(Vec::new());
        }
        self.parse_field_block(b'(', b')')
    }
}
