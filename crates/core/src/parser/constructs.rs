use super::Parser;
use crate::ast::{
    include_key, Const, Declaration, Enum, EnumItem, Field, Include, Namespace, Service, Typedef,
};
use crate::error::PResult;

impl<'a> Parser<'a> {
    // -- Aliases and constants ----------------------------------

    /// `typedef Type Name [sep]`
    pub(super) fn parse_typedef(&mut self) -> PResult<Declaration> {
        self.cur.keyword("typedef")?;
        let ty = self.parse_type()?;
        let name = self.cur.name()?;
        self.cur.separator();
        Ok(Declaration::Typedef {
            name,
            typedef: Typedef { ty },
        })
    }

    /// `const Type Name = Value [sep]`
    pub(super) fn parse_const(&mut self) -> PResult<Declaration> {
        self.cur.keyword("const")?;
        let ty = self.parse_type()?;
        let name = self.cur.name()?;
        self.cur.byte(b'=')?;
        let value = self.parse_value(Some(&ty))?;
        self.cur.separator();
        Ok(Declaration::Const {
            name,
            constant: Const { ty, value },
        })
    }

    // -- Enums --------------------------------------------------

    pub(super) fn parse_enum(&mut self) -> PResult<Declaration> {
        self.cur.keyword("enum")?;
        let name = self.cur.name()?;
        self.cur.byte(b'{')?;
        let items = self.repeat(Self::parse_enum_item);
        self.cur.byte(b'}')?;
        Ok(Declaration::Enum {
            name,
            enumeration: Enum { items },
        })
    }

    /// Item values carry no declared type, so collection literals are
    /// rejected here.
    fn parse_enum_item(&mut self) -> PResult<EnumItem> {
        let name = self.cur.name()?;
        let value = self.parse_assignment(None);
        self.cur.separator();
        Ok(EnumItem { name, value })
    }

    // -- Struct-like constructs ---------------------------------

    pub(super) fn parse_struct(&mut self) -> PResult<Declaration> {
        let (name, fields) = self.parse_struct_like("struct")?;
        Ok(Declaration::Struct { name, fields })
    }

    pub(super) fn parse_union(&mut self) -> PResult<Declaration> {
        let (name, fields) = self.parse_struct_like("union")?;
        Ok(Declaration::Union { name, fields })
    }

    pub(super) fn parse_exception(&mut self) -> PResult<Declaration> {
        let (name, fields) = self.parse_struct_like("exception")?;
        Ok(Declaration::Exception { name, fields })
    }

    fn parse_struct_like(&mut self, keyword: &str) -> PResult<(String, Vec<Field>)> {
        self.cur.keyword(keyword)?;
        let name = self.cur.name()?;
        let fields = self.parse_field_block(b'{', b'}')?;
        Ok((name, fields))
    }

    // -- Services -----------------------------------------------

    /// `service Name [extends Ref] { function* }`
    pub(super) fn parse_service(&mut self) -> PResult<Declaration> {
        self.cur.keyword("service")?;
        let name = self.cur.name()?;
        let extends = self.optional(|p| {
            p.cur.keyword("extends")?;
            p.parse_reference()
        });
        let functions = self.parse_function_block()?;
        Ok(Declaration::Service {
            name,
            service: Service {
                extends: extends.map(|r| r.segments.join(".")),
                functions,
            },
        })
    }

    // -- Namespaces and includes --------------------------------

    /// `namespace Scope Ref`, keyed by scope.
    pub(super) fn parse_namespace(&mut self) -> PResult<Declaration> {
        self.cur.keyword("namespace")?;
        let scope = self.cur.scope()?;
        let target = self.parse_reference()?;
        Ok(Declaration::Namespace {
            scope,
            namespace: Namespace {
                service_name: target.segments.join("."),
            },
        })
    }

    /// `include "path"`, keyed by the file stem.
    pub(super) fn parse_include(&mut self) -> PResult<Declaration> {
        self.cur.keyword("include")?;
        let path = self.cur.quoted_path()?;
        self.cur.skip_trivia();
        Ok(Declaration::Include {
            key: include_key(&path),
            include: Include { path },
        })
    }
}
