use super::Parser;
use crate::ast::Type;
use crate::error::PResult;

#[derive(Clone, Copy)]
enum Sequence {
    List,
    Set,
}

impl<'a> Parser<'a> {
    // -- Type parsing -------------------------------------------

    pub(super) fn parse_type(&mut self) -> PResult<Type> {
        self.any_of(&[&Self::map_type, &Self::list_or_set_type, &Self::named_type])
    }

    fn map_type(&mut self) -> PResult<Type> {
        self.cur.keyword("map")?;
        self.nested(|p| {
            p.cur.byte(b'<')?;
            let key_type = p.parse_type()?;
            p.cur.separator();
            let value_type = p.parse_type()?;
            p.cur.byte(b'>')?;
            Ok(Type::map(key_type, value_type))
        })
    }

    fn list_or_set_type(&mut self) -> PResult<Type> {
        let kind = self.any_of(&[
            &|p: &mut Parser<'a>| p.cur.keyword("list").map(|_| Sequence::List),
            &|p: &mut Parser<'a>| p.cur.keyword("set").map(|_| Sequence::Set),
        ])?;
        self.nested(|p| {
            p.cur.byte(b'<')?;
            let value_type = p.parse_type()?;
            p.cur.byte(b'>')?;
            Ok(match kind {
                Sequence::List => Type::list(value_type),
                Sequence::Set => Type::set(value_type),
            })
        })
    }

    fn named_type(&mut self) -> PResult<Type> {
        self.cur.name().map(Type::Named)
    }
}
