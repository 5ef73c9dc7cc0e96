//! `{a, b,}`, `{a; b;}` and `{a b}` read the same in every repeated grammar.

use rstest::rstest;
use thrift_idl::parse_to_value;

fn same_document(variants: [&str; 4]) {
    let first = parse_to_value(variants[0]).unwrap_or_else(|e| panic!("{}: {}", variants[0], e));
    for src in &variants[1..] {
        let other = parse_to_value(src).unwrap_or_else(|e| panic!("{}: {}", src, e));
        assert_eq!(first, other, "{:?} differs from {:?}", src, variants[0]);
    }
}

#[rstest]
#[case::enum_items([
    "enum E { A = 1, B = 2 }",
    "enum E { A = 1, B = 2, }",
    "enum E { A = 1; B = 2; }",
    "enum E { A = 1 B = 2 }",
])]
#[case::struct_fields([
    "struct S { 1: i32 a, 2: i32 b }",
    "struct S { 1: i32 a, 2: i32 b, }",
    "struct S { 1: i32 a; 2: i32 b; }",
    "struct S { 1: i32 a 2: i32 b }",
])]
#[case::function_args([
    "service V { void f(1: i32 a, 2: i32 b) }",
    "service V { void f(1: i32 a, 2: i32 b,) }",
    "service V { void f(1: i32 a; 2: i32 b;) }",
    "service V { void f(1: i32 a 2: i32 b) }",
])]
#[case::throws([
    "service V { void f() throws (1: E a, 2: E b) }",
    "service V { void f() throws (1: E a, 2: E b,) }",
    "service V { void f() throws (1: E a; 2: E b;) }",
    "service V { void f() throws (1: E a 2: E b) }",
])]
#[case::functions([
    "service V { void f(), void g() }",
    "service V { void f(), void g(), }",
    "service V { void f(); void g(); }",
    "service V { void f() void g() }",
])]
#[case::list_items([
    "const list<i32> L = [1, 2]",
    "const list<i32> L = [1, 2,]",
    "const list<i32> L = [1; 2;]",
    "const list<i32> L = [1 2]",
])]
#[case::map_entries([
    "const map<i32,string> M = {1: 'a', 2: 'b'}",
    "const map<i32,string> M = {1: 'a', 2: 'b',}",
    "const map<i32,string> M = {1: 'a'; 2: 'b';}",
    "const map<i32,string> M = {1: 'a' 2: 'b'}",
])]
#[case::map_type_arguments([
    "typedef map<i32,string> M",
    "typedef map<i32, string> M,",
    "typedef map<i32;string> M;",
    "typedef map<i32 string> M",
])]
fn separators_are_interchangeable(#[case] variants: [&str; 4]) {
    same_document(variants);
}

#[rstest]
#[case("a")]
#[case("_private")]
#[case("v2")]
#[case("shared.Work")]
#[case("deeply.nested.name_3")]
#[case("9lives")]
fn identifier_forms(#[case] name: &str) {
    let value = parse_to_value(format!("typedef i32 {}", name)).unwrap();
    assert_eq!(value["typedef"][name]["type"], "i32");
}
