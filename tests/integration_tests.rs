//! Integration tests for end-to-end analysis.
//!
//! These tests verify that the complete pipeline works correctly from
//! source code through tokenization, parsing, type checking and the
//! rendered report.

use std::rc::Rc;

use pretty_assertions::assert_eq;
use quack::{
    errors::errors::{Error, ErrorKind},
    format_error,
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::{report::Report, type_checker::type_check},
};

fn analyse(source: &str) -> Result<Report, Error> {
    let tokens = tokenize(source.to_string(), Some("test.qk".to_string()))?;
    let program = parse(tokens, Rc::new("test.qk".to_string()))?;
    Ok(type_check(&program)?.report())
}

const POINTS: &str = r#"
class Pt(x: Int, y: Int) {
    this.x = x;
    this.y = y;

    def plus(other: Pt): Pt {
        return new Pt(this.x + other.x, this.y + other.y);
    }

    def show() {
        this.x.PRINT();
    }
}

class Pt3(x: Int, y: Int, z: Int) extends Pt {
    this.x = x;
    this.y = y;
    this.z = z;
}

a = new Pt(1, 2);
b = a.plus(a);
"#;

#[test]
fn test_report_text() {
    let report = analyse(POINTS).unwrap();

    let expected = "\
class Pt extends Obj
  fields
    x: Int
    y: Int
  method plus(other: Pt) -> Pt
    other: Pt
    this: Pt
    this.x: Int
    this.y: Int
    x: Int
    y: Int
  method show() -> Nothing
    this: Pt
    this.x: Int
    this.y: Int
    x: Int
    y: Int
class Pt3 extends Pt
  fields
    x: Int
    y: Int
    z: Int
program
  a: Pt
  b: Pt
";
    assert_eq!(report.to_string(), expected);
}

#[test]
fn test_report_json() {
    let report = analyse(POINTS).unwrap();
    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    assert_eq!(json["classes"][0]["name"], "Pt");
    assert_eq!(json["classes"][0]["methods"][0]["return_type"], "Pt");
    assert_eq!(json["classes"][0]["methods"][0]["parameters"][0]["type"], "Pt");
    assert_eq!(json["classes"][1]["superclass"], "Pt");
    assert_eq!(json["classes"][1]["fields"][2]["name"], "z");
    assert_eq!(json["program"][1]["name"], "b");
    assert_eq!(json["program"][1]["type"], "Pt");
}

#[test]
fn test_recursive_list() {
    let source = r#"
class Node(value: Int, next: Obj) {
    this.value = value;
    this.next = next;

    def sum(): Int {
        rest = this.next;
        typecase rest {
            n: Node { return this.value + n.sum(); }
        }
        return this.value;
    }
}

list = new Node(1, new Node(2, none));
total = list.sum();
"#;
    let report = analyse(source).unwrap();
    let node = &report.classes[0];

    assert_eq!(node.name, "Node");
    assert_eq!(node.methods[0].return_type.as_deref(), Some("Int"));
    assert_eq!(
        node.fields.iter().map(|f| (f.name.as_str(), f.ty.as_str())).collect::<Vec<_>>(),
        vec![("next", "Obj"), ("value", "Int")]
    );
    assert_eq!(report.program[1].name, "total");
    assert_eq!(report.program[1].ty, "Int");
}

#[test]
fn test_loops_and_conditions() {
    let source = r#"
i = 0;
total = 0;
while i < 10 and not (i == 5) {
    if i > 2 {
        total = total + i;
    } elif i == 1 {
        total = total - 1;
    } else {
        msg = "small";
        msg.PRINT();
    }
    i = i + 1;
}
total.PRINT();
"#;
    let report = analyse(source).unwrap();
    let program: Vec<(&str, &str)> = report.program.iter().map(|s| (s.name.as_str(), s.ty.as_str())).collect();

    assert_eq!(program, vec![("i", "Int"), ("msg", "String"), ("total", "Int")]);
}

#[test]
fn test_errors_stop_each_phase() {
    let cases = [
        ("x = 1 $ 2;", ErrorKind::Syntax),
        ("class A() extends B { } class B() extends A { }", ErrorKind::Hierarchy),
        ("class A() { def A() { } }", ErrorKind::NameConflict),
        ("x = 1; y = x.FROB();", ErrorKind::Resolution),
        ("class A() { this.x = 1; } class B() extends A { this.x = \"s\"; }", ErrorKind::TypeConflict),
    ];

    for (source, kind) in cases {
        let error = analyse(source).unwrap_err();
        assert_eq!(error.get_kind(), kind, "{}", source);
    }
}

#[test]
fn test_error_rendering() {
    let source = "x = 1;\ny = x.FROB();\n";
    let error = analyse(source).unwrap_err();
    let rendered = format_error(&error, "test.qk", source);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(
        lines,
        vec![
            "Error: MethodNotFound (Class `Int` has no method `FROB()`)",
            "-> test.qk",
            "  |",
            "2 | y = x.FROB();",
            "  | ----^",
        ]
    );
}
