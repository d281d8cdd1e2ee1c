//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the Quack constructs including:
//! - Class declarations with constructor arguments, fields and methods
//! - Assignments with and without annotations
//! - Operator desugaring into method calls
//! - Control flow statements and `typecase`
//! - Syntax errors

use std::rc::Rc;

use crate::{
    ast::{
        ast::{Expr, LExpr, Program, Stmt},
        expressions::LogicalOperator,
    },
    errors::errors::Error,
    lexer::lexer::tokenize,
};

use super::parser::parse;

fn parse_source(source: &str) -> Result<Program, Error> {
    let tokens = tokenize(source.to_string(), Some("test.qk".to_string()))?;
    parse(tokens, Rc::new("test.qk".to_string()))
}

fn single_stmt(source: &str) -> Stmt {
    let mut program = parse_source(source).unwrap();
    assert_eq!(program.statements.len(), 1);
    program.statements.remove(0)
}

/// Renders call chains as `recv.METHOD(args)` to keep assertions short.
fn render(expr: &Expr) -> String {
    match expr {
        Expr::Number(number) => number.value.to_string(),
        Expr::String(string) => format!("{:?}", string.value),
        Expr::Boolean(boolean) => boolean.value.to_string(),
        Expr::Nothing(_) => String::from("none"),
        Expr::Symbol(symbol) => symbol.value.clone(),
        Expr::Field(field) => format!("{}.{}", render(&field.object), field.field),
        Expr::Call(call) => format!(
            "{}.{}({})",
            render(&call.receiver),
            call.method,
            call.arguments.iter().map(render).collect::<Vec<_>>().join(", ")
        ),
        Expr::New(new) => format!(
            "new {}({})",
            new.class,
            new.arguments.iter().map(render).collect::<Vec<_>>().join(", ")
        ),
        Expr::Logical(logical) => {
            let op = match logical.operator {
                LogicalOperator::And => "and",
                LogicalOperator::Or => "or",
            };
            format!("({} {} {})", render(&logical.left), op, render(&logical.right))
        }
        Expr::Not(not) => format!("not {}", render(&not.operand)),
    }
}

fn expression_of(source: &str) -> String {
    match single_stmt(source) {
        Stmt::Expression(stmt) => render(&stmt.expression),
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_parse_assignment() {
    match single_stmt("x = 42;") {
        Stmt::Assignment(assignment) => {
            assert!(matches!(assignment.target, LExpr::Variable(ref symbol) if symbol.value == "x"));
            assert!(assignment.explicit_type.is_none());
            assert_eq!(render(&assignment.value), "42");
        }
        other => panic!("expected assignment, got {:?}", other),
    }
}

#[test]
fn test_parse_annotated_assignment() {
    match single_stmt("x: Obj = \"hello\";") {
        Stmt::Assignment(assignment) => {
            assert_eq!(assignment.explicit_type.unwrap().name, "Obj");
        }
        other => panic!("expected assignment, got {:?}", other),
    }
}

#[test]
fn test_parse_field_assignment() {
    match single_stmt("this.x = y;") {
        Stmt::Assignment(assignment) => match assignment.target {
            LExpr::Field(field) => {
                assert!(field.is_this_field());
                assert_eq!(field.field, "x");
            }
            other => panic!("expected field target, got {:?}", other),
        },
        other => panic!("expected assignment, got {:?}", other),
    }
}

#[test]
fn test_binary_operators_desugar_to_calls() {
    assert_eq!(expression_of("1 + 2;"), "1.PLUS(2)");
    assert_eq!(expression_of("a - b;"), "a.MINUS(b)");
    assert_eq!(expression_of("a * b;"), "a.TIMES(b)");
    assert_eq!(expression_of("a / b;"), "a.DIVIDE(b)");
    assert_eq!(expression_of("a < b;"), "a.LESS(b)");
    assert_eq!(expression_of("a <= b;"), "a.ATMOST(b)");
    assert_eq!(expression_of("a >= b;"), "a.ATLEAST(b)");
    assert_eq!(expression_of("a > b;"), "a.MORE(b)");
    assert_eq!(expression_of("a == b;"), "a.EQUALS(b)");
}

#[test]
fn test_operator_precedence() {
    assert_eq!(expression_of("1 + 2 * 3;"), "1.PLUS(2.TIMES(3))");
    assert_eq!(expression_of("(1 + 2) * 3;"), "1.PLUS(2).TIMES(3)");
    assert_eq!(expression_of("1 - 2 - 3;"), "1.MINUS(2).MINUS(3)");
    assert_eq!(expression_of("a < b and b < c or d;"), "((a.LESS(b) and b.LESS(c)) or d)");
    assert_eq!(expression_of("not a == b;"), "not a.EQUALS(b)");
}

#[test]
fn test_unary_minus() {
    assert_eq!(expression_of("-x;"), "0.MINUS(x)");
    assert_eq!(expression_of("-p.x + 1;"), "0.MINUS(p.x).PLUS(1)");
}

#[test]
fn test_method_calls_and_fields() {
    assert_eq!(expression_of("p.x.PRINT();"), "p.x.PRINT()");
    assert_eq!(expression_of("a.f(1, \"s\", none).g();"), "a.f(1, \"s\", none).g()");
    assert_eq!(expression_of("new Pt(1, true).STR();"), "new Pt(1, true).STR()");
}

#[test]
fn test_parse_if_elif_else() {
    let stmt = single_stmt("if a { x = 1; } elif b { x = 2; } else { x = 3; }");
    let Stmt::If(outer) = stmt else {
        panic!("expected if statement");
    };

    assert_eq!(render(&outer.condition), "a");
    assert_eq!(outer.then_body.len(), 1);
    assert_eq!(outer.else_body.len(), 1);

    let Stmt::If(inner) = &outer.else_body[0] else {
        panic!("elif should nest an if in the else body");
    };
    assert_eq!(render(&inner.condition), "b");
    assert_eq!(inner.else_body.len(), 1);
}

#[test]
fn test_missing_else_is_empty_block() {
    let Stmt::If(stmt) = single_stmt("if x < 10 { x = x + 1; }") else {
        panic!("expected if statement");
    };
    assert!(stmt.else_body.is_empty());
}

#[test]
fn test_parse_while_loop() {
    let Stmt::While(stmt) = single_stmt("while x < 10 { x = x + 1; }") else {
        panic!("expected while statement");
    };
    assert_eq!(render(&stmt.condition), "x.LESS(10)");
    assert_eq!(stmt.body.len(), 1);
}

#[test]
fn test_parse_typecase() {
    let Stmt::Typecase(stmt) = single_stmt("typecase v { i: Int { i.PRINT(); } s: String { } }") else {
        panic!("expected typecase statement");
    };

    assert_eq!(render(&stmt.subject), "v");
    assert_eq!(stmt.alternatives.len(), 2);
    assert_eq!(stmt.alternatives[0].name, "i");
    assert_eq!(stmt.alternatives[0].alt_type.name, "Int");
    assert_eq!(stmt.alternatives[0].body.len(), 1);
    assert_eq!(stmt.alternatives[1].alt_type.name, "String");
    assert!(stmt.alternatives[1].body.is_empty());
}

#[test]
fn test_parse_return() {
    let source = "class C() { def f() { return; } def g(): Int { return 1; } }";
    let program = parse_source(source).unwrap();
    let methods = &program.classes[0].methods;

    assert!(matches!(&methods[0].body[0], Stmt::Return(ret) if ret.value.is_none()));
    assert!(matches!(&methods[1].body[0], Stmt::Return(ret) if ret.value.is_some()));
    assert_eq!(methods[1].return_type.as_ref().unwrap().name, "Int");
}

#[test]
fn test_parse_class_declaration() {
    let source = r#"
        class Pt(x: Int, y: Int) extends Obj {
            this.x = x;
            this.y = y;
            def plus(o: Pt): Pt { return new Pt(this.x + o.x, this.y + o.y); }
            def show() { this.x.PRINT(); }
        }
        p = new Pt(1, 2);
    "#;
    let program = parse_source(source).unwrap();

    assert_eq!(program.classes.len(), 1);
    let class = &program.classes[0];
    assert_eq!(class.name, "Pt");
    assert_eq!(class.superclass.name, "Obj");
    assert_eq!(class.arguments.len(), 2);
    assert_eq!(class.arguments[1].name, "y");
    assert_eq!(class.arguments[1].param_type.name, "Int");
    assert_eq!(class.statements.len(), 2);
    assert_eq!(class.methods.len(), 2);
    assert_eq!(class.methods[0].parameters[0].param_type.name, "Pt");
    assert!(class.methods[1].return_type.is_none());
    assert_eq!(program.statements.len(), 1);
}

#[test]
fn test_missing_extends_defaults_to_obj() {
    let program = parse_source("class A() { }").unwrap();
    assert_eq!(program.classes[0].superclass.name, "Obj");
}

#[test]
fn test_missing_semicolon() {
    let error = parse_source("x = 1").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_cannot_assign_to_call() {
    let error = parse_source("f.g() = 1;").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
    assert_eq!(error.get_position().0, 0);
}

#[test]
fn test_number_out_of_range() {
    let error = parse_source("x = 99999999999999999999;").unwrap_err();
    assert_eq!(error.get_error_name(), "NumberParseError");
    assert_eq!(error.get_position().0, 4);
}

#[test]
fn test_unterminated_class_body() {
    assert!(parse_source("class A() { x = 1;").is_err());
    assert!(parse_source("class A() { def f() { ").is_err());
}

#[test]
fn test_unexpected_token_in_expression() {
    let error = parse_source("x = ;").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(error.get_position().0, 4);
}
