use crate::{
    ast::{
        ast::{ClassDecl, Expr, MethodDecl, Stmt},
        statements::{
            AssignmentStmt, ExpressionStmt, IfStmt, ReturnStmt, TypeAlternative, TypecaseStmt,
            WhileStmt,
        },
        types::SymbolType,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Span,
};

use super::{
    parser::Parser,
    types::{parse_params, parse_type},
};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let handler = parser.get_stmt_lookup().get(&parser.current_token_kind()).copied();
    if let Some(handler) = handler {
        return handler(parser);
    }

    let start = parser.get_position();
    let expr = parse_expr(parser, BindingPower::Default)?;

    if matches!(parser.current_token_kind(), TokenKind::Colon | TokenKind::Assignment) {
        return parse_assignment_stmt(parser, expr);
    }

    parser.expect_detailed(TokenKind::Semicolon, "expected `;` after expression")?;

    Ok(Stmt::Expression(ExpressionStmt {
        expression: expr,
        span: parser.span_from(start),
    }))
}

/// Finishes `target [: Type] = value;` once the target has been parsed.
fn parse_assignment_stmt(parser: &mut Parser, target: Expr) -> Result<Stmt, Error> {
    let start = target.get_span().start.clone();
    let target = match target.into_lexpr() {
        Some(lexpr) => lexpr,
        None => {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: parser.current_token().value.clone(),
                    message: String::from("only variables and fields can be assigned to"),
                },
                start,
            ));
        }
    };

    let explicit_type = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        Some(parse_type(parser)?)
    } else {
        None
    };

    parser.expect_detailed(TokenKind::Assignment, "expected `=` in assignment")?;
    let value = parse_expr(parser, BindingPower::Default)?;
    parser.expect_detailed(TokenKind::Semicolon, "expected `;` after assignment")?;

    Ok(Stmt::Assignment(AssignmentStmt {
        target,
        explicit_type,
        value,
        span: parser.span_from(start),
    }))
}

/// Parses `{ stmt* }`.
pub fn parse_block(parser: &mut Parser) -> Result<Vec<Stmt>, Error> {
    parser.expect_detailed(TokenKind::OpenCurly, "expected `{` to open a block")?;

    let mut statements = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if !parser.has_tokens() {
            return Err(parser.error_detailed("unterminated block, expected `}`"));
        }
        statements.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;
    Ok(statements)
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let value = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect_detailed(TokenKind::Semicolon, "expected `;` after return")?;

    Ok(Stmt::Return(ReturnStmt {
        value,
        span: parser.span_from(start),
    }))
}

/// `if`/`elif`/`else`. Every `elif` becomes an `if` nested in the else body.
pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let condition = parse_expr(parser, BindingPower::Default)?;
    let then_body = parse_block(parser)?;

    let else_body = match parser.current_token_kind() {
        TokenKind::Elif => vec![parse_if_stmt(parser)?],
        TokenKind::Else => {
            parser.advance();
            parse_block(parser)?
        }
        _ => Vec::new(),
    };

    Ok(Stmt::If(IfStmt {
        condition,
        then_body,
        else_body,
        span: parser.span_from(start),
    }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let condition = parse_expr(parser, BindingPower::Default)?;
    let body = parse_block(parser)?;

    Ok(Stmt::While(WhileStmt {
        condition,
        body,
        span: parser.span_from(start),
    }))
}

pub fn parse_typecase_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let subject = parse_expr(parser, BindingPower::Default)?;
    parser.expect_detailed(TokenKind::OpenCurly, "expected `{` after typecase subject")?;

    let mut alternatives = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        let name = parser.expect_detailed(TokenKind::Identifier, "expected `name: Type` alternative")?;
        parser.expect_detailed(TokenKind::Colon, "typecase alternatives need a type")?;
        let alt_type = parse_type(parser)?;
        let body = parse_block(parser)?;

        alternatives.push(TypeAlternative {
            name: name.value,
            alt_type,
            body,
            span: parser.span_from(name.span.start),
        });
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Stmt::Typecase(TypecaseStmt {
        subject,
        alternatives,
        span: parser.span_from(start),
    }))
}

pub fn parse_method_decl(parser: &mut Parser) -> Result<MethodDecl, Error> {
    let start = parser.advance().span.start.clone();

    let name = parser.expect_detailed(TokenKind::Identifier, "expected method name after `def`")?.value;
    let parameters = parse_params(parser)?;

    let return_type = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        Some(parse_type(parser)?)
    } else {
        None
    };

    let body = parse_block(parser)?;

    Ok(MethodDecl {
        name,
        parameters,
        return_type,
        body,
        span: parser.span_from(start),
    })
}

/// `class Name(args) [extends Super] { statements methods }`
pub fn parse_class_decl(parser: &mut Parser) -> Result<ClassDecl, Error> {
    let start = parser.advance().span.start.clone();

    let name_token = parser.expect_detailed(TokenKind::Identifier, "expected class name after `class`")?;
    let arguments = parse_params(parser)?;

    let superclass = if parser.current_token_kind() == TokenKind::Extends {
        parser.advance();
        parse_type(parser)?
    } else {
        SymbolType::new("Obj", name_token.span.start.clone())
    };

    parser.expect_detailed(TokenKind::OpenCurly, "expected `{` to open the class body")?;

    let mut statements = Vec::new();
    while !matches!(parser.current_token_kind(), TokenKind::Def | TokenKind::CloseCurly) {
        if !parser.has_tokens() {
            return Err(parser.error_detailed("unterminated class body, expected `}`"));
        }
        statements.push(parse_stmt(parser)?);
    }

    let mut methods = Vec::new();
    while parser.current_token_kind() == TokenKind::Def {
        methods.push(parse_method_decl(parser)?);
    }

    parser.expect_detailed(TokenKind::CloseCurly, "expected `}` to close the class body")?;

    Ok(ClassDecl {
        name: name_token.value,
        superclass,
        arguments,
        statements,
        methods,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    })
}
