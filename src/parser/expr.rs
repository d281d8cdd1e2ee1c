use crate::{
    ast::{
        ast::Expr,
        expressions::{
            BooleanExpr, CallExpr, FieldExpr, LogicalExpr, LogicalOperator, NewExpr, NotExpr,
            NothingExpr, NumberExpr, StringExpr, SymbolExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{
    lookups::{operator_method, BindingPower},
    parser::Parser,
    types::parse_type,
};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken { token: parser.current_token().value.clone() },
                parser.get_position(),
            ));
        }
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    while parser.current_binding_power() > bp {
        let token_kind = parser.current_token_kind();
        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => {
                return Err(Error::new(
                    ErrorImpl::UnexpectedToken { token: parser.current_token().value.clone() },
                    parser.get_position(),
                ));
            }
        };

        let current_bp = parser.current_binding_power();
        left = led(parser, left, current_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();
    match token.kind {
        TokenKind::Number => match token.value.parse::<i64>() {
            Ok(value) => {
                parser.advance();
                Ok(Expr::Number(NumberExpr { value, span: token.span }))
            }
            Err(_) => Err(Error::new(
                ErrorImpl::NumberParseError { token: token.value },
                token.span.start,
            )),
        },
        TokenKind::Identifier => {
            parser.advance();
            Ok(Expr::Symbol(SymbolExpr { value: token.value, span: token.span }))
        }
        TokenKind::String => {
            parser.advance();
            Ok(Expr::String(StringExpr { value: token.value, span: token.span }))
        }
        TokenKind::True | TokenKind::False => {
            parser.advance();
            Ok(Expr::Boolean(BooleanExpr { value: token.kind == TokenKind::True, span: token.span }))
        }
        TokenKind::NoneLiteral => {
            parser.advance();
            Ok(Expr::Nothing(NothingExpr { span: token.span }))
        }
        _ => Err(Error::new(
            ErrorImpl::UnexpectedToken { token: token.value },
            token.span.start,
        )),
    }
}

/// `a + b` and friends become `a.PLUS(b)`.
pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let method = operator_method(operator_token.kind).ok_or_else(|| {
        Error::new(
            ErrorImpl::UnexpectedToken { token: operator_token.value.clone() },
            operator_token.span.start.clone(),
        )
    })?;

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Call(CallExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: right.get_span().end.clone(),
        },
        receiver: Box::new(left),
        method: String::from(method),
        arguments: vec![right],
    }))
}

pub fn parse_logical_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let operator = if operator_token.kind == TokenKind::And {
        LogicalOperator::And
    } else {
        LogicalOperator::Or
    };

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Logical(LogicalExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: right.get_span().end.clone(),
        },
        operator,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

/// Unary minus: `-e` becomes `0.MINUS(e)`.
pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let rhs = parse_expr(parser, BindingPower::Unary)?;

    let zero = Expr::Number(NumberExpr {
        value: 0,
        span: operator_token.span.clone(),
    });

    Ok(Expr::Call(CallExpr {
        span: Span {
            start: operator_token.span.start.clone(),
            end: rhs.get_span().end.clone(),
        },
        receiver: Box::new(zero),
        method: String::from("MINUS"),
        arguments: vec![rhs],
    }))
}

pub fn parse_not_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start.clone();
    let operand = parse_expr(parser, BindingPower::Not)?;

    Ok(Expr::Not(NotExpr {
        span: Span {
            start,
            end: operand.get_span().end.clone(),
        },
        operand: Box::new(operand),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect_detailed(TokenKind::CloseParen, "expected `)` to close the group")?;

    Ok(expr)
}

/// Parses `(a, b, ...)` after a callee or class name.
pub fn parse_arguments(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut args = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        args.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else if parser.current_token_kind() != TokenKind::CloseParen {
            return Err(parser.error_detailed("expected `,` or `)` in argument list"));
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    Ok(args)
}

/// `obj.name` is a field access, `obj.name(args)` a method call.
pub fn parse_member_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();
    let member = parser.expect_detailed(TokenKind::Identifier, "expected a member name after `.`")?;

    if parser.current_token_kind() == TokenKind::OpenParen {
        let arguments = parse_arguments(parser)?;
        let start = left.get_span().start.clone();
        Ok(Expr::Call(CallExpr {
            receiver: Box::new(left),
            method: member.value,
            arguments,
            span: parser.span_from(start),
        }))
    } else {
        let start = left.get_span().start.clone();
        Ok(Expr::Field(FieldExpr {
            object: Box::new(left),
            field: member.value,
            span: Span {
                start,
                end: member.span.end,
            },
        }))
    }
}

pub fn parse_new_expr(parser: &mut Parser) -> Result<Expr, Error> {
    // new Pt(1, 2)
    let start = parser.advance().span.start.clone();
    let class = parse_type(parser)?;
    let arguments = parse_arguments(parser)?;

    Ok(Expr::New(NewExpr {
        class,
        arguments,
        span: parser.span_from(start),
    }))
}
