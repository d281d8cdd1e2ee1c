//! Type annotation parsing.
//!
//! An annotation is a single class name; anything else is a syntax error.

use crate::{
    ast::{ast::Param, types::SymbolType},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

pub fn parse_type(parser: &mut Parser) -> Result<SymbolType, Error> {
    let token = parser.expect_detailed(TokenKind::Identifier, "expected a class name")?;
    Ok(SymbolType {
        name: token.value,
        position: token.span.start,
    })
}

/// Parses `name: Type` pairs between parentheses, as in constructor and method signatures.
pub fn parse_params(parser: &mut Parser) -> Result<Vec<Param>, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut params = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseParen {
        let name_token = parser.expect_detailed(TokenKind::Identifier, "expected parameter name")?;
        parser.expect_detailed(TokenKind::Colon, "parameters need a type annotation")?;
        let param_type = parse_type(parser)?;
        params.push(Param {
            name: name_token.value,
            param_type,
            span: parser.span_from(name_token.span.start),
        });

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else if parser.current_token_kind() != TokenKind::CloseParen {
            return Err(parser.error_detailed("expected `,` or `)` in parameter list"));
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    Ok(params)
}
