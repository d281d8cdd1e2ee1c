use crate::Span;

use super::{ast::Expr, types::SymbolType};

// LITERALS

/// Integer literal, typed `Int`.
#[derive(Debug, Clone)]
pub struct NumberExpr {
    pub value: i64,
    pub span: Span,
}

/// String literal, typed `String`.
#[derive(Debug, Clone)]
pub struct StringExpr {
    pub value: String,
    pub span: Span,
}

/// `true` / `false`, typed `Boolean`.
#[derive(Debug, Clone)]
pub struct BooleanExpr {
    pub value: bool,
    pub span: Span,
}

/// `none`, typed `Nothing`.
#[derive(Debug, Clone)]
pub struct NothingExpr {
    pub span: Span,
}

/// Symbol Expression
/// A bare identifier, including `this`.
#[derive(Debug, Clone)]
pub struct SymbolExpr {
    pub value: String,
    pub span: Span,
}

// COMPLEX

/// `object.field`
#[derive(Debug, Clone)]
pub struct FieldExpr {
    pub object: Box<Expr>,
    pub field: String,
    pub span: Span,
}

impl FieldExpr {
    /// The receiver is literally `this`.
    pub fn is_this_field(&self) -> bool {
        matches!(&*self.object, Expr::Symbol(symbol) if symbol.value == "this")
    }
}

/// `receiver.method(arguments)`
///
/// Binary operators are desugared into calls, so `a + b` arrives here as
/// `a.PLUS(b)`.
#[derive(Debug, Clone)]
pub struct CallExpr {
    pub receiver: Box<Expr>,
    pub method: String,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

/// `new Class(arguments)`
#[derive(Debug, Clone)]
pub struct NewExpr {
    pub class: SymbolType,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
}

/// `left and right`, `left or right`
#[derive(Debug, Clone)]
pub struct LogicalExpr {
    pub operator: LogicalOperator,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub span: Span,
}

/// `not operand`
#[derive(Debug, Clone)]
pub struct NotExpr {
    pub operand: Box<Expr>,
    pub span: Span,
}
