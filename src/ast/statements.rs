use crate::Span;

use super::{
    ast::{Expr, LExpr, Stmt},
    types::SymbolType,
};

/// `target [: Type] = value;`
#[derive(Debug, Clone)]
pub struct AssignmentStmt {
    pub target: LExpr,
    pub explicit_type: Option<SymbolType>,
    pub value: Expr,
    pub span: Span,
}

/// An expression evaluated for its effects, e.g. `x.PRINT();`
#[derive(Debug, Clone)]
pub struct ExpressionStmt {
    pub expression: Expr,
    pub span: Span,
}

/// `return;` or `return value;`
#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub span: Span,
}

/// `if cond { .. } else { .. }`; `elif` chains nest in `else_body`.
#[derive(Debug, Clone)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_body: Vec<Stmt>,
    pub else_body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// `typecase subject { name: Type { .. } ... }`
#[derive(Debug, Clone)]
pub struct TypecaseStmt {
    pub subject: Expr,
    pub alternatives: Vec<TypeAlternative>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct TypeAlternative {
    pub name: String,
    pub alt_type: SymbolType,
    pub body: Vec<Stmt>,
    pub span: Span,
}
