use crate::Span;

use super::{
    expressions::{
        BooleanExpr, CallExpr, FieldExpr, LogicalExpr, NewExpr, NotExpr, NothingExpr, NumberExpr,
        StringExpr, SymbolExpr,
    },
    statements::{AssignmentStmt, ExpressionStmt, IfStmt, ReturnStmt, TypecaseStmt, WhileStmt},
    types::SymbolType,
};

/// A parsed compilation unit: class definitions followed by top-level statements.
#[derive(Debug, Clone)]
pub struct Program {
    pub classes: Vec<ClassDecl>,
    pub statements: Vec<Stmt>,
    pub span: Span,
}

/// `class Name(args) extends Super { statements methods }`
#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub name: String,
    pub superclass: SymbolType,
    /// Constructor arguments, in declaration order.
    pub arguments: Vec<Param>,
    /// Field-initializer statements (the constructor body).
    pub statements: Vec<Stmt>,
    pub methods: Vec<MethodDecl>,
    pub span: Span,
}

/// `def name(params) [: ReturnType] { body }`
#[derive(Debug, Clone)]
pub struct MethodDecl {
    pub name: String,
    pub parameters: Vec<Param>,
    pub return_type: Option<SymbolType>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// A `name: Type` pair in a constructor or method signature.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub param_type: SymbolType,
    pub span: Span,
}

/// Statements
///
/// One variant per statement kind. The semantic passes match on these
/// exhaustively instead of downcasting.
#[derive(Debug, Clone)]
pub enum Stmt {
    Assignment(AssignmentStmt),
    Expression(ExpressionStmt),
    Return(ReturnStmt),
    If(IfStmt),
    While(WhileStmt),
    Typecase(TypecaseStmt),
}

impl Stmt {
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Assignment(stmt) => &stmt.span,
            Stmt::Expression(stmt) => &stmt.span,
            Stmt::Return(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::While(stmt) => &stmt.span,
            Stmt::Typecase(stmt) => &stmt.span,
        }
    }
}

/// Expressions
#[derive(Debug, Clone)]
pub enum Expr {
    Number(NumberExpr),
    String(StringExpr),
    Boolean(BooleanExpr),
    Nothing(NothingExpr),
    Symbol(SymbolExpr),
    Field(FieldExpr),
    Call(CallExpr),
    New(NewExpr),
    Logical(LogicalExpr),
    Not(NotExpr),
}

impl Expr {
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Number(expr) => &expr.span,
            Expr::String(expr) => &expr.span,
            Expr::Boolean(expr) => &expr.span,
            Expr::Nothing(expr) => &expr.span,
            Expr::Symbol(expr) => &expr.span,
            Expr::Field(expr) => &expr.span,
            Expr::Call(expr) => &expr.span,
            Expr::New(expr) => &expr.span,
            Expr::Logical(expr) => &expr.span,
            Expr::Not(expr) => &expr.span,
        }
    }

    /// Converts an expression into an assignment target, if it is one.
    pub fn into_lexpr(self) -> Option<LExpr> {
        match self {
            Expr::Symbol(symbol) => Some(LExpr::Variable(symbol)),
            Expr::Field(field) => Some(LExpr::Field(field)),
            _ => None,
        }
    }
}

/// Assignable locations: a plain variable or a field of some object.
#[derive(Debug, Clone)]
pub enum LExpr {
    Variable(SymbolExpr),
    Field(FieldExpr),
}

impl LExpr {
    pub fn get_span(&self) -> &Span {
        match self {
            LExpr::Variable(symbol) => &symbol.span,
            LExpr::Field(field) => &field.span,
        }
    }
}
