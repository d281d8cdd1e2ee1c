/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: the program, class and method nodes plus the closed statement/expression enums
/// - expressions: Definitions for the expression node payloads
/// - statements: Definitions for the statement node payloads
/// - types: type annotations as written in the source
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
