use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_kind(&self) -> ErrorKind {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::NumberParseError { .. } => ErrorKind::Syntax,
            ErrorImpl::ClassRedefinition { .. }
            | ErrorImpl::ExtendsBuiltin { .. }
            | ErrorImpl::UndefinedClass { .. }
            | ErrorImpl::InheritanceCycle { .. } => ErrorKind::Hierarchy,
            ErrorImpl::NameConflict { .. }
            | ErrorImpl::MethodFieldConflict { .. }
            | ErrorImpl::MethodAlreadyDeclared { .. } => ErrorKind::NameConflict,
            ErrorImpl::UnknownType { .. }
            | ErrorImpl::VariableNotDeclared { .. }
            | ErrorImpl::MethodNotFound { .. } => ErrorKind::Resolution,
            ErrorImpl::ReturnTypeConflict { .. }
            | ErrorImpl::MixedReturn { .. }
            | ErrorImpl::MissingReturnValue { .. }
            | ErrorImpl::FieldOverrideMismatch { .. } => ErrorKind::TypeConflict,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::ClassRedefinition { .. } => "ClassRedefinition",
            ErrorImpl::ExtendsBuiltin { .. } => "ExtendsBuiltin",
            ErrorImpl::UndefinedClass { .. } => "UndefinedClass",
            ErrorImpl::InheritanceCycle { .. } => "InheritanceCycle",
            ErrorImpl::NameConflict { .. } => "NameConflict",
            ErrorImpl::MethodFieldConflict { .. } => "MethodFieldConflict",
            ErrorImpl::MethodAlreadyDeclared { .. } => "MethodAlreadyDeclared",
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::MethodNotFound { .. } => "MethodNotFound",
            ErrorImpl::ReturnTypeConflict { .. } => "ReturnTypeConflict",
            ErrorImpl::MixedReturn { .. } => "MixedReturn",
            ErrorImpl::MissingReturnValue { .. } => "MissingReturnValue",
            ErrorImpl::FieldOverrideMismatch { .. } => "FieldOverrideMismatch",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::ClassRedefinition { class } => {
                ErrorTip::Suggestion(format!("Class `{}` is already defined", class))
            }
            ErrorImpl::ExtendsBuiltin { class, superclass } => ErrorTip::Suggestion(format!(
                "Class `{}` cannot extend built-in class `{}`",
                class, superclass
            )),
            ErrorImpl::UndefinedClass { class } => {
                ErrorTip::Suggestion(format!("Class `{}` is extended but never defined", class))
            }
            ErrorImpl::InheritanceCycle { class } => ErrorTip::Suggestion(format!(
                "The class hierarchy contains a cycle involving `{}`",
                class
            )),
            ErrorImpl::NameConflict { name, role } => ErrorTip::Suggestion(format!(
                "`{}` names a class and cannot also name a {}",
                name, role
            )),
            ErrorImpl::MethodFieldConflict { class, name } => ErrorTip::Suggestion(format!(
                "`{}` is both a method and a field of class `{}`",
                name, class
            )),
            ErrorImpl::MethodAlreadyDeclared { class, method } => ErrorTip::Suggestion(format!(
                "Method `{}.{}` is declared twice with the same parameter types",
                class, method
            )),
            ErrorImpl::UnknownType { type_ } => {
                ErrorTip::Suggestion(format!("Unknown type `{}` found", type_))
            }
            ErrorImpl::VariableNotDeclared { variable } => ErrorTip::Suggestion(format!(
                "Variable `{}` is not declared on every path to this use",
                variable
            )),
            ErrorImpl::MethodNotFound {
                class,
                method,
                arguments,
            } => ErrorTip::Suggestion(format!(
                "Class `{}` has no method `{}({})`",
                class, method, arguments
            )),
            ErrorImpl::ReturnTypeConflict {
                method,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "Method `{}` returns both `{}` and `{}`",
                method, expected, received
            )),
            ErrorImpl::MixedReturn { method } => ErrorTip::Suggestion(format!(
                "Method `{}` mixes `return;` with returning a value",
                method
            )),
            ErrorImpl::MissingReturnValue { method, expected } => ErrorTip::Suggestion(format!(
                "Method `{}` is declared to return `{}` but never returns a value",
                method, expected
            )),
            ErrorImpl::FieldOverrideMismatch {
                class,
                field,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "Field `{}.{}` has type `{}`, which is not a subtype of inherited `{}`",
                class, field, received, expected
            )),
        }
    }
}

/// Coarse classification of an error, one per analysis concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Hierarchy,
    NameConflict,
    Resolution,
    TypeConflict,
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("redefinition of class {class:?}")]
    ClassRedefinition { class: String },
    #[error("class {class:?} cannot extend {superclass:?}")]
    ExtendsBuiltin { class: String, superclass: String },
    #[error("class {class:?} was not defined")]
    UndefinedClass { class: String },
    #[error("class hierarchy contains a cycle involving class {class:?}")]
    InheritanceCycle { class: String },
    #[error("{name:?} is used both as a class and as a {role}")]
    NameConflict { name: String, role: String },
    #[error("{name:?} is both a method and a field of class {class:?}")]
    MethodFieldConflict { class: String, name: String },
    #[error("method {class}.{method} already declared")]
    MethodAlreadyDeclared { class: String, method: String },
    #[error("unknown type {type_} found")]
    UnknownType { type_: String },
    #[error("variable {variable:?} not declared")]
    VariableNotDeclared { variable: String },
    #[error("no method {method}({arguments}) in class {class:?}")]
    MethodNotFound {
        class: String,
        method: String,
        arguments: String,
    },
    #[error("return types of {method:?} do not match: {expected:?} and {received:?}")]
    ReturnTypeConflict {
        method: String,
        expected: String,
        received: String,
    },
    #[error("method {method:?} returns both nothing and a value")]
    MixedReturn { method: String },
    #[error("method {method:?} is annotated {expected:?} but returns no value")]
    MissingReturnValue { method: String, expected: String },
    #[error("field {class}.{field} has type {received:?}, incompatible with inherited {expected:?}")]
    FieldOverrideMismatch {
        class: String,
        field: String,
        expected: String,
        received: String,
    },
}
