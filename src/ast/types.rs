//! Type annotations as they appear in the source.
//!
//! Quack has no type constructors, so every annotation is the name of a
//! class. Resolution against the class hierarchy happens in the type
//! checker.

use std::fmt::Display;

use crate::Position;

/// A class name used in type position, e.g. the `Int` in `x: Int`.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolType {
    pub name: String,
    pub position: Position,
}

impl SymbolType {
    pub fn new(name: &str, position: Position) -> Self {
        SymbolType {
            name: name.to_string(),
            position,
        }
    }

    pub fn get_position(&self) -> Position {
        self.position.clone()
    }
}

impl Display for SymbolType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
