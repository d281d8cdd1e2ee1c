//! Error types and error handling for the compiler.
//!
//! This module defines the error types used throughout the front end and
//! the semantic analysis. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for lexing, parsing and each analysis phase
//! - The error taxonomy used to classify semantic failures
//! - Helpful error messages and suggestions

pub mod errors;
