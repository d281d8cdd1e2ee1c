//! Semantic analysis module.
//!
//! This module validates a parsed `Program` and infers a type for every
//! field, parameter, local and method return value:
//!
//! - Building the class hierarchy and rejecting redefinitions, undefined
//!   superclasses and inheritance cycles
//! - Computing the nearest-common-ancestor join of every pair of classes
//! - Running the inference fixed point over all classes, methods and
//!   top-level statements, with flow-sensitive declaration checks
//! - Validating field overrides against inherited field types
//!
//! Every phase returns a `Result` and the first error stops the analysis.

pub mod builtins;
pub mod hierarchy;
pub mod inference;
pub mod join;
pub mod overrides;
pub mod report;
pub mod symbols;
pub mod type_checker;
