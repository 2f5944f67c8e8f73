use thiserror::Error;

use crate::{interpreter::operation::core::Parameter, node::core::Kind};

/// Represents all errors that can occur while simplifying a node.
///
/// Resolution failure is never an error: an application with no matching
/// definition is simply left in place. Every variant here is raised by a
/// handler, by an environment lookup or by the depth guard, and aborts the
/// current `simplify` call chain unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// A handler required a node of a different kind.
    #[error("Type mismatch: expected {expected}, but found {found}.")]
    TypeMismatch {
        /// The kind the handler asked for.
        expected: Parameter,
        /// The kind that was actually supplied.
        found:    Kind,
    },
    /// An operation needed a bound value for a symbol that has none.
    #[error("Undefined variable '{name}'.")]
    UndefinedVariable {
        /// The name of the symbol.
        name: String,
    },
    /// Two collections that must agree in length do not.
    #[error("Dimension mismatch: {left} and {right}.")]
    DimensionMismatch {
        /// Length of the left operand.
        left:  usize,
        /// Length of the right operand.
        right: usize,
    },
    /// Tried to access a sequence or pair element outside the allowed bounds.
    #[error("Index out of bounds. Length is {len}, but found index {index}.")]
    IndexOutOfBounds {
        /// Number of elements in the collection.
        len:   usize,
        /// The index that was actually requested.
        index: i64,
    },
    /// A numeric argument lies outside the domain of the operation.
    #[error("Domain error: {value} is not within [{lower}, {upper}].")]
    DomainError {
        /// The offending value.
        value: f64,
        /// Inclusive lower bound.
        lower: f64,
        /// Inclusive upper bound.
        upper: f64,
    },
    /// A lower bound is greater than its upper bound.
    #[error("Invalid range: lower bound {lower} exceeds upper bound {upper}.")]
    InvalidRange {
        /// The lower bound.
        lower: f64,
        /// The upper bound.
        upper: f64,
    },
    /// A syntax keyword with the same spelling already exists.
    #[error("Duplicate definition of keyword '{keyword}'.")]
    DuplicateDefinition {
        /// The colliding keyword.
        keyword: String,
    },
    /// Attempted division by zero.
    #[error("Division by zero.")]
    DivisionByZero,
    /// A `define` call had a malformed head or parameter list.
    #[error("Invalid definition: {details}.")]
    InvalidDefinition {
        /// Details about why the definition was rejected.
        details: String,
    },
    /// An argument was invalid for reasons other than its kind.
    #[error("Invalid argument: {details}.")]
    InvalidArgument {
        /// Details about why the argument is invalid.
        details: String,
    },
    /// Simplification nested deeper than the configured limit.
    #[error("Recursion limit of {depth} nested simplifications exceeded.")]
    RecursionLimit {
        /// The limit that was hit.
        depth: usize,
    },
}
