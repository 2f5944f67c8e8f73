//! # kelvin
//!
//! kelvin is the evaluation core of a symbolic computation language written
//! in Rust. It rewrites expression trees into equivalent, simpler canonical
//! forms by resolving named operations against type-checked argument
//! signatures, canonicalizing commutative applications and tracking
//! variable and operation definitions in a checkpointable environment.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    interpreter::{
        environment::Environment,
        evaluator::core::EvalResult,
        program::{Configuration, Output, Program},
    },
    node::core::Node,
};

/// Provides unified error types for evaluation.
///
/// This module defines all errors that can be raised while simplifying an
/// expression tree. It standardizes error reporting and carries structured
/// details about every failure.
///
/// # Responsibilities
/// - Defines the `RuntimeError` enum for all failure modes.
/// - Carries the offending values, bounds and names for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates simplification.
///
/// This module ties together the environment, the operation registry, the
/// rewrite engine, the printer and the program driver.
///
/// # Responsibilities
/// - Coordinates registry dispatch and canonical construction.
/// - Provides entry points for simplifying single nodes and whole programs.
/// - Manages definitions and their transactional lifetime.
pub mod interpreter;
/// Defines the expression tree.
///
/// This module declares the `Node` enum, its numeric payload and the
/// canonical order of nodes.
pub mod node;
/// Stock operation providers.
///
/// Lists, statistics and vectors. Each provider installs its operations
/// through the ordinary registration API and is installed into every
/// `Environment::new()`.
pub mod provider;
/// General utilities for safe numeric conversion.
///
/// # Responsibilities
/// - Safely convert between `i64`, `u32` and `usize` without silent data
///   loss.
/// - Provide general utility functions used in multiple modules.
pub mod util;

/// Runs `statements` as one program in a fresh environment.
///
/// Every statement is simplified in order with the default configuration.
///
/// # Errors
/// Returns the first error raised by a statement.
///
/// # Examples
/// ```
/// use kelvin::{evaluate, node::core::Node};
///
/// let square = Node::app("define", vec![
///     Node::app("sq", vec![Node::sym("x")]),
///     Node::app("^", vec![Node::sym("x"), 2.into()]),
/// ]);
/// let call = Node::app("sq", vec![7.into()]);
///
/// let output = evaluate(vec![square, call]).unwrap();
/// assert_eq!(output.logs[1].output, Node::from(49));
///
/// // Division by zero aborts the program.
/// assert!(evaluate(vec![Node::app("/", vec![1.into(), 0.into()])]).is_err());
/// ```
pub fn evaluate(statements: Vec<Node>) -> EvalResult<Output> {
    let mut env = Environment::new();
    Program::new(statements, Configuration::default()).run(&mut env)
}
