/// Core simplification loop.
///
/// Defines `EvalResult`, the defer marker, the depth guard and
/// `Environment::simplify`, which drives an expression toward its canonical
/// fixed point through registry dispatch.
pub mod core;

/// Canonical construction of applications.
///
/// Flattens nested same-name children of commutative operations and sorts
/// their arguments into the deterministic node order.
pub mod canonical;

/// Pairwise regrouping of commutative applications that no definition
/// matched as a whole.
pub mod commutative;

/// Variable binding and user-defined operations.
///
/// Builds operations from templates by alpha-renaming their parameters and
/// substituting call-site arguments by position.
pub mod define;

/// Utility functions for evaluation.
///
/// Domain, range, index and dimension checks shared by handlers.
pub mod utils;

/// Built-in operations.
///
/// Arithmetic, comparison, logic and meta operations installed into every
/// base environment, together with their syntax keywords.
pub mod function;
