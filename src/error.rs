/// Evaluation errors.
///
/// Contains every error that can be raised while simplifying a node:
/// kind mismatches reported by the type-asserting accessors, unbound
/// variables, bounds and domain violations raised by operation providers,
/// keyword collisions and the recursion guard of the rewrite engine.
pub mod runtime_error;

pub use runtime_error::RuntimeError;
