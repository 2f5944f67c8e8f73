/// The environment module holds all mutable evaluation state.
///
/// Variable bindings and the operation registry live together in one scope,
/// which is saved and restored as a unit so a batch of statements can run
/// as a transaction.
///
/// # Responsibilities
/// - Stores variable bindings and dynamically defined operations.
/// - Provides `save`, `restore`, `commit` and `restore_to_base`.
/// - Hands out collision-free identifiers for alpha-renaming.
pub mod environment;
/// The evaluator module rewrites nodes into canonical form.
///
/// The evaluator walks the tree, dispatches every application through the
/// registry, folds what can be folded and rebuilds commutative applications
/// in flattened, sorted form. It is the core execution engine of the crate.
///
/// # Responsibilities
/// - Simplifies nodes toward a fixed point.
/// - Implements the built-in operations and user definitions.
/// - Propagates handler errors such as division by zero unchanged.
pub mod evaluator;
/// The operation module defines signature-typed operations and their
/// registry.
///
/// # Responsibilities
/// - Declares `Operation`, its parameters, syntax, precedence and attributes.
/// - Resolves calls by first match in registration order, falling back to a
///   universal signature.
/// - Stores syntax keywords.
pub mod operation;
/// The printer module renders nodes with operator syntax.
///
/// Rendering only reads the registry; it never influences simplification.
pub mod printer;
/// The program module runs an ordered list of statements as one unit.
///
/// # Responsibilities
/// - Applies scope and retention policies around a run.
/// - Records a log entry per statement.
/// - Collects the text of `print` and `println` sinks.
pub mod program;
