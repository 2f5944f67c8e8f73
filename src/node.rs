/// The expression tree.
///
/// Declares the closed `Node` variant every other component operates on,
/// together with its complexity metric, structural equality and the
/// type-asserting accessors handlers use to unpack their arguments.
pub mod core;
/// Numeric payloads.
///
/// Exact integers that promote to arbitrary precision on overflow, and
/// floating-point reals. Provides the arithmetic the built-in operations
/// fold literals with.
pub mod number;
/// Canonical ordering.
///
/// A deterministic total order over nodes, used to sort the arguments of
/// commutative applications.
pub mod order;
