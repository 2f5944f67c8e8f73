/// Installation of every built-in operation and the keyword table.
pub mod core;
/// Arithmetic operations and their identity rules.
///
/// `+` and `*` are commutative; `-` is forward commutative. Integer results
/// stay exact and overflow into big integers.
pub mod arithmetic;
/// Ordering and equality comparisons.
pub mod comparison;
/// Boolean connectives with short-circuit identities.
pub mod logic;
/// Definitions, control flow, repetition, randomness and reductions.
pub mod meta;
