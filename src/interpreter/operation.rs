/// Operation descriptors.
///
/// Defines `Operation`, the `Handler` type, per-argument `Parameter`
/// constraints, printing `Syntax` and `Precedence`, and `Attributes`.
pub mod core;

/// Operation registry.
///
/// Name-indexed overload sets with replace-on-redefine semantics,
/// first-match resolution and the keyword table.
pub mod registry;
