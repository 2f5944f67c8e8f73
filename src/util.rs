/// Numeric conversion helpers.
///
/// Safe conversions between `i64`, `u32` and `usize` that never lose data
/// silently. Handlers use them to turn numeric nodes into indices,
/// repetition counts and exponents.
pub mod num;
