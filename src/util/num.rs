use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Safely converts an `i64` to `u32`.
///
/// ## Errors
/// Returns `DomainError` for negative values or values above `u32::MAX`.
///
/// ## Example
/// ```
/// use kelvin::util::num::i64_to_u32_checked;
///
/// assert_eq!(i64_to_u32_checked(45).unwrap(), 45);
/// assert!(i64_to_u32_checked(-1).is_err());
/// assert!(i64_to_u32_checked(i64::MAX).is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_u32_checked(value: i64) -> EvalResult<u32> {
    u32::try_from(value).map_err(|_| RuntimeError::DomainError { value: value as f64,
                                                                 lower: 0.0,
                                                                 upper: f64::from(u32::MAX), })
}

/// Converts an `i64` index into a `usize` position inside a collection of
/// length `len`.
///
/// ## Errors
/// Returns `IndexOutOfBounds` if the index is negative or not below `len`.
///
/// ## Example
/// ```
/// use kelvin::{error::RuntimeError, util::num::index_checked};
///
/// assert_eq!(index_checked(2, 3).unwrap(), 2);
///
/// let err = index_checked(3, 3).unwrap_err();
/// assert!(matches!(err, RuntimeError::IndexOutOfBounds { len: 3, index: 3 }));
/// ```
pub fn index_checked(index: i64, len: usize) -> EvalResult<usize> {
    usize::try_from(index).ok()
                          .filter(|i| *i < len)
                          .ok_or(RuntimeError::IndexOutOfBounds { len, index })
}

/// Converts a collection length to the `i64` payload of a number node.
///
/// ## Errors
/// Returns `InvalidArgument` on the (theoretical) overflow of `i64`.
pub fn usize_to_i64_checked(value: usize) -> EvalResult<i64> {
    i64::try_from(value).map_err(|_| RuntimeError::InvalidArgument { details: format!("length {value} does not fit in an integer") })
}
