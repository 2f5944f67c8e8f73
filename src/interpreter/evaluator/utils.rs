use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult, util::num::index_checked};

/// Ensures `value` lies within `[lower, upper]`.
///
/// # Example
/// ```
/// use kelvin::interpreter::evaluator::utils::check_domain;
///
/// assert!(check_domain(0.5, 0.0, 1.0).is_ok());
/// assert!(check_domain(1.5, 0.0, 1.0).is_err());
/// ```
pub fn check_domain(value: f64, lower: f64, upper: f64) -> EvalResult<()> {
    if value.is_nan() || value < lower || value > upper {
        return Err(RuntimeError::DomainError { value, lower, upper });
    }
    Ok(())
}

/// Ensures `value` is zero or greater.
pub fn check_non_negative(value: f64) -> EvalResult<()> {
    check_domain(value, 0.0, f64::INFINITY)
}

/// Ensures `lower <= upper`.
pub fn check_range(lower: f64, upper: f64) -> EvalResult<()> {
    if lower > upper {
        return Err(RuntimeError::InvalidRange { lower, upper });
    }
    Ok(())
}

/// Converts a user supplied index into a position within `len` elements.
pub fn check_index(index: i64, len: usize) -> EvalResult<usize> {
    index_checked(index, len)
}

/// Ensures two collections have the same length.
///
/// # Example
/// ```
/// use kelvin::{error::RuntimeError, interpreter::evaluator::utils::check_dimension};
///
/// assert_eq!(check_dimension(3, 2), Err(RuntimeError::DimensionMismatch { left: 3, right: 2 }));
/// ```
pub fn check_dimension(left: usize, right: usize) -> EvalResult<()> {
    if left != right {
        return Err(RuntimeError::DimensionMismatch { left, right });
    }
    Ok(())
}
