//! Initial-point coercion and shape checks.
//!
//! Every run starts by turning the caller's initial point into a column
//! vector whose length fixes the problem dimension n. Scalars become 1-vectors,
//! sequences keep their element order.

use crate::core::{
    error::{ObjectiveError, Result},
    types::{DMatrix, DVector, Scalar},
};

/// Conversion of a caller-supplied initial point into an iterate.
pub trait IntoPoint<T: Scalar> {
    /// Converts `self` into a column vector with n >= 1 entries.
    fn into_point(self) -> Result<DVector<T>>;
}

fn non_empty<T: Scalar>(point: DVector<T>) -> Result<DVector<T>> {
    if point.is_empty() {
        return Err(ObjectiveError::invalid_point(
            "initial point must have at least one coordinate",
        ));
    }
    Ok(point)
}

impl<T: Scalar> IntoPoint<T> for T {
    fn into_point(self) -> Result<DVector<T>> {
        Ok(DVector::from_element(1, self))
    }
}

impl<T: Scalar> IntoPoint<T> for DVector<T> {
    fn into_point(self) -> Result<DVector<T>> {
        non_empty(self)
    }
}

impl<T: Scalar> IntoPoint<T> for &DVector<T> {
    fn into_point(self) -> Result<DVector<T>> {
        non_empty(self.clone())
    }
}

impl<T: Scalar> IntoPoint<T> for Vec<T> {
    fn into_point(self) -> Result<DVector<T>> {
        non_empty(DVector::from_vec(self))
    }
}

impl<T: Scalar> IntoPoint<T> for &[T] {
    fn into_point(self) -> Result<DVector<T>> {
        non_empty(DVector::from_column_slice(self))
    }
}

impl<T: Scalar, const N: usize> IntoPoint<T> for [T; N] {
    fn into_point(self) -> Result<DVector<T>> {
        non_empty(DVector::from_column_slice(&self))
    }
}

/// Fails unless `gradient` has exactly `n` entries.
pub fn ensure_gradient_shape<T: Scalar>(n: usize, gradient: &DVector<T>) -> Result<()> {
    if gradient.len() != n {
        return Err(ObjectiveError::dimension_mismatch(
            format!("gradient of length {n}"),
            format!("length {}", gradient.len()),
        ));
    }
    Ok(())
}

/// Fails unless `hessian` is `n x n`.
pub fn ensure_hessian_shape<T: Scalar>(n: usize, hessian: &DMatrix<T>) -> Result<()> {
    if hessian.shape() != (n, n) {
        return Err(ObjectiveError::dimension_mismatch(
            format!("Hessian of shape ({n}, {n})"),
            format!("{:?}", hessian.shape()),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_becomes_column_vector() {
        let w = 5.0_f64.into_point().unwrap();
        assert_eq!(w.shape(), (1, 1));
        assert_eq!(w[0], 5.0);
    }

    #[test]
    fn test_sequences_keep_order() {
        let from_vec: DVector<f64> = vec![1.0, -2.0, 3.5].into_point().unwrap();
        let from_array: DVector<f64> = [1.0, -2.0, 3.5].into_point().unwrap();
        let from_slice: DVector<f64> = (&[1.0, -2.0, 3.5][..]).into_point().unwrap();

        assert_eq!(from_vec, from_array);
        assert_eq!(from_vec, from_slice);
        assert_eq!(from_vec.shape(), (3, 1));
        assert_eq!(from_vec[1], -2.0);
    }

    #[test]
    fn test_empty_point_is_rejected() {
        let err = IntoPoint::<f64>::into_point(Vec::<f64>::new()).unwrap_err();
        assert!(matches!(err, ObjectiveError::InvalidPoint { .. }));
    }

    #[test]
    fn test_shape_checks() {
        let gradient = DVector::<f64>::zeros(2);
        assert!(ensure_gradient_shape(2, &gradient).is_ok());
        assert!(matches!(
            ensure_gradient_shape(3, &gradient),
            Err(ObjectiveError::DimensionMismatch { .. })
        ));

        let hessian = DMatrix::<f64>::zeros(2, 3);
        assert!(ensure_hessian_shape(2, &hessian).is_err());
        assert!(ensure_hessian_shape(2, &DMatrix::<f64>::zeros(2, 2)).is_ok());
    }
}
