//! Linear-algebra helpers shared by the optimizers.

use gradlab_core::{
    error::{ObjectiveError, Result},
    types::{DMatrix, DVector, Scalar},
};
use num_traits::Float;

/// Iteration cap handed to the SVD; a non-converging decomposition is
/// reported as a numerical error.
const SVD_MAX_ITERATIONS: usize = 1000;

/// Moore–Penrose pseudo-inverse via SVD.
///
/// Singular values at or below `T::PINV_RCOND * sigma_max` are treated as
/// zero, so a singular matrix yields the least-norm generalized inverse
/// instead of an error.
///
/// # Errors
///
/// `NumericalError` if the matrix has non-finite entries or the SVD does not
/// converge.
pub fn pseudo_inverse<T>(matrix: DMatrix<T>) -> Result<DMatrix<T>>
where
    T: Scalar,
{
    if matrix.iter().any(|x| !Float::is_finite(*x)) {
        return Err(ObjectiveError::numerical_error(
            "cannot pseudo-invert a matrix with non-finite entries",
        ));
    }

    let svd = matrix
        .try_svd(true, true, T::EPSILON, SVD_MAX_ITERATIONS)
        .ok_or_else(|| ObjectiveError::numerical_error("SVD did not converge"))?;

    let sigma_max = svd
        .singular_values
        .iter()
        .fold(T::zero(), |acc, &s| <T as Float>::max(acc, s));
    let cutoff = T::PINV_RCOND * sigma_max;

    svd.pseudo_inverse(cutoff)
        .map_err(ObjectiveError::numerical_error)
}

/// Least-norm solution of `matrix · x = rhs` through the pseudo-inverse.
pub fn pseudo_inverse_solve<T>(matrix: DMatrix<T>, rhs: &DVector<T>) -> Result<DVector<T>>
where
    T: Scalar,
{
    Ok(pseudo_inverse(matrix)? * rhs)
}
