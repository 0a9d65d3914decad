//! Euclidean norms over flat field data.

// External dependencies
use num_traits::Float;

/// Euclidean (L2) norm of all values: `sqrt(sum(v^2))`.
pub fn l2_norm<T: Float>(values: &[T]) -> T {
    values
        .iter()
        .fold(T::zero(), |acc, &v| acc + v * v)
        .sqrt()
}

/// Euclidean norm of the element-wise difference `a - b`.
///
/// Both slices must have the same length; extra elements of the longer slice
/// are ignored.
pub fn l2_norm_of_difference<T: Float>(a: &[T], b: &[T]) -> T {
    a.iter()
        .zip(b)
        .fold(T::zero(), |acc, (&x, &y)| {
            let d = x - y;
            acc + d * d
        })
        .sqrt()
}
