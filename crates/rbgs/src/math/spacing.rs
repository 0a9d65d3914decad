//! Grid spacing defaults.

// External dependencies
use num_traits::Float;

/// Default spacing `1 / extent_along_axis_0`.
///
/// Returns `None` for rank-0 shapes or a zero leading extent.
pub fn default_spacing<T: Float>(shape: &[usize]) -> Option<T> {
    let extent = *shape.first()?;
    if extent == 0 {
        return None;
    }
    T::from(extent).map(|n| T::one() / n)
}

/// Use the explicit spacing when given, otherwise the default.
pub fn resolve_spacing<T: Float>(h: Option<T>, shape: &[usize]) -> Option<T> {
    h.or_else(|| default_spacing(shape))
}
