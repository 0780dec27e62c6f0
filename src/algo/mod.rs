//! Discrete differential-geometry estimators.
//!
//! - [`laplacian`]: cotangent edge weights and the uniform / cotangent
//!   Laplacian at a vertex
//! - [`curvature`]: mean curvature (both Laplacians) and angle-deficit
//!   Gaussian curvature
//! - [`quality`]: circumradius-to-shortest-edge triangle shape ratio
//! - [`fields`]: runs every estimator over a mesh and keeps the results
//!   together
//!
//! All estimators are total: degenerate geometry produces substitute values
//! instead of NaN or an error.

pub mod curvature;
pub mod fields;
pub mod laplacian;
pub mod quality;

mod progress;

#[cfg(test)]
pub(crate) mod test_meshes;

pub use fields::{estimate, estimate_with_progress, DifferentialFields, EstimateOptions};
pub use progress::Progress;

use nalgebra::Vector3;
use rayon::prelude::*;

use crate::mesh::{Handle, Property};

/// Bound applied to cosines before `acos`.
///
/// Dot products of normalized vectors are clamped to
/// `[-ACOS_CLAMP, ACOS_CLAMP]`, which keeps angles inside roughly
/// `[8.1°, 171.9°]` and away from the singular ends of `acos` and `tan`.
pub const ACOS_CLAMP: f64 = 0.99;

/// Angle between two vectors with the cosine clamped to [`ACOS_CLAMP`].
///
/// A zero-length argument has no direction; its cosine is taken as 0, which
/// gives a right angle rather than NaN.
pub fn clamped_angle(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let cos = match (a.try_normalize(0.0), b.try_normalize(0.0)) {
        (Some(a), Some(b)) => a.dot(&b),
        _ => 0.0,
    };
    cos.clamp(-ACOS_CLAMP, ACOS_CLAMP).acos()
}

/// Evaluate `f` for every element `0..len`, optionally on the rayon pool.
///
/// Element order is preserved either way, so both paths produce the same
/// property.
pub(crate) fn collect_property<H, T, F>(len: usize, parallel: bool, f: F) -> Property<H, T>
where
    H: Handle + Send + Sync,
    T: Send,
    F: Fn(H) -> T + Send + Sync,
{
    let values: Vec<T> = if parallel {
        (0..len).into_par_iter().map(|i| f(H::from_index(i))).collect()
    } else {
        (0..len).map(|i| f(H::from_index(i))).collect()
    };
    Property::from_vec(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_clamped_angle_right_angle() {
        let a = Vector3::new(1.0, 0.0, 0.0);
        let b = Vector3::new(0.0, 3.0, 0.0);
        assert!((clamped_angle(&a, &b) - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_clamped_angle_parallel_is_bounded() {
        let a = Vector3::new(1.0, 1.0, 0.0);
        let min = ACOS_CLAMP.acos();
        assert!((clamped_angle(&a, &a) - min).abs() < 1e-12);
        assert!((clamped_angle(&a, &(-a)) - (-ACOS_CLAMP).acos()).abs() < 1e-12);
    }

    #[test]
    fn test_clamped_angle_zero_vector() {
        let a = Vector3::new(1.0, 0.0, 0.0);
        let angle = clamped_angle(&a, &Vector3::zeros());
        assert!(angle.is_finite());
        assert!((angle - FRAC_PI_2).abs() < 1e-12);
    }
}
