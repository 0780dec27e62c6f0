//! Triangle shape quality.
//!
//! The shape ratio of a triangle is its circumradius divided by its shortest
//! edge. It is scale invariant, smallest (`1/√3`) for an equilateral triangle
//! and grows without bound as a triangle becomes a needle or a cap.
//! Triangles with (near) zero area or a (near) zero-length edge get
//! [`DEGENERATE_SHAPE`].

use nalgebra::Point3;

use super::collect_property;
use crate::mesh::{FaceId, FaceProperty, HalfEdgeMesh, MeshIndex};

/// Squared magnitudes at or below this are treated as zero.
pub const DEGENERATE_THRESHOLD: f64 = f32::MIN_POSITIVE as f64;

/// Shape ratio reported for degenerate triangles.
///
/// Finite on purpose so that it sorts and color-maps like any other value.
pub const DEGENERATE_SHAPE: f64 = f64::MAX;

/// Shape ratio of the triangle `(p1, p2, p3)`.
///
/// A zero-area triangle returns [`DEGENERATE_SHAPE`] directly instead of the
/// large but edge-dependent `sqrt(f32::MAX / min_len2)`, so every collinear
/// triangle reports the same sentinel.
pub fn shape_ratio(p1: &Point3<f64>, p2: &Point3<f64>, p3: &Point3<f64>) -> f64 {
    let v0 = p1 - p2;
    let v1 = p2 - p3;
    let v2 = p1 - p3;

    let denom = 4.0 * v0.cross(&v1).norm_squared();
    let (l0, l1, l2) = (v0.norm_squared(), v1.norm_squared(), v2.norm_squared());
    let min_len2 = l0.min(l1).min(l2);

    if denom <= DEGENERATE_THRESHOLD || min_len2 <= DEGENERATE_THRESHOLD {
        return DEGENERATE_SHAPE;
    }

    // Squared circumradius.
    let rad2 = l0 * l1 * l2 / denom;
    (rad2 / min_len2).sqrt()
}

/// Check if a shape ratio is the degenerate sentinel.
#[inline]
pub fn is_degenerate_shape(ratio: f64) -> bool {
    ratio == DEGENERATE_SHAPE
}

/// Shape ratio of one face.
pub fn triangle_shape<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, f: FaceId<I>) -> f64 {
    let [p1, p2, p3] = mesh.face_positions(f);
    shape_ratio(&p1, &p2, &p3)
}

/// Shape ratios of all faces.
pub fn triangle_shapes<I: MeshIndex>(mesh: &HalfEdgeMesh<I>) -> FaceProperty<f64, I> {
    triangle_shapes_impl(mesh, false)
}

/// Shape ratios of all faces, computed on the rayon thread pool.
pub fn triangle_shapes_parallel<I: MeshIndex>(mesh: &HalfEdgeMesh<I>) -> FaceProperty<f64, I> {
    triangle_shapes_impl(mesh, true)
}

pub(crate) fn triangle_shapes_impl<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    parallel: bool,
) -> FaceProperty<f64, I> {
    collect_property(mesh.num_faces(), parallel, |f| triangle_shape(mesh, f))
}

/// Number of faces whose shape is the degenerate sentinel.
pub fn count_degenerate<I: MeshIndex>(shapes: &FaceProperty<f64, I>) -> usize {
    shapes
        .values()
        .iter()
        .filter(|&&r| is_degenerate_shape(r))
        .count()
}
