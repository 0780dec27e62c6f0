//! Discrete curvature estimation.
//!
//! # Curvature Types
//!
//! - **Uniform mean curvature**: `½ |L_u(v)|` with the uniform Laplacian
//! - **Mean curvature**: `½ |L_c(v)|` with the cotangent Laplacian
//! - **Gaussian curvature**: the angle deficit `2π - Σθ` over the corners
//!   incident to a vertex
//!
//! None of these is divided by a vertex area. Mean curvature values rank
//! vertices within one mesh; the angle deficit is the integrated Gaussian
//! curvature, so summing it over a closed mesh gives `2π χ` (Gauss-Bonnet).
//!
//! # Example
//!
//! ```
//! use dgview::prelude::*;
//! use dgview::algo::curvature::{compute_curvature, total_gaussian_curvature};
//! use dgview::algo::laplacian::edge_weights;
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//!     Point3::new(0.5, 0.5, 1.0),
//! ];
//! let faces = vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]];
//! let mesh: HalfEdgeMesh = build_from_triangles(&vertices, &faces).unwrap();
//!
//! let weights = edge_weights(&mesh);
//! let curvature = compute_curvature(&mesh, &weights);
//! let total = total_gaussian_curvature(&curvature.gaussian);
//! assert!((total - 4.0 * std::f64::consts::PI).abs() < 1e-9);
//! ```

use std::f64::consts::TAU;

use super::laplacian::{cotangent_laplacian, uniform_laplacian};
use super::{clamped_angle, collect_property};
use crate::mesh::{EdgeProperty, FaceId, HalfEdgeMesh, MeshIndex, VertexId, VertexProperty};

/// Per-vertex curvature fields of one mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct CurvatureFields<I: MeshIndex = u32> {
    /// Mean curvature from the uniform Laplacian.
    pub uniform_mean: VertexProperty<f64, I>,
    /// Mean curvature from the cotangent Laplacian.
    pub mean: VertexProperty<f64, I>,
    /// Angle-deficit Gaussian curvature.
    pub gaussian: VertexProperty<f64, I>,
}

impl<I: MeshIndex> CurvatureFields<I> {
    /// Number of vertices covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.gaussian.len()
    }

    /// Check if the fields cover no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.gaussian.is_empty()
    }
}

/// Mean curvature at a vertex from the uniform Laplacian.
#[inline]
pub fn uniform_mean_curvature<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, v: VertexId<I>) -> f64 {
    0.5 * uniform_laplacian(mesh, v).norm()
}

/// Mean curvature at a vertex from the cotangent Laplacian.
#[inline]
pub fn mean_curvature<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    v: VertexId<I>,
    weights: &EdgeProperty<f64, I>,
) -> f64 {
    0.5 * cotangent_laplacian(mesh, v, weights).norm()
}

/// Interior angle of face `f` at its corner `v`, or `None` if `v` is not a
/// corner of `f`.
pub fn corner_angle<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, f: FaceId<I>, v: VertexId<I>) -> Option<f64> {
    let he = mesh.corner_halfedge(f, v)?;
    let p = mesh.position(v);
    let to_next = mesh.position(mesh.dest(he)) - p;
    let to_prev = mesh.position(mesh.origin(mesh.prev(he))) - p;
    Some(clamped_angle(&to_next, &to_prev))
}

/// Gaussian curvature at a vertex by the angle deficit `2π - Σθ`.
///
/// Independent of the edge weights. An isolated vertex has deficit `2π`.
pub fn gaussian_curvature<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, v: VertexId<I>) -> f64 {
    let angle_sum: f64 = mesh
        .vertex_faces(v)
        .filter_map(|f| corner_angle(mesh, f, v))
        .sum();
    TAU - angle_sum
}

/// Sum of a per-vertex angle-deficit field.
///
/// For a closed mesh this approximates `2π χ`.
pub fn total_gaussian_curvature<I: MeshIndex>(gaussian: &VertexProperty<f64, I>) -> f64 {
    gaussian.values().iter().sum()
}

/// Compute all three curvature fields.
///
/// `weights` must come from [`edge_weights`](super::laplacian::edge_weights)
/// on the same mesh.
pub fn compute_curvature<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    weights: &EdgeProperty<f64, I>,
) -> CurvatureFields<I> {
    compute_curvature_impl(mesh, weights, false)
}

/// Compute all three curvature fields on the rayon thread pool.
pub fn compute_curvature_parallel<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    weights: &EdgeProperty<f64, I>,
) -> CurvatureFields<I> {
    compute_curvature_impl(mesh, weights, true)
}

pub(crate) fn compute_curvature_impl<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    weights: &EdgeProperty<f64, I>,
    parallel: bool,
) -> CurvatureFields<I> {
    let n = mesh.num_vertices();
    CurvatureFields {
        uniform_mean: collect_property(n, parallel, |v| uniform_mean_curvature(mesh, v)),
        mean: collect_property(n, parallel, |v| mean_curvature(mesh, v, weights)),
        gaussian: collect_property(n, parallel, |v| gaussian_curvature(mesh, v)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::laplacian::edge_weights;
    use crate::algo::test_meshes::{flat_grid, grid_vertex, grid_with_height, icosphere, tetrahedron};
    use crate::mesh::build_from_triangles;
    use nalgebra::Point3;
    use std::f64::consts::PI;

    fn curvature_of(mesh: &HalfEdgeMesh) -> CurvatureFields {
        compute_curvature(mesh, &edge_weights(mesh))
    }

    #[test]
    fn test_icosahedron_uniform_gaussian() {
        let mesh = icosphere(0);
        let result = curvature_of(&mesh);

        // Five 60° corners meet at every vertex.
        for v in mesh.vertex_ids() {
            let k = result.gaussian[v];
            assert!((k - PI / 3.0).abs() < 1e-9, "vertex {:?}: K = {}", v, k);
        }
    }

    #[test]
    fn test_icosahedron_mean_curvature_is_uniform() {
        let mesh = icosphere(0);
        let result = curvature_of(&mesh);
        let h0 = result.mean[VertexId::new(0)];
        let u0 = result.uniform_mean[VertexId::new(0)];
        assert!(h0 > 0.0 && u0 > 0.0);

        for v in mesh.vertex_ids() {
            assert!((result.mean[v] - h0).abs() < 1e-9);
            assert!((result.uniform_mean[v] - u0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_gauss_bonnet_sphere() {
        let mesh = icosphere(2);
        let result = curvature_of(&mesh);

        let expected = TAU * mesh.euler_characteristic() as f64;
        let total = total_gaussian_curvature(&result.gaussian);
        assert!(
            (total - expected).abs() < 1e-6,
            "Gauss-Bonnet violated: got {}, expected {}",
            total,
            expected
        );

        for v in mesh.vertex_ids() {
            assert!(result.gaussian[v] > 0.0);
        }
    }

    #[test]
    fn test_gauss_bonnet_tetrahedron() {
        let mesh = tetrahedron();
        let result = curvature_of(&mesh);
        let total = total_gaussian_curvature(&result.gaussian);
        assert!((total - 4.0 * PI).abs() < 1e-9);
    }

    #[test]
    fn test_curvature_flat_plane() {
        let n = 4;
        let mesh = flat_grid(n);
        let result = curvature_of(&mesh);

        for j in 1..n {
            for i in 1..n {
                let v = VertexId::new(grid_vertex(n, i, j));
                assert!(result.gaussian[v].abs() < 1e-9, "K = {}", result.gaussian[v]);
                assert!(result.mean[v].abs() < 1e-9, "H = {}", result.mean[v]);
                assert!(result.uniform_mean[v].abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_bump_has_curvature_at_peak() {
        let n = 4;
        let mesh = grid_with_height(n, |x, y| if x == 2.0 && y == 2.0 { 0.5 } else { 0.0 });
        let result = curvature_of(&mesh);

        let peak = VertexId::new(grid_vertex(n, 2, 2));
        let flat = VertexId::new(grid_vertex(n, 1, 3));
        assert!(result.mean[peak] > result.mean[flat]);
        assert!(result.uniform_mean[peak] > result.uniform_mean[flat]);
        assert!(result.gaussian[peak] > 0.0);
    }

    #[test]
    fn test_boundary_corner_deficit() {
        let mesh = flat_grid(2);
        let result = curvature_of(&mesh);

        // Corner (0,0) has corners of 45° + 45° = 90°.
        let k = result.gaussian[VertexId::new(0)];
        assert!((k - 1.5 * PI).abs() < 1e-9);
        for v in mesh.vertex_ids() {
            assert!(result.gaussian[v].is_finite());
            assert!(result.mean[v].is_finite());
        }
    }

    #[test]
    fn test_isolated_vertex() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(5.0, 5.0, 5.0),
        ];
        let mesh: HalfEdgeMesh = build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap();
        let result = curvature_of(&mesh);

        let lonely = VertexId::new(3);
        assert_eq!(result.len(), 4);
        assert_eq!(result.gaussian[lonely], TAU);
        assert_eq!(result.mean[lonely], 0.0);
        assert_eq!(result.uniform_mean[lonely], 0.0);
    }

    #[test]
    fn test_corner_angle_outside_face() {
        let mesh = tetrahedron();
        // Face 2 is [1, 2, 3]; vertex 0 is not one of its corners.
        assert!(corner_angle(&mesh, FaceId::new(2), VertexId::new(0)).is_none());
        assert!(corner_angle(&mesh, FaceId::new(2), VertexId::new(1)).is_some());
    }

    #[test]
    fn test_corner_angles_sum_to_pi() {
        let mesh = tetrahedron();
        for f in mesh.face_ids() {
            let sum: f64 = mesh
                .face_triangle(f)
                .iter()
                .filter_map(|&v| corner_angle(&mesh, f, v))
                .sum();
            assert!((sum - PI).abs() < 1e-9);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mesh = icosphere(2);
        let weights = edge_weights(&mesh);
        assert_eq!(
            compute_curvature(&mesh, &weights),
            compute_curvature_parallel(&mesh, &weights)
        );
    }
}
