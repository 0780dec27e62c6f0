//! Discrete Laplace operators.
//!
//! Two discretizations of the Laplacian at a vertex `v` with one-ring
//! neighbors `n`:
//!
//! - uniform: `Σ (p_n - p_v)`
//! - cotangent: `Σ w_e (p_n - p_v)`, with `w_e = ½ (cot α + cot β)` from the
//!   two angles opposite edge `e`
//!
//! Neither is divided by a vertex area, so magnitudes are only comparable
//! within one mesh.
//!
//! # Example
//!
//! ```
//! use dgview::prelude::*;
//! use dgview::algo::laplacian::{cotangent_laplacian, edge_weights};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let mesh: HalfEdgeMesh = build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap();
//!
//! let weights = edge_weights(&mesh);
//! let lap = cotangent_laplacian(&mesh, VertexId::new(0), &weights);
//! assert!(lap.z.abs() < 1e-12);
//! ```

use nalgebra::Vector3;

use super::{clamped_angle, collect_property};
use crate::mesh::{EdgeId, EdgeProperty, HalfEdgeId, HalfEdgeMesh, MeshIndex, VertexId};

/// Cotangent of the angle opposite a half-edge in its face.
///
/// For a half-edge `v1 -> v2` whose face closes with `v3`, this is
/// `cot ∠(v2 - v3, v1 - v3)`. Boundary half-edges have no opposite corner
/// and contribute 0.
pub fn halfedge_cotangent<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, he: HalfEdgeId<I>) -> f64 {
    if mesh.is_boundary_halfedge(he) {
        return 0.0;
    }

    let he2 = mesh.next(he);
    let he3 = mesh.next(he2);
    let p1 = mesh.position(mesh.origin(he));
    let p2 = mesh.position(mesh.origin(he2));
    let p3 = mesh.position(mesh.origin(he3));

    let angle = clamped_angle(&(p2 - p3), &(p1 - p3));
    1.0 / angle.tan()
}

/// Cotangent weight of the edge carrying `he`.
///
/// `max(0, ½ (cot α + cot β))` over the half-edge and its twin. Obtuse
/// configurations that would give a negative weight are clamped to zero.
/// The result does not depend on which of the two half-edges is passed.
pub fn cotangent_weight<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, he: HalfEdgeId<I>) -> f64 {
    let w1 = halfedge_cotangent(mesh, he);
    let w2 = halfedge_cotangent(mesh, mesh.twin(he));
    (0.5 * (w1 + w2)).max(0.0)
}

/// Cotangent weight of an edge, evaluated from its primary half-edge.
#[inline]
pub fn edge_weight<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, e: EdgeId<I>) -> f64 {
    cotangent_weight(mesh, mesh.edge(e).halfedge)
}

/// Cotangent weights of all edges.
pub fn edge_weights<I: MeshIndex>(mesh: &HalfEdgeMesh<I>) -> EdgeProperty<f64, I> {
    edge_weights_impl(mesh, false)
}

/// Cotangent weights of all edges, computed on the rayon thread pool.
pub fn edge_weights_parallel<I: MeshIndex>(mesh: &HalfEdgeMesh<I>) -> EdgeProperty<f64, I> {
    edge_weights_impl(mesh, true)
}

pub(crate) fn edge_weights_impl<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    parallel: bool,
) -> EdgeProperty<f64, I> {
    collect_property(mesh.num_edges(), parallel, |e| edge_weight(mesh, e))
}

/// Uniform Laplacian at a vertex: the unweighted sum of one-ring edge vectors.
///
/// Zero for an isolated vertex.
pub fn uniform_laplacian<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, v: VertexId<I>) -> Vector3<f64> {
    let p = mesh.position(v);
    mesh.vertex_neighbors(v)
        .fold(Vector3::zeros(), |acc, n| acc + (mesh.position(n) - p))
}

/// Cotangent Laplacian at a vertex, using precomputed edge weights.
///
/// Zero for an isolated vertex.
pub fn cotangent_laplacian<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    v: VertexId<I>,
    weights: &EdgeProperty<f64, I>,
) -> Vector3<f64> {
    let p = mesh.position(v);
    mesh.vertex_halfedges(v).fold(Vector3::zeros(), |acc, he| {
        let w = weights[mesh.edge_of(he)];
        acc + w * (mesh.position(mesh.dest(he)) - p)
    })
}
