//! Mesh construction utilities.
//!
//! Converts face-vertex lists, as found in mesh files, into a
//! [`HalfEdgeMesh`]. Element numbering depends only on the input order:
//! vertices keep their input index, face `i` owns half-edges `3i..3i+3`,
//! boundary half-edges follow in the order their interior twins appear, and
//! edges are numbered by the first half-edge that reaches them.

use std::collections::HashMap;

use nalgebra::Point3;

use super::halfedge::{Edge, Face, HalfEdge, HalfEdgeMesh};
use super::index::{EdgeId, FaceId, HalfEdgeId, MeshIndex, VertexId};
use crate::error::{MeshError, Result};

/// Build a half-edge mesh from vertices and triangle faces.
///
/// # Arguments
/// * `vertices` - Vertex positions
/// * `faces` - Triangles as `[v0, v1, v2]` indices, consistently oriented
///
/// # Errors
/// Fails on an empty face list, out-of-range or repeated vertex indices, and
/// non-manifold input (an edge used twice in the same direction, or a vertex
/// where two boundary fans meet).
///
/// # Example
/// ```
/// use dgview::mesh::{build_from_triangles, HalfEdgeMesh};
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.5, 1.0, 0.0),
/// ];
/// let faces = vec![[0, 1, 2]];
///
/// let mesh: HalfEdgeMesh = build_from_triangles(&vertices, &faces).unwrap();
/// assert_eq!(mesh.num_vertices(), 3);
/// assert_eq!(mesh.num_edges(), 3);
/// assert_eq!(mesh.num_faces(), 1);
/// ```
pub fn build_from_triangles<I: MeshIndex>(
    vertices: &[Point3<f64>],
    faces: &[[usize; 3]],
) -> Result<HalfEdgeMesh<I>> {
    if faces.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    for (fi, face) in faces.iter().enumerate() {
        if let Some(&vi) = face.iter().find(|&&vi| vi >= vertices.len()) {
            return Err(MeshError::InvalidVertexIndex { face: fi, vertex: vi });
        }
        if face[0] == face[1] || face[1] == face[2] || face[0] == face[2] {
            return Err(MeshError::DegenerateFace { face: fi });
        }
    }

    let mut mesh = HalfEdgeMesh::with_capacity(vertices.len(), faces.len());

    let vertex_ids: Vec<VertexId<I>> = vertices.iter().map(|&p| mesh.add_vertex(p)).collect();

    // Directed edge (from, to) -> interior half-edge.
    let mut directed: HashMap<(usize, usize), HalfEdgeId<I>> =
        HashMap::with_capacity(faces.len() * 3);

    // First pass: interior half-edges and faces.
    for (fi, face) in faces.iter().enumerate() {
        let face_id = FaceId::<I>::new(fi);
        let base = mesh.num_halfedges();
        let ids = [0, 1, 2].map(|k| HalfEdgeId::<I>::new(base + k));

        mesh.faces.push(Face::new(ids[0]));

        for k in 0..3 {
            let from = face[k];
            let to = face[(k + 1) % 3];

            mesh.halfedges.push(HalfEdge {
                origin: vertex_ids[from],
                next: ids[(k + 1) % 3],
                prev: ids[(k + 2) % 3],
                face: face_id,
                ..HalfEdge::new()
            });
            mesh.vertex_mut(vertex_ids[from]).halfedge = ids[k];

            if directed.insert((from, to), ids[k]).is_some() {
                return Err(MeshError::NonManifoldEdge { v0: from, v1: to });
            }
        }
    }

    // Second pass: twins and edges, in half-edge order.
    let num_interior = mesh.num_halfedges();
    for i in 0..num_interior {
        let he = HalfEdgeId::<I>::new(i);
        if mesh.halfedge(he).twin.is_valid() {
            continue;
        }

        let from = mesh.origin(he).index();
        let to = mesh.origin(mesh.next(he)).index();

        let twin = match directed.get(&(to, from)) {
            Some(&twin) => twin,
            None => {
                let boundary = HalfEdgeId::<I>::new(mesh.num_halfedges());
                mesh.halfedges.push(HalfEdge {
                    origin: vertex_ids[to],
                    ..HalfEdge::new()
                });
                boundary
            }
        };

        let edge = EdgeId::<I>::new(mesh.num_edges());
        mesh.edges.push(Edge { halfedge: he });

        mesh.halfedge_mut(he).twin = twin;
        mesh.halfedge_mut(he).edge = edge;
        mesh.halfedge_mut(twin).twin = he;
        mesh.halfedge_mut(twin).edge = edge;
    }

    link_boundary_loops(&mut mesh, num_interior)?;
    fix_boundary_vertex_halfedges(&mut mesh, num_interior);

    Ok(mesh)
}

/// Link boundary half-edges (all stored after `first_boundary`) into loops.
fn link_boundary_loops<I: MeshIndex>(
    mesh: &mut HalfEdgeMesh<I>,
    first_boundary: usize,
) -> Result<()> {
    let boundary: Vec<HalfEdgeId<I>> = (first_boundary..mesh.num_halfedges())
        .map(HalfEdgeId::new)
        .collect();

    let mut outgoing: HashMap<usize, HalfEdgeId<I>> = HashMap::with_capacity(boundary.len());
    for &he in &boundary {
        let origin = mesh.origin(he).index();
        if outgoing.insert(origin, he).is_some() {
            return Err(MeshError::NonManifold {
                details: format!("vertex {} lies on more than one boundary fan", origin),
            });
        }
    }

    for &he in &boundary {
        let dest = mesh.dest(he).index();
        if let Some(&next) = outgoing.get(&dest) {
            mesh.halfedge_mut(he).next = next;
            mesh.halfedge_mut(next).prev = he;
        }
    }

    Ok(())
}

/// Point every boundary vertex at its outgoing boundary half-edge, so that
/// walking its one-ring starts and ends on the boundary.
fn fix_boundary_vertex_halfedges<I: MeshIndex>(mesh: &mut HalfEdgeMesh<I>, first_boundary: usize) {
    for i in first_boundary..mesh.num_halfedges() {
        let he = HalfEdgeId::<I>::new(i);
        let origin = mesh.origin(he);
        mesh.vertex_mut(origin).halfedge = he;
    }
}

/// Convert a half-edge mesh back to a face-vertex representation.
pub fn to_face_vertex<I: MeshIndex>(mesh: &HalfEdgeMesh<I>) -> (Vec<Point3<f64>>, Vec<[usize; 3]>) {
    let vertices: Vec<Point3<f64>> = mesh.vertex_ids().map(|v| *mesh.position(v)).collect();

    let faces: Vec<[usize; 3]> = mesh
        .face_ids()
        .map(|f| mesh.face_triangle(f).map(|v| v.index()))
        .collect();

    (vertices, faces)
}
