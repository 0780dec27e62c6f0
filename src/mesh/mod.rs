//! Core mesh data structures.
//!
//! The primary type is [`HalfEdgeMesh`], a triangle mesh stored as flat
//! arrays of vertices, half-edges, edges and faces that refer to each other
//! through typed handles. Per-element data computed from a mesh lives in
//! [`Property`] arrays indexed by the same handles.
//!
//! # Index Types
//!
//! - [`VertexId`] - Identifies a vertex
//! - [`HalfEdgeId`] - Identifies a half-edge
//! - [`EdgeId`] - Identifies an undirected edge
//! - [`FaceId`] - Identifies a face
//!
//! All are generic over the underlying integer type ([`MeshIndex`]), `u32`
//! by default.
//!
//! # Construction
//!
//! ```
//! use dgview::mesh::{HalfEdgeMesh, build_from_triangles};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let faces = vec![[0, 1, 2]];
//!
//! let mesh: HalfEdgeMesh = build_from_triangles(&vertices, &faces).unwrap();
//! assert!(mesh.is_valid());
//! ```

mod builder;
mod halfedge;
mod index;
mod property;

pub use builder::{build_from_triangles, to_face_vertex};
pub use halfedge::{
    Edge, Face, FaceHalfEdgeIter, HalfEdge, HalfEdgeMesh, Vertex, VertexHalfEdgeIter,
};
pub use index::{EdgeId, FaceId, HalfEdgeId, Handle, MeshIndex, VertexId};
pub use property::{EdgeProperty, FaceProperty, Property, VertexProperty};
