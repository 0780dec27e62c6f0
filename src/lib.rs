//! # dgview
//!
//! Discrete differential geometry on triangle meshes, and the color coding
//! needed to look at it.
//!
//! dgview estimates per-element quantities on a half-edge mesh and maps them
//! to colors for display:
//!
//! - **Laplacians**: uniform and cotangent-weighted, per vertex
//! - **Curvature**: mean curvature from either Laplacian, angle-deficit
//!   Gaussian curvature
//! - **Triangle quality**: circumradius to shortest edge ratio, per face
//! - **Presentation**: a five-stop color ramp with robust range selection,
//!   draw modes, and a reflection-line texture
//!
//! All estimators are total. Degenerate geometry yields substitute values
//! (clamped angles, zeroed weights, a finite sentinel shape) so a mesh can
//! always be drawn.
//!
//! ## Quick Start
//!
//! ```no_run
//! use dgview::prelude::*;
//!
//! let mesh: HalfEdgeMesh = dgview::io::load("bunny.ply").unwrap();
//! let mut presenter = ScalarFieldPresenter::load(mesh, PresenterOptions::default());
//!
//! if let Some(buffer) = presenter.select(DrawMode::GaussianCurvature) {
//!     println!("{} vertex colors over {:?}", buffer.len(), buffer.range);
//! }
//! ```
//!
//! ## Estimating Fields Directly
//!
//! ```
//! use dgview::prelude::*;
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//!     Point3::new(0.5, 0.5, 1.0),
//! ];
//!
//! let faces = vec![
//!     [0, 2, 1], // bottom
//!     [0, 1, 3], // front
//!     [1, 2, 3], // right
//!     [2, 0, 3], // left
//! ];
//!
//! let mesh: HalfEdgeMesh = build_from_triangles(&vertices, &faces).unwrap();
//! let fields = estimate(&mesh, &EstimateOptions::default());
//!
//! // Gauss-Bonnet: a closed genus-0 surface has total curvature 4π.
//! let chi = mesh.euler_characteristic() as f64;
//! let total = fields.total_gaussian_curvature();
//! assert!((total - 2.0 * std::f64::consts::PI * chi).abs() < 1e-9);
//!
//! let color = value_to_color(fields.shape()[FaceId::new(0)], 0.6, 2.0);
//! println!("face 0 is drawn as {:?}", color);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod io;
pub mod mesh;
pub mod visual;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use dgview::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::{estimate, DifferentialFields, EstimateOptions};
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        build_from_triangles, to_face_vertex, EdgeId, EdgeProperty, FaceId, FaceProperty,
        HalfEdgeId, HalfEdgeMesh, MeshIndex, VertexId, VertexProperty,
    };
    pub use crate::visual::{
        value_to_color, ColorBuffer, DrawMode, PresenterOptions, Rgb, ScalarFieldPresenter,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;
