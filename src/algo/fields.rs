//! Whole-mesh estimation.
//!
//! [`estimate`] runs every estimator over a mesh in a fixed order and keeps
//! the results together in [`DifferentialFields`]:
//!
//! 1. cotangent edge weights
//! 2. curvature (uniform mean, cotangent mean, Gaussian), which reads the
//!    weights
//! 3. triangle shape
//!
//! Each pass covers the whole mesh and finishes before the next one starts.
//!
//! # Example
//!
//! ```
//! use dgview::prelude::*;
//! use dgview::algo::{estimate, EstimateOptions};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let mesh: HalfEdgeMesh = build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap();
//!
//! let fields = estimate(&mesh, &EstimateOptions::default());
//! assert_eq!(fields.gaussian().len(), 3);
//! assert_eq!(fields.shape().len(), 1);
//! ```

use super::curvature::{compute_curvature_impl, total_gaussian_curvature, CurvatureFields};
use super::laplacian::edge_weights_impl;
use super::progress::Progress;
use super::quality::{count_degenerate, triangle_shapes_impl};
use crate::mesh::{EdgeProperty, FaceProperty, HalfEdgeMesh, MeshIndex, VertexProperty};

const PASSES: usize = 3;

/// Options for [`estimate`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimateOptions {
    /// Whether to run each pass on the rayon thread pool (default: false).
    ///
    /// Results are identical either way.
    pub parallel: bool,
}

impl EstimateOptions {
    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// Every scalar field estimated for one mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct DifferentialFields<I: MeshIndex = u32> {
    edge_weights: EdgeProperty<f64, I>,
    curvature: CurvatureFields<I>,
    shape: FaceProperty<f64, I>,
}

impl<I: MeshIndex> DifferentialFields<I> {
    /// Cotangent weight per edge.
    pub fn edge_weights(&self) -> &EdgeProperty<f64, I> {
        &self.edge_weights
    }

    /// Mean curvature from the uniform Laplacian, per vertex.
    pub fn uniform_mean(&self) -> &VertexProperty<f64, I> {
        &self.curvature.uniform_mean
    }

    /// Mean curvature from the cotangent Laplacian, per vertex.
    pub fn mean(&self) -> &VertexProperty<f64, I> {
        &self.curvature.mean
    }

    /// Angle-deficit Gaussian curvature, per vertex.
    pub fn gaussian(&self) -> &VertexProperty<f64, I> {
        &self.curvature.gaussian
    }

    /// Triangle shape ratio, per face.
    pub fn shape(&self) -> &FaceProperty<f64, I> {
        &self.shape
    }

    /// All three curvature fields.
    pub fn curvature(&self) -> &CurvatureFields<I> {
        &self.curvature
    }

    /// Sum of the Gaussian curvature field.
    pub fn total_gaussian_curvature(&self) -> f64 {
        total_gaussian_curvature(&self.curvature.gaussian)
    }

    /// Number of faces with a degenerate shape.
    pub fn degenerate_faces(&self) -> usize {
        count_degenerate(&self.shape)
    }
}

/// Estimate every field of `mesh`.
pub fn estimate<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    options: &EstimateOptions,
) -> DifferentialFields<I> {
    estimate_with_progress(mesh, options, &Progress::none())
}

/// Estimate every field of `mesh`, reporting each finished pass.
pub fn estimate_with_progress<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    options: &EstimateOptions,
    progress: &Progress,
) -> DifferentialFields<I> {
    let parallel = options.parallel;
    log::debug!(
        "estimating fields: {} vertices, {} edges, {} faces (parallel: {})",
        mesh.num_vertices(),
        mesh.num_edges(),
        mesh.num_faces(),
        parallel
    );

    let edge_weights = edge_weights_impl(mesh, parallel);
    log::debug!("edge weights done");
    progress.report(1, PASSES, "edge weights");

    let curvature = compute_curvature_impl(mesh, &edge_weights, parallel);
    log::debug!("curvature done");
    progress.report(2, PASSES, "curvature");

    let shape = triangle_shapes_impl(mesh, parallel);
    log::debug!("triangle shape done");
    progress.report(3, PASSES, "triangle shape");

    let fields = DifferentialFields {
        edge_weights,
        curvature,
        shape,
    };

    let degenerate = fields.degenerate_faces();
    if degenerate > 0 {
        log::warn!("{} of {} faces are degenerate", degenerate, mesh.num_faces());
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::curvature::compute_curvature;
    use crate::algo::laplacian::edge_weights;
    use crate::algo::quality::triangle_shapes;
    use crate::algo::test_meshes::{flat_grid, icosphere};
    use std::f64::consts::TAU;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_fields_cover_mesh() {
        let mesh = flat_grid(3);
        let fields = estimate(&mesh, &EstimateOptions::default());

        assert_eq!(fields.edge_weights().len(), mesh.num_edges());
        assert_eq!(fields.uniform_mean().len(), mesh.num_vertices());
        assert_eq!(fields.mean().len(), mesh.num_vertices());
        assert_eq!(fields.gaussian().len(), mesh.num_vertices());
        assert_eq!(fields.shape().len(), mesh.num_faces());
        assert_eq!(fields.degenerate_faces(), 0);
    }

    #[test]
    fn test_fields_match_individual_passes() {
        let mesh = icosphere(1);
        let fields = estimate(&mesh, &EstimateOptions::default());

        let weights = edge_weights(&mesh);
        assert_eq!(fields.edge_weights(), &weights);
        assert_eq!(fields.curvature(), &compute_curvature(&mesh, &weights));
        assert_eq!(fields.shape(), &triangle_shapes(&mesh));
    }

    #[test]
    fn test_total_gaussian_curvature_sphere() {
        let mesh = icosphere(1);
        let fields = estimate(&mesh, &EstimateOptions::default());
        assert!((fields.total_gaussian_curvature() - 2.0 * TAU).abs() < 1e-6);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mesh = icosphere(2);
        let sequential = estimate(&mesh, &EstimateOptions::default().sequential());
        let parallel = estimate(&mesh, &EstimateOptions::default().with_parallel(true));
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_progress_once_per_pass() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let progress = Progress::new(move |done, total, pass| {
            sink.lock().unwrap().push((done, total, pass.to_string()));
        });

        let mesh = flat_grid(2);
        estimate_with_progress(&mesh, &EstimateOptions::default(), &progress);

        let seen = seen.lock().unwrap();
        let passes: Vec<&str> = seen.iter().map(|(_, _, p)| p.as_str()).collect();
        assert_eq!(passes, ["edge weights", "curvature", "triangle shape"]);
        assert!(seen.iter().enumerate().all(|(i, &(done, total, _))| done == i + 1 && total == 3));
    }

    #[test]
    fn test_default_is_sequential() {
        assert!(!EstimateOptions::default().parallel);
    }
}
