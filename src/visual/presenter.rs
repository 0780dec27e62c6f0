//! Draw-mode state machine over the estimated fields.
//!
//! A [`ScalarFieldPresenter`] owns a mesh and its [`DifferentialFields`].
//! Selecting a [`DrawMode`] that displays a field color-codes that field and
//! caches the result as a [`ColorBuffer`]; any other mode clears the cache.

use super::color::{colorize, robust_range, Rgb};
use super::mode::{Domain, DrawMode, FieldBinding, RangePolicy, ScalarField};
use crate::algo::{estimate, DifferentialFields, EstimateOptions};
use crate::mesh::{HalfEdgeMesh, MeshIndex};

/// Default color range for fields with [`RangePolicy::Fixed`].
pub const DEFAULT_FIXED_RANGE: (f64, f64) = (0.6, 2.0);

/// Options for [`ScalarFieldPresenter`].
#[derive(Debug, Clone, Copy)]
pub struct PresenterOptions {
    /// Color range used by fields with a fixed range policy.
    pub fixed_range: (f64, f64),

    /// Options for estimating the fields on (re)load.
    pub estimate: EstimateOptions,
}

impl Default for PresenterOptions {
    fn default() -> Self {
        Self {
            fixed_range: DEFAULT_FIXED_RANGE,
            estimate: EstimateOptions::default(),
        }
    }
}

impl PresenterOptions {
    /// Set the fixed color range. The bounds may be given in either order.
    pub fn with_fixed_range(mut self, a: f64, b: f64) -> Self {
        self.fixed_range = (a.min(b), a.max(b));
        self
    }

    /// Set whether estimation runs in parallel.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.estimate = self.estimate.with_parallel(parallel);
        self
    }
}

/// Per-element colors for one draw mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorBuffer {
    /// Elements the colors belong to.
    pub domain: Domain,
    /// Range the ramp was stretched over.
    pub range: (f64, f64),
    /// One color per element, in element order.
    pub colors: Vec<Rgb>,
}

impl ColorBuffer {
    /// Number of colors.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Colors as normalized floats, ready for a vertex buffer.
    pub fn to_f32(&self) -> Vec<[f32; 3]> {
        self.colors.iter().map(|c| c.to_f32()).collect()
    }
}

/// Holds a mesh with its fields and the active draw mode.
#[derive(Debug, Clone)]
pub struct ScalarFieldPresenter<I: MeshIndex = u32> {
    mesh: HalfEdgeMesh<I>,
    fields: DifferentialFields<I>,
    options: PresenterOptions,
    mode: DrawMode,
    colors: Option<ColorBuffer>,
}

impl<I: MeshIndex> ScalarFieldPresenter<I> {
    /// Take ownership of `mesh` and estimate all of its fields.
    ///
    /// Starts in [`DrawMode::Default`].
    pub fn load(mesh: HalfEdgeMesh<I>, options: PresenterOptions) -> Self {
        let fields = estimate(&mesh, &options.estimate);
        Self {
            mesh,
            fields,
            options,
            mode: DrawMode::Default,
            colors: None,
        }
    }

    /// Replace the mesh, discarding every previously estimated field.
    ///
    /// The active mode is kept and its colors are recomputed.
    pub fn reload(&mut self, mesh: HalfEdgeMesh<I>) {
        self.fields = estimate(&mesh, &self.options.estimate);
        self.mesh = mesh;
        self.colors = self.colors(self.mode);
    }

    /// Switch to `mode` and return its colors, if it has any.
    pub fn select(&mut self, mode: DrawMode) -> Option<&ColorBuffer> {
        log::debug!("draw mode: {}", mode);
        self.mode = mode;
        self.colors = self.colors(mode);
        self.colors.as_ref()
    }

    /// The active draw mode.
    pub fn active_mode(&self) -> DrawMode {
        self.mode
    }

    /// Colors of the active mode.
    pub fn current_colors(&self) -> Option<&ColorBuffer> {
        self.colors.as_ref()
    }

    /// Compute the colors `mode` would display, without changing state.
    ///
    /// `None` for modes that do not display a field.
    pub fn colors(&self, mode: DrawMode) -> Option<ColorBuffer> {
        let FieldBinding { field, range } = mode.binding()?;
        let values = self.field(field);
        let (min, max) = match range {
            RangePolicy::Percentile => robust_range(values).unwrap_or((0.0, 0.0)),
            RangePolicy::Fixed => self.options.fixed_range,
        };

        Some(ColorBuffer {
            domain: field.domain(),
            range: (min, max),
            colors: colorize(values, min, max),
        })
    }

    /// Raw values of a field, in element order.
    pub fn field(&self, field: ScalarField) -> &[f64] {
        match field {
            ScalarField::UniformMean => self.fields.uniform_mean().values(),
            ScalarField::Mean => self.fields.mean().values(),
            ScalarField::Gaussian => self.fields.gaussian().values(),
            ScalarField::Shape => self.fields.shape().values(),
        }
    }

    /// The mesh being presented.
    pub fn mesh(&self) -> &HalfEdgeMesh<I> {
        &self.mesh
    }

    /// Fields of the current mesh.
    pub fn fields(&self) -> &DifferentialFields<I> {
        &self.fields
    }

    /// Options in use.
    pub fn options(&self) -> &PresenterOptions {
        &self.options
    }
}
