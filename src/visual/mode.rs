//! Draw modes and the fields they display.

use std::fmt;
use std::str::FromStr;

use crate::error::MeshError;

/// Mesh elements a scalar field is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    /// One value per vertex.
    Vertex,
    /// One value per face.
    Face,
}

/// A precomputed scalar field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarField {
    /// Mean curvature from the uniform Laplacian.
    UniformMean,
    /// Mean curvature from the cotangent Laplacian.
    Mean,
    /// Angle-deficit Gaussian curvature.
    Gaussian,
    /// Triangle shape ratio.
    Shape,
}

impl ScalarField {
    /// Elements this field is attached to.
    pub fn domain(self) -> Domain {
        match self {
            ScalarField::UniformMean | ScalarField::Mean | ScalarField::Gaussian => Domain::Vertex,
            ScalarField::Shape => Domain::Face,
        }
    }
}

/// How the color range of a field is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangePolicy {
    /// Data-driven: the field's range with 5% clipped from each tail.
    Percentile,
    /// An application-chosen range, independent of the data.
    Fixed,
}

/// What a draw mode displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldBinding {
    /// Field to color-code.
    pub field: ScalarField,
    /// How its color range is chosen.
    pub range: RangePolicy,
}

impl FieldBinding {
    /// Elements the colors are attached to.
    pub fn domain(&self) -> Domain {
        self.field.domain()
    }
}

/// A selectable way of drawing the mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DrawMode {
    /// Plain shaded surface, no scalar field.
    #[default]
    Default,
    /// Vertex colors from uniform mean curvature.
    UniformMeanCurvature,
    /// Vertex colors from cotangent mean curvature.
    MeanCurvature,
    /// Vertex colors from Gaussian curvature.
    GaussianCurvature,
    /// Face colors from triangle shape.
    TriangleShape,
    /// Sphere-mapped stripe texture, no scalar field.
    ReflectionLines,
}

impl DrawMode {
    /// Every mode, in menu order.
    pub const ALL: [DrawMode; 6] = [
        DrawMode::Default,
        DrawMode::UniformMeanCurvature,
        DrawMode::MeanCurvature,
        DrawMode::GaussianCurvature,
        DrawMode::TriangleShape,
        DrawMode::ReflectionLines,
    ];

    /// Menu label.
    pub fn name(self) -> &'static str {
        match self {
            DrawMode::Default => "Default",
            DrawMode::UniformMeanCurvature => "Uniform Mean Curvature",
            DrawMode::MeanCurvature => "Mean Curvature",
            DrawMode::GaussianCurvature => "Gaussian Curvature",
            DrawMode::TriangleShape => "Triangle Shape",
            DrawMode::ReflectionLines => "Reflection Lines",
        }
    }

    /// Kebab-case identifier, as accepted on the command line.
    pub fn slug(self) -> &'static str {
        match self {
            DrawMode::Default => "default",
            DrawMode::UniformMeanCurvature => "uniform-mean-curvature",
            DrawMode::MeanCurvature => "mean-curvature",
            DrawMode::GaussianCurvature => "gaussian-curvature",
            DrawMode::TriangleShape => "triangle-shape",
            DrawMode::ReflectionLines => "reflection-lines",
        }
    }

    /// Field displayed in this mode, if any.
    pub fn binding(self) -> Option<FieldBinding> {
        let bind = |field, range| Some(FieldBinding { field, range });
        match self {
            DrawMode::UniformMeanCurvature => bind(ScalarField::UniformMean, RangePolicy::Percentile),
            DrawMode::MeanCurvature => bind(ScalarField::Mean, RangePolicy::Percentile),
            DrawMode::GaussianCurvature => bind(ScalarField::Gaussian, RangePolicy::Percentile),
            DrawMode::TriangleShape => bind(ScalarField::Shape, RangePolicy::Fixed),
            DrawMode::Default | DrawMode::ReflectionLines => None,
        }
    }

    /// Check if this mode color-codes a scalar field.
    pub fn is_field_backed(self) -> bool {
        self.binding().is_some()
    }
}

impl fmt::Display for DrawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DrawMode {
    type Err = MeshError;

    /// Parse a menu label (any case) or a kebab-case slug.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        DrawMode::ALL
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(s) || m.slug().eq_ignore_ascii_case(s))
            .ok_or_else(|| MeshError::UnknownDrawMode {
                name: s.to_string(),
            })
    }
}
