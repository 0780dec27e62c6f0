//! Turning estimated fields into something a renderer can draw.
//!
//! - [`color`]: the five-stop color ramp and robust range selection
//! - [`mode`]: the selectable draw modes and the field each one shows
//! - [`presenter`]: the draw-mode state machine holding a mesh and its fields
//! - [`reflection`]: the stripe texture used for reflection lines

pub mod color;
pub mod mode;
pub mod presenter;
pub mod reflection;

pub use color::{colorize, robust_range, value_to_color, Rgb};
pub use mode::{Domain, DrawMode, FieldBinding, RangePolicy, ScalarField};
pub use presenter::{ColorBuffer, PresenterOptions, ScalarFieldPresenter, DEFAULT_FIXED_RANGE};
pub use reflection::{reflection_texture, save_reflection_texture, DEFAULT_TEXTURE_SIZE};
