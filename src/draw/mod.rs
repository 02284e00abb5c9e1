//! Rendering primitives (Cairo/Pango based).
//!
//! - [`Color`]: RGBA color with the highlight variant used for emphasis
//! - [`FontDescriptor`]: label font
//! - [`render_annotations`]: draws an annotation graph for preview or export
//! - [`surface`]: moves pixels between `image` rasters and cairo surfaces

pub mod color;
pub mod error;
pub mod font;
pub mod render;
pub mod surface;

pub use color::Color;
pub use error::RenderError;
pub use font::FontDescriptor;
pub use render::{AnnotationStyle, RenderTarget, render_annotations, render_label};
pub use surface::{rgba_from_surface, surface_from_rgba};
