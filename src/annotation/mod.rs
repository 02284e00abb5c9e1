//! Annotation data model: points keyed by index and the primitives built on them.

pub mod error;
pub mod graph;
pub mod keys;

pub use error::AnnotationError;
pub use graph::{AnnotatedPoint, AnnotationGraph};
pub use keys::{AngleKey, CircleKey, LineKey};
