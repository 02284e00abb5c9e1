//! Library exports for labeldcm.
//!
//! The annotation model, interaction state machine, view transform, renderer
//! and image I/O are usable without the command-line front-end, so other
//! front-ends can drive a [`Session`] directly.

pub mod annotation;
pub mod config;
pub mod draw;
pub mod geometry;
pub mod image_io;
pub mod input;
pub mod script;
pub mod session;
pub mod view;

pub use config::Config;
pub use session::Session;
