//! WebGPU confetti overlay
//!
//! Particles are turned into flat-colored triangles in CSS pixel space and
//! drawn onto a transparent canvas stacked over the page.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{ConfettiRenderer, css_to_ndc};
pub use vertex::Vertex;
