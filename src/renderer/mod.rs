//! Rendering support
//!
//! Turns simulation frames into vertex lists a GPU or canvas adapter can
//! upload as-is. Rasterization itself lives with the adapter.

pub mod shapes;
pub mod vertex;

pub use shapes::{FrameMesh, tessellate};
pub use vertex::Vertex;
