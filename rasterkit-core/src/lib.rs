/// Rasterkit Core Library - Software rasterization and mesh/transform building
///
/// This library provides the stateless core: 2D line and triangle
/// rasterization onto a pixel sink, composition of affine transform
/// sequences into a single matrix, and procedural cube/sphere meshes.

pub mod framebuffer;
pub mod geometry;
pub mod mesh;
pub mod raster;
pub mod record;
pub mod transform;

// Re-export commonly used types
pub use framebuffer::{Framebuffer, PixelSink};
pub use geometry::{Color, Primitive2D, Vertex2D};
pub use mesh::{create_cube, create_sphere, MeshBuffers, MeshError, MeshShape};
pub use raster::{RasterError, Rasterizer};
pub use record::{compose_records, parse_record, parse_records, TransformError, TransformRecord};
pub use transform::{compute_transformation, Transform, TransformOp};
