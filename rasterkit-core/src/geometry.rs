/// 2D geometry primitives consumed by the rasterizer
use nalgebra::{Point2, Vector3};

/// RGB color with channels nominally in [0, 1]. The rasterizer never clamps.
pub type Color = Vector3<f64>;

/// Linearly interpolate between two colors.
pub fn lerp_color(a: &Color, b: &Color, t: f64) -> Color {
    a * (1.0 - t) + b * t
}

/// A 2D vertex with a screen-space position and a color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex2D {
    pub position: Point2<f64>,
    pub color: Color,
}

impl Vertex2D {
    pub fn new(x: f64, y: f64, r: f64, g: f64, b: f64) -> Self {
        Self {
            position: Point2::new(x, y),
            color: Color::new(r, g, b),
        }
    }

    pub fn with_color(position: Point2<f64>, color: Color) -> Self {
        Self { position, color }
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }
}

/// A primitive referencing vertices of a shared vertex list by index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive2D {
    Line([usize; 2]),
    Triangle([usize; 3]),
}

impl Primitive2D {
    /// Vertex indices referenced by this primitive
    pub fn vertex_indices(&self) -> &[usize] {
        match self {
            Primitive2D::Line(indices) => indices,
            Primitive2D::Triangle(indices) => indices,
        }
    }
}
