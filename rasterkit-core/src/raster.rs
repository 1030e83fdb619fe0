/// Line and triangle rasterization onto a pixel sink
///
/// Coordinates are screen space with y growing downward. Pixel `(x, y)` is
/// sampled at its center `(x + 0.5, y + 0.5)`.
use nalgebra::Point2;
use thiserror::Error;

use crate::framebuffer::PixelSink;
use crate::geometry::{lerp_color, Primitive2D, Vertex2D};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RasterError {
    #[error("primitive {primitive} references vertex {index}, but only {len} vertices exist")]
    VertexIndex {
        primitive: usize,
        index: usize,
        len: usize,
    },
}

/// Edge function of `p` against the directed edge `a -> b`.
///
/// Positive when `p` lies to the right of the edge as seen on a y-down
/// screen, i.e. inside a clockwise triangle.
pub fn edge_function(a: &Point2<f64>, b: &Point2<f64>, p: &Point2<f64>) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Twice the signed area of `a, b, c`; positive for clockwise screen winding
pub fn signed_area(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    edge_function(a, b, c)
}

/// A horizontal edge traversed left to right in clockwise screen winding.
pub fn is_top_edge(a: &Point2<f64>, b: &Point2<f64>) -> bool {
    a.y == b.y && b.x > a.x
}

/// A non-horizontal edge traversed upward (decreasing y) in clockwise
/// screen winding.
pub fn is_left_edge(a: &Point2<f64>, b: &Point2<f64>) -> bool {
    b.y < a.y
}

fn owns_boundary(a: &Point2<f64>, b: &Point2<f64>) -> bool {
    is_top_edge(a, b) || is_left_edge(a, b)
}

fn covers(edge: f64, owns_boundary: bool) -> bool {
    edge > 0.0 || (edge == 0.0 && owns_boundary)
}

/// Round a coordinate to a pixel index addressable by a `PixelSink`.
fn pixel_coord(v: f64) -> Option<i64> {
    let rounded = v.round();
    (rounded.is_finite()
        && rounded >= f64::from(i32::MIN)
        && rounded <= f64::from(i32::MAX))
    .then_some(rounded as i64)
}

/// Rasterizer borrowing a pixel sink for the duration of its draw calls
pub struct Rasterizer<'a, S: PixelSink + ?Sized> {
    target: &'a mut S,
}

impl<'a, S: PixelSink + ?Sized> Rasterizer<'a, S> {
    pub fn new(target: &'a mut S) -> Self {
        Self { target }
    }

    /// Draw a line with Bresenham stepping between the rounded endpoints.
    ///
    /// Exactly one pixel is written per step along the major axis. The
    /// color is interpolated by step count, so `t` reaches 1 on the last
    /// pixel. Swapping `v1` and `v2` touches the same pixels. A line whose
    /// rounded endpoint is not finite or falls outside the `i32` pixel
    /// range draws nothing.
    pub fn draw_line(&mut self, v1: &Vertex2D, v2: &Vertex2D) {
        let (Some(mut x1), Some(mut y1), Some(mut x2), Some(mut y2)) = (
            pixel_coord(v1.x()),
            pixel_coord(v1.y()),
            pixel_coord(v2.x()),
            pixel_coord(v2.y()),
        ) else {
            log::warn!(
                "skipping line with unrepresentable endpoint {:?} -> {:?}",
                v1.position,
                v2.position
            );
            return;
        };
        let (mut c1, mut c2) = (v1.color, v2.color);

        let steep = (y2 - y1).abs() > (x2 - x1).abs();
        if steep {
            std::mem::swap(&mut x1, &mut y1);
            std::mem::swap(&mut x2, &mut y2);
        }
        if x1 > x2 {
            std::mem::swap(&mut x1, &mut x2);
            std::mem::swap(&mut y1, &mut y2);
            std::mem::swap(&mut c1, &mut c2);
        }

        // Spans of i32 endpoints fit in i64 with room for `2 * error`.
        let dx = x2 - x1;
        let dy = (y2 - y1).abs();
        let y_step = if y1 < y2 { 1 } else { -1 };
        let mut error = 0i64;
        let mut y = y1;

        for x in x1..=x2 {
            let t = if dx == 0 {
                0.0
            } else {
                (x - x1) as f64 / dx as f64
            };
            let color = lerp_color(&c1, &c2, t);
            // x and y stay between the endpoints, so they fit in i32.
            let (px, py) = (x as i32, y as i32);
            if steep {
                self.target.set_pixel(py, px, color);
            } else {
                self.target.set_pixel(px, py, color);
            }

            error += dy;
            if 2 * error >= dx {
                y += y_step;
                error -= dx;
            }
        }
    }

    /// Fill a triangle with barycentric color interpolation.
    ///
    /// Counter-clockwise input is reordered to clockwise before edges are
    /// classified, so either winding yields the same pixels. Centers lying
    /// exactly on an edge are drawn only for top and left edges, which lets
    /// triangles sharing an edge tile without overlap. Zero-area triangles
    /// draw nothing.
    pub fn draw_triangle(&mut self, v1: &Vertex2D, v2: &Vertex2D, v3: &Vertex2D) {
        let area = signed_area(&v1.position, &v2.position, &v3.position);
        if area == 0.0 || !area.is_finite() {
            log::trace!("skipping degenerate triangle {:?} {:?} {:?}", v1, v2, v3);
            return;
        }
        let (v2, v3) = if area < 0.0 { (v3, v2) } else { (v2, v3) };
        let area = area.abs();

        let (p1, p2, p3) = (&v1.position, &v2.position, &v3.position);

        // Edge i is the one opposite vertex i.
        let owns1 = owns_boundary(p2, p3);
        let owns2 = owns_boundary(p3, p1);
        let owns3 = owns_boundary(p1, p2);

        let min_x = p1.x.min(p2.x).min(p3.x).floor() as i32;
        let max_x = p1.x.max(p2.x).max(p3.x).ceil() as i32;
        let min_y = p1.y.min(p2.y).min(p3.y).floor() as i32;
        let max_y = p1.y.max(p2.y).max(p3.y).ceil() as i32;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = Point2::new(f64::from(x) + 0.5, f64::from(y) + 0.5);

                let e1 = edge_function(p2, p3, &p);
                let e2 = edge_function(p3, p1, &p);
                let e3 = edge_function(p1, p2, &p);

                if covers(e1, owns1) && covers(e2, owns2) && covers(e3, owns3) {
                    let w1 = e1 / area;
                    let w2 = e2 / area;
                    let w3 = 1.0 - w1 - w2;
                    let color = v1.color * w1 + v2.color * w2 + v3.color * w3;
                    self.target.set_pixel(x, y, color);
                }
            }
        }
    }

    /// Draw primitives that index into a shared vertex list.
    ///
    /// Every index is checked before anything is drawn.
    pub fn draw_primitives(
        &mut self,
        vertices: &[Vertex2D],
        primitives: &[Primitive2D],
    ) -> Result<(), RasterError> {
        for (primitive, prim) in primitives.iter().enumerate() {
            if let Some(&index) = prim
                .vertex_indices()
                .iter()
                .find(|&&index| index >= vertices.len())
            {
                return Err(RasterError::VertexIndex {
                    primitive,
                    index,
                    len: vertices.len(),
                });
            }
        }

        for prim in primitives {
            match *prim {
                Primitive2D::Line([a, b]) => self.draw_line(&vertices[a], &vertices[b]),
                Primitive2D::Triangle([a, b, c]) => {
                    self.draw_triangle(&vertices[a], &vertices[b], &vertices[c])
                }
            }
        }
        Ok(())
    }
}
