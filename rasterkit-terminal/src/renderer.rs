/// Half-block truecolor presenter for terminal rendering
use crossterm::{
    cursor,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix3, Matrix4, Point2, Point3, Vector3};
use rasterkit_core::raster::signed_area;
use rasterkit_core::{Color, Framebuffer, MeshBuffers, Primitive2D, RasterError, Rasterizer, Vertex2D};
use std::io::Write;

/// Upper half block: foreground paints the top pixel, background the bottom.
const HALF_BLOCK: char = '\u{2580}';

/// Renderer that rasterizes into a framebuffer two pixel rows per terminal row
pub struct TerminalRenderer {
    framebuffer: Framebuffer,
}

impl TerminalRenderer {
    /// Size in terminal cells
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            framebuffer: Framebuffer::new(columns, rows * 2),
        }
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn clear(&mut self, background: Color) {
        self.framebuffer.clear(background);
    }

    pub fn render_primitives(
        &mut self,
        vertices: &[Vertex2D],
        primitives: &[Primitive2D],
    ) -> Result<(), RasterError> {
        Rasterizer::new(&mut self.framebuffer).draw_primitives(vertices, primitives)
    }

    /// Draw a mesh placed by `model` through a fixed orthographic viewport.
    ///
    /// World units map to a quarter of the shorter framebuffer side, y up.
    /// Triangles facing away from the viewer are culled, which is enough
    /// for convex meshes without a depth buffer. Vertices are colored by
    /// their world-space normal.
    pub fn render_mesh(&mut self, mesh: &MeshBuffers, model: &Matrix4<f64>) {
        let width = self.framebuffer.width() as f64;
        let height = self.framebuffer.height() as f64;
        let scale = width.min(height) * 0.25;
        let (cx, cy) = (width / 2.0, height / 2.0);

        let normal_matrix = model
            .fixed_view::<3, 3>(0, 0)
            .into_owned()
            .try_inverse()
            .map(|m| m.transpose())
            .unwrap_or_else(Matrix3::identity);

        let screen: Vec<Vertex2D> = mesh
            .positions
            .iter()
            .zip(&mesh.normals)
            .map(|(p, n)| {
                let world = model.transform_point(&Point3::from(*p));
                let normal = (normal_matrix * Vector3::from(*n)).normalize();
                Vertex2D::with_color(
                    Point2::new(cx + world.x * scale, cy - world.y * scale),
                    normal.add_scalar(1.0) * 0.5,
                )
            })
            .collect();

        let mut rasterizer = Rasterizer::new(&mut self.framebuffer);
        let mut culled = 0;
        for [a, b, c] in mesh.triangles() {
            let (va, vb, vc) = (&screen[a], &screen[b], &screen[c]);
            // The viewport keeps visual orientation, so front faces stay
            // counter-clockwise and have negative signed area on screen.
            if signed_area(&va.position, &vb.position, &vc.position) >= 0.0 {
                culled += 1;
                continue;
            }
            rasterizer.draw_triangle(va, vb, vc);
        }
        log::trace!("culled {} of {} triangles", culled, mesh.triangle_count());
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let fb = &self.framebuffer;
        for row in 0..fb.height() / 2 {
            writer.queue(cursor::MoveTo(0, row as u16))?;
            for x in 0..fb.width() as i32 {
                let top = to_term_color(fb.to_rgb8(x, 2 * row as i32));
                let bottom = to_term_color(fb.to_rgb8(x, 2 * row as i32 + 1));
                writer.queue(SetForegroundColor(top))?;
                writer.queue(SetBackgroundColor(bottom))?;
                writer.queue(Print(HALF_BLOCK))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

fn to_term_color(rgb: Option<[u8; 3]>) -> TermColor {
    match rgb {
        Some([r, g, b]) => TermColor::Rgb { r, g, b },
        None => TermColor::Reset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rasterkit_core::{compute_transformation, create_cube, create_sphere, TransformOp};

    fn lit_pixels(renderer: &TerminalRenderer) -> usize {
        renderer
            .framebuffer()
            .pixels()
            .iter()
            .filter(|c| **c != Color::zeros())
            .count()
    }

    #[test]
    fn test_framebuffer_has_two_rows_per_cell() {
        let renderer = TerminalRenderer::new(40, 12);
        assert_eq!(renderer.framebuffer().width(), 40);
        assert_eq!(renderer.framebuffer().height(), 24);
    }

    #[test]
    fn test_front_face_of_cube_is_visible() {
        let mut renderer = TerminalRenderer::new(40, 20);
        let cube = create_cube();
        renderer.render_mesh(&cube, &Matrix4::identity());

        // Only the +z face survives culling; its normal maps to (0.5, 0.5, 1).
        let center = renderer.framebuffer().pixel(20, 20).unwrap();
        assert_relative_eq!(center, Color::new(0.5, 0.5, 1.0), epsilon = 1e-12);
        assert_eq!(lit_pixels(&renderer), 20 * 20);
    }

    #[test]
    fn test_rotated_sphere_stays_within_its_disc() {
        let mut renderer = TerminalRenderer::new(60, 30);
        let sphere = create_sphere(12, 16).unwrap();
        let model = compute_transformation(&[TransformOp::RotateX(30.0), TransformOp::RotateY(45.0)]);
        renderer.render_mesh(&sphere, &model);

        // Radius 15 pixels around (30, 30).
        let fb = renderer.framebuffer();
        let mut lit = 0;
        for y in 0..fb.height() as i32 {
            for x in 0..fb.width() as i32 {
                if fb.pixel(x, y) != Some(Color::zeros()) {
                    lit += 1;
                    let (px, py) = (f64::from(x) + 0.5 - 30.0, f64::from(y) + 0.5 - 30.0);
                    assert!(px.hypot(py) <= 15.0 + 1e-9);
                }
            }
        }
        let circle = std::f64::consts::PI * 15.0 * 15.0;
        assert!(lit as f64 > 0.85 * circle, "lit = {}", lit);
    }

    #[test]
    fn test_draw_emits_one_cell_per_column() {
        let mut renderer = TerminalRenderer::new(3, 2);
        renderer.clear(Color::new(1.0, 0.0, 0.0));
        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches(HALF_BLOCK).count(), 6);
    }
}
