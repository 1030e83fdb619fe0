/// Built-in 2D scene: a gradient square split into two triangles and
/// outlined by four lines
use rasterkit_core::{Primitive2D, Vertex2D};

/// Side length of the scene's bounding square
pub const SCENE_EXTENT: f64 = 62.0;

/// Vertices and primitives of the default scene, shifted by `(dx, dy)`
pub fn default_scene(dx: f64, dy: f64) -> (Vec<Vertex2D>, Vec<Primitive2D>) {
    let v = |x: f64, y: f64, r: f64, g: f64, b: f64| Vertex2D::new(x + dx, y + dy, r, g, b);

    let vertices = vec![
        v(10.0, 10.0, 1.0, 0.0, 0.0),
        v(52.0, 52.0, 0.0, 1.0, 0.0),
        v(52.0, 10.0, 0.0, 0.0, 1.0),
        v(10.0, 52.0, 1.0, 1.0, 1.0),
        v(10.0, 10.0, 1.0, 1.0, 1.0),
        v(10.0, 52.0, 0.0, 0.0, 0.0),
        v(52.0, 52.0, 1.0, 1.0, 1.0),
        v(52.0, 10.0, 0.0, 0.0, 0.0),
    ];

    let primitives = vec![
        Primitive2D::Triangle([0, 1, 2]),
        Primitive2D::Triangle([0, 3, 1]),
        Primitive2D::Line([4, 5]),
        Primitive2D::Line([5, 6]),
        Primitive2D::Line([6, 7]),
        Primitive2D::Line([7, 4]),
    ];

    (vertices, primitives)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterkit_core::{Color, Framebuffer, Rasterizer};

    #[test]
    fn test_default_scene_draws() {
        let (vertices, primitives) = default_scene(0.0, 0.0);
        let mut fb = Framebuffer::new(SCENE_EXTENT as usize, SCENE_EXTENT as usize);
        Rasterizer::new(&mut fb)
            .draw_primitives(&vertices, &primitives)
            .unwrap();

        // Outline corners keep the line colors, the interior is filled.
        assert_eq!(fb.pixel(10, 10), Some(Color::new(1.0, 1.0, 1.0)));
        assert_eq!(fb.pixel(52, 10), Some(Color::new(0.0, 0.0, 0.0)));
        assert_ne!(fb.pixel(30, 20), Some(Color::zeros()));
        assert_eq!(fb.pixel(5, 5), Some(Color::zeros()));
    }
}
