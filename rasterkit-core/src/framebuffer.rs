/// Pixel targets written by the rasterizer
use crate::geometry::Color;

/// Anything the rasterizer can write pixels into.
///
/// Bounds enforcement belongs to the implementor; the rasterizer emits
/// coordinates as computed, including negative ones.
pub trait PixelSink {
    fn set_pixel(&mut self, x: i32, y: i32, color: Color);
}

/// A row-major RGB framebuffer
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::zeros(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Color at `(x, y)`, or `None` when outside the buffer
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Pixel at `(x, y)` quantized to 8-bit channels, clamping to [0, 1]
    pub fn to_rgb8(&self, x: i32, y: i32) -> Option<[u8; 3]> {
        self.pixel(x, y).map(|c| {
            let q = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
            [q(c.x), q(c.y), q(c.z)]
        })
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }
}

impl PixelSink for Framebuffer {
    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        match self.index(x, y) {
            Some(idx) => self.pixels[idx] = color,
            None => log::trace!("dropping out-of-range pixel ({}, {})", x, y),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::PixelSink;
    use crate::geometry::Color;

    /// Records every write in order, including duplicates.
    #[derive(Debug, Default)]
    pub struct PixelRecorder {
        pub writes: Vec<(i32, i32, Color)>,
    }

    impl PixelRecorder {
        pub fn coords(&self) -> Vec<(i32, i32)> {
            self.writes.iter().map(|&(x, y, _)| (x, y)).collect()
        }

        pub fn sorted_coords(&self) -> Vec<(i32, i32)> {
            let mut coords = self.coords();
            coords.sort_unstable();
            coords
        }

        pub fn color_at(&self, x: i32, y: i32) -> Option<Color> {
            self.writes
                .iter()
                .find(|&&(px, py, _)| px == x && py == y)
                .map(|&(_, _, c)| c)
        }
    }

    impl PixelSink for PixelRecorder {
        fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
            self.writes.push((x, y, color));
        }
    }
}
