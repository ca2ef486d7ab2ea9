use crate::Color;

/// Bytes used by one pixel in an [`Image`] buffer.
pub const BYTES_PER_PIXEL: usize = 3;

/// A tightly packed RGB24 pixel buffer.
///
/// Rows are stored top to bottom, pixels left to right, three bytes per pixel
/// in `r, g, b` order. This is the layout the frame dump and any display
/// frontend consume directly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Image {
    /// Create a black image.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * BYTES_PER_PIXEL],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn fill(&mut self, color: Color) {
        for pixel in self.data.chunks_exact_mut(BYTES_PER_PIXEL) {
            pixel.copy_from_slice(&[color.r, color.g, color.b]);
        }
    }

    /// Draw a pixel; coordinates outside the image are ignored.
    pub fn draw_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y * self.width + x) * BYTES_PER_PIXEL;
        self.data[idx] = color.r;
        self.data[idx + 1] = color.g;
        self.data[idx + 2] = color.b;
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * BYTES_PER_PIXEL;
        Some(Color::new_rgb(
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
        ))
    }
}
