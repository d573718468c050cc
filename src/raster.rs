use crate::geometry::Point;
use crate::palette::Rgb;
use crate::scene::{DrawCommand, STAGE_HEIGHT, STAGE_WIDTH, Scene};

/// Maps the fixed 600x800 stage into a pixel grid, preserving aspect and
/// centring the stage inside the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale_x: f64,
    pub scale_y: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Viewport {
    /// `pixel_aspect` is pixel height divided by pixel width (2.0 for one
    /// character cell per pixel, 1.0 for half-block or braille dots).
    pub fn fit(pixel_width: usize, pixel_height: usize, pixel_aspect: f64) -> Self {
        let aspect = if pixel_aspect > 0.0 { pixel_aspect } else { 1.0 };
        let w = pixel_width as f64;
        let h = pixel_height as f64;
        let scale = (w / STAGE_WIDTH).min(h * aspect / STAGE_HEIGHT);
        let scale_x = scale;
        let scale_y = scale / aspect;
        Self {
            scale_x,
            scale_y,
            offset_x: (w - STAGE_WIDTH * scale_x) * 0.5,
            offset_y: (h - STAGE_HEIGHT * scale_y) * 0.5,
        }
    }

    pub fn to_pixel(&self, p: Point) -> (f64, f64) {
        (
            self.offset_x + (p.x + STAGE_WIDTH * 0.5) * self.scale_x,
            self.offset_y + (STAGE_HEIGHT * 0.5 - p.y) * self.scale_y,
        )
    }

    pub fn to_stage(&self, px: f64, py: f64) -> Point {
        Point::new(
            (px - self.offset_x) / self.scale_x - STAGE_WIDTH * 0.5,
            STAGE_HEIGHT * 0.5 - (py - self.offset_y) / self.scale_y,
        )
    }
}

/// RGBA pixel buffer the scene is painted into.
pub struct Canvas {
    width: usize,
    height: usize,
    pixel_aspect: f64,
    viewport: Viewport,
    pixels: Vec<u8>,
}

impl Canvas {
    pub fn new(width: usize, height: usize, pixel_aspect: f64) -> Self {
        Self {
            width,
            height,
            pixel_aspect,
            viewport: Viewport::fit(width, height, pixel_aspect),
            pixels: vec![0u8; width.saturating_mul(height).saturating_mul(4)],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn pixels_rgba(&self) -> &[u8] {
        &self.pixels
    }

    /// Returns true when the buffer had to be reallocated.
    pub fn resize(&mut self, width: usize, height: usize) -> bool {
        if width == self.width && height == self.height {
            return false;
        }
        self.width = width;
        self.height = height;
        self.viewport = Viewport::fit(width, height, self.pixel_aspect);
        self.pixels
            .resize(width.saturating_mul(height).saturating_mul(4), 0);
        true
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        Some(Rgb::new(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]))
    }

    /// Colour under a stage coordinate, if it falls inside the grid.
    pub fn sample(&self, p: Point) -> Option<Rgb> {
        let (px, py) = self.viewport.to_pixel(p);
        if px < 0.0 || py < 0.0 {
            return None;
        }
        self.pixel(px.floor() as usize, py.floor() as usize)
    }

    pub fn clear(&mut self, color: Rgb) {
        let rgba = color.rgba();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    /// Clears to the scene background and paints every command in order.
    pub fn draw(&mut self, scene: &Scene) {
        self.clear(scene.background);
        for cmd in &scene.commands {
            self.paint(cmd);
        }
    }

    pub fn paint(&mut self, cmd: &DrawCommand) {
        if self.width == 0 || self.height == 0 {
            return;
        }

        let bounds = cmd.bounds();
        let (ax, ay) = self.viewport.to_pixel(bounds.min);
        let (bx, by) = self.viewport.to_pixel(bounds.max);
        // Stage y grows upwards, pixel y grows downwards.
        let x0 = ax.min(bx).floor().max(0.0) as usize;
        let x1 = (ax.max(bx).ceil().max(0.0) as usize).min(self.width);
        let y0 = ay.min(by).floor().max(0.0) as usize;
        let y1 = (ay.max(by).ceil().max(0.0) as usize).min(self.height);

        let rgba = cmd.color().rgba();
        for y in y0..y1 {
            for x in x0..x1 {
                let p = self.viewport.to_stage(x as f64 + 0.5, y as f64 + 0.5);
                if cmd.covers(p) {
                    let i = (y * self.width + x) * 4;
                    self.pixels[i..i + 4].copy_from_slice(&rgba);
                }
            }
        }
    }
}
