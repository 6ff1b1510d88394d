use ndarray::Array2;
use std::str::FromStr;

use super::error::CanvasError;
use super::surface::{DrawingSurface, Rgba};

/// Logical canvas width, in pixels
pub const DEFAULT_WIDTH: usize = 20;
/// Logical canvas height, in pixels
pub const DEFAULT_HEIGHT: usize = 20;
/// Screen pixels per logical pixel
pub const DEFAULT_ZOOM: u32 = 10;

/// A point in logical canvas coordinates. Pixel `(i, j)` spans
/// `[i, i + 1) x [j, j + 1)`, so its center is at `(i + 0.5, j + 0.5)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl FromStr for Point {
    type Err = CanvasError;

    /// Parses `"<x>,<y>"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CanvasError::InvalidPoint(s.to_string());
        let (x, y) = s.trim().split_once(',').ok_or_else(invalid)?;
        let x = x.trim().parse::<f32>().map_err(|_| invalid())?;
        let y = y.trim().parse::<f32>().map_err(|_| invalid())?;
        if !x.is_finite() || !y.is_finite() {
            return Err(invalid());
        }
        Ok(Point::new(x, y))
    }
}

#[derive(Debug, Clone)]
pub struct CanvasConfig {
    pub width: usize,
    pub height: usize,
    pub zoom: u32,
    pub pen_width: f32,
    pub pen_color: Rgba,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            zoom: DEFAULT_ZOOM,
            pen_width: 1.0,
            pen_color: Rgba::BLUE,
        }
    }
}

/// An in-memory drawing surface for hand-drawn digits.
///
/// Strokes are round-capped and anti-aliased by pixel coverage. Colors are
/// stored premultiplied by alpha over a transparent background, so the
/// pen's color channel holds the stroke intensity directly. This differs
/// from a browser canvas, whose `getImageData` returns un-premultiplied
/// pixels: there a blue pen leaves 255 in the blue channel of every touched
/// pixel and the coverage only shows in alpha.
#[derive(Debug, Clone)]
pub struct Canvas {
    zoom: u32,
    pen_width: f32,
    pen_color: Rgba,
    pixels: Array2<Rgba>,
}

impl Canvas {
    pub fn new(config: CanvasConfig) -> Result<Self, CanvasError> {
        if config.width == 0 || config.height == 0 || config.zoom == 0 {
            return Err(CanvasError::InvalidDimensions {
                width: config.width,
                height: config.height,
                zoom: config.zoom,
            });
        }
        let mut canvas = Self {
            zoom: config.zoom,
            pen_width: 1.0,
            pen_color: config.pen_color,
            pixels: Array2::from_elem((config.height, config.width), Rgba::TRANSPARENT),
        };
        canvas.set_pen_width(config.pen_width)?;
        Ok(canvas)
    }

    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    pub fn pen_width(&self) -> f32 {
        self.pen_width
    }

    pub fn pen_color(&self) -> Rgba {
        self.pen_color
    }

    /// Sets the stroke width in logical pixels.
    pub fn set_pen_width(&mut self, width: f32) -> Result<(), CanvasError> {
        let max = self.pixels.nrows().max(self.pixels.ncols()) as f32;
        if !width.is_finite() || width <= 0.0 || width > max {
            return Err(CanvasError::InvalidPenWidth(width));
        }
        self.pen_width = width;
        Ok(())
    }

    /// Erases every stroke.
    pub fn clear(&mut self) {
        self.pixels.fill(Rgba::TRANSPARENT);
    }

    /// Converts page coordinates of a pointer event into logical coordinates,
    /// given the page position of the canvas' top-left corner.
    pub fn to_logical(&self, page_x: f32, page_y: f32, offset_left: f32, offset_top: f32) -> Point {
        let zoom = self.zoom as f32;
        Point::new((page_x - offset_left) / zoom, (page_y - offset_top) / zoom)
    }

    /// Strokes a straight segment from `from` to `to` with the current pen.
    pub fn draw_line(&mut self, from: Point, to: Point) {
        let radius = self.pen_width / 2.0;
        let reach = radius + 1.0;
        let (rows, cols) = self.pixels.dim();

        let x_lo = clamp_index(from.x.min(to.x) - reach, cols);
        let x_hi = clamp_index(from.x.max(to.x) + reach, cols);
        let y_lo = clamp_index(from.y.min(to.y) - reach, rows);
        let y_hi = clamp_index(from.y.max(to.y) + reach, rows);

        for y in y_lo..y_hi {
            for x in x_lo..x_hi {
                let center = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                let distance = distance_to_segment(center, from, to);
                let coverage = (radius + 0.5 - distance).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    let blended = composite(self.pen_color, coverage, self.pixels[[y, x]]);
                    self.pixels[[y, x]] = blended;
                }
            }
        }
    }

    /// Strokes consecutive points, one segment at a time. A single point
    /// draws a dot.
    pub fn draw_polyline(&mut self, points: &[Point]) {
        match points {
            [] => {}
            [only] => self.draw_line(*only, *only),
            _ => {
                for pair in points.windows(2) {
                    self.draw_line(pair[0], pair[1]);
                }
            }
        }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        let config = CanvasConfig::default();
        Self {
            zoom: config.zoom,
            pen_width: config.pen_width,
            pen_color: config.pen_color,
            pixels: Array2::from_elem((config.height, config.width), Rgba::TRANSPARENT),
        }
    }
}

impl DrawingSurface for Canvas {
    fn logical_size(&self) -> (usize, usize) {
        (self.pixels.ncols(), self.pixels.nrows())
    }

    fn pixel(&self, x: usize, y: usize) -> Rgba {
        self.pixels[[y, x]]
    }
}

fn clamp_index(value: f32, len: usize) -> usize {
    if value <= 0.0 {
        0
    } else {
        (value.ceil() as usize).min(len)
    }
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.x + t * dx, a.y + t * dy);
    ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
}

/// Source-over compositing of `pen` at `coverage` onto premultiplied `dst`.
fn composite(pen: Rgba, coverage: f32, dst: Rgba) -> Rgba {
    let alpha = coverage * pen.a() as f32 / 255.0;
    let mut out = [0u8; 4];
    for (i, channel) in out.iter_mut().enumerate() {
        let src = if i == 3 { 255.0 } else { pen.0[i] as f32 };
        let value = src * alpha + dst.0[i] as f32 * (1.0 - alpha);
        *channel = value.round().clamp(0.0, 255.0) as u8;
    }
    Rgba(out)
}
