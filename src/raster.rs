//! Software rasterizers for the dial: alpha-blended pixels on an RGBA8
//! framebuffer. All shapes are anti-aliased by a one-pixel distance falloff.

use rusttype::{point, Font, PositionedGlyph, Scale};

use crate::Color;

/// A borrowed RGBA8 framebuffer, row-major, 4 bytes per pixel.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.frame.is_empty()
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    /// Source-over blend of one pixel. Out-of-bounds writes are dropped.
    pub fn blend(&mut self, x: i32, y: i32, color: Color, alpha: f32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y * self.width + x) * 4;
        if idx + 4 > self.frame.len() {
            return;
        }
        let a = alpha.clamp(0.0, 1.0);
        let src = [color.r as f32, color.g as f32, color.b as f32];
        for c in 0..3 {
            let dst = self.frame[idx + c] as f32;
            self.frame[idx + c] = (src[c] * a + dst * (1.0 - a)).round() as u8;
        }
        self.frame[idx + 3] = 0xff;
    }
}

pub fn fill_circle(canvas: &mut Canvas, cx: f32, cy: f32, radius: f32, color: Color) {
    if radius <= 0.0 {
        return;
    }
    let min_x = (cx - radius).floor() as i32 - 1;
    let max_x = (cx + radius).ceil() as i32 + 1;
    let min_y = (cy - radius).floor() as i32 - 1;
    let max_y = (cy + radius).ceil() as i32 + 1;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            let dist = (dx * dx + dy * dy).sqrt() - radius;
            let aa = (0.5 - dist).clamp(0.0, 1.0);
            if aa > 0.01 {
                canvas.blend(x, y, color, aa);
            }
        }
    }
}

/// Fills the rectangle `[x0, x1] x [y0, y1]` rotated clockwise by `angle`
/// degrees about `(cx, cy)`, with corners rounded by `corner` pixels.
///
/// Pixels are tested by rotating them back into the rectangle's own frame
/// and evaluating the rounded-rect signed distance there, so the shape stays
/// crisp at any angle.
#[allow(clippy::too_many_arguments)]
pub fn fill_rotated_rect(
    canvas: &mut Canvas,
    cx: f32,
    cy: f32,
    x0: f32,
    x1: f32,
    y0: f32,
    y1: f32,
    angle: f32,
    corner: f32,
    color: Color,
) {
    if x1 <= x0 || y1 <= y0 {
        return;
    }
    let (sin, cos) = angle.to_radians().sin_cos();

    // Bounding box of the rotated corners.
    let rotate = |x: f32, y: f32| -> (f32, f32) {
        let dx = x - cx;
        let dy = y - cy;
        (cx + dx * cos - dy * sin, cy + dx * sin + dy * cos)
    };
    let corners = [
        rotate(x0, y0),
        rotate(x1, y0),
        rotate(x0, y1),
        rotate(x1, y1),
    ];
    let min_x = corners.iter().map(|c| c.0).fold(f32::INFINITY, f32::min).floor() as i32 - 1;
    let max_x = corners
        .iter()
        .map(|c| c.0)
        .fold(f32::NEG_INFINITY, f32::max)
        .ceil() as i32
        + 1;
    let min_y = corners.iter().map(|c| c.1).fold(f32::INFINITY, f32::min).floor() as i32 - 1;
    let max_y = corners
        .iter()
        .map(|c| c.1)
        .fold(f32::NEG_INFINITY, f32::max)
        .ceil() as i32
        + 1;

    let rcx = (x0 + x1) / 2.0;
    let rcy = (y0 + y1) / 2.0;
    let hx = (x1 - x0) / 2.0;
    let hy = (y1 - y0) / 2.0;
    let corner = corner.min(hx).min(hy);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            // Inverse rotation back into the unrotated frame.
            let ux = cx + dx * cos + dy * sin;
            let uy = cy - dx * sin + dy * cos;

            let qx = (ux - rcx).abs() - (hx - corner);
            let qy = (uy - rcy).abs() - (hy - corner);
            let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
            let dist = outside + qx.max(qy).min(0.0) - corner;

            let aa = (0.5 - dist).clamp(0.0, 1.0);
            if aa > 0.01 {
                canvas.blend(x, y, color, aa);
            }
        }
    }
}

/// Draws `text` with its bounding box centered on `(x, y)`.
pub fn draw_text(canvas: &mut Canvas, x: f32, y: f32, text: &str, font: &Font, size: f32, color: Color) {
    let scale = Scale::uniform(size);
    let v_metrics = font.v_metrics(scale);
    let glyphs: Vec<PositionedGlyph> = font
        .layout(text, scale, point(0.0, v_metrics.ascent))
        .collect();

    let (min_x, max_x, min_y, max_y) = glyphs.iter().filter_map(|g| g.pixel_bounding_box()).fold(
        (i32::MAX, i32::MIN, i32::MAX, i32::MIN),
        |(min_x, max_x, min_y, max_y), bb| {
            (
                min_x.min(bb.min.x),
                max_x.max(bb.max.x),
                min_y.min(bb.min.y),
                max_y.max(bb.max.y),
            )
        },
    );
    let width_px = if min_x < max_x { max_x - min_x } else { 0 };
    let height_px = if min_y < max_y { max_y - min_y } else { 0 };
    let offset_x = x.round() as i32 - width_px / 2;
    let offset_y = y.round() as i32 - height_px / 2;

    for glyph in glyphs {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                let px = offset_x + gx as i32 + bb.min.x - min_x;
                let py = offset_y + gy as i32 + bb.min.y - min_y;
                if v > 0.01 {
                    canvas.blend(px, py, color, v);
                }
            });
        }
    }
}
