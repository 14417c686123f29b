//! Pure-computation RGBA raster for drawing a field-lines frame on the CPU.
//!
//! Always available (no feature gate) so both the `png` snapshot path and a
//! browser `ImageData` upload can share it.

use fieldlab_core::rect::Rect;
use glam::DVec2;

use crate::field_lines::FieldLines;

/// Canvas background, slate-100.
pub const BACKGROUND: [u8; 3] = [241, 245, 249];
/// Field-line colour, slate-500.
pub const LINE_COLOR: [u8; 3] = [100, 116, 139];
pub const NORTH_COLOR: [u8; 3] = [239, 68, 68];
pub const SOUTH_COLOR: [u8; 3] = [59, 130, 246];

/// Row-major RGBA8 pixel buffer. Every pixel is opaque.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    pub fn new(width: u32, height: u32, background: [u8; 3]) -> Self {
        let [r, g, b] = background;
        let len = width as usize * height as usize;
        let data = std::iter::repeat([r, g, b, 255]).take(len).flatten().collect();
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let i = self.index(i64::from(x), i64::from(y))?;
        let px = &self.data[i..i + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 4)
    }

    /// Alpha-blends `color` over the pixel at `(x, y)`. Off-canvas writes are dropped.
    pub fn blend(&mut self, x: i64, y: i64, color: [u8; 3], alpha: u8) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        let a = u32::from(alpha);
        for (dst, &src) in self.data[i..i + 3].iter_mut().zip(&color) {
            let mixed = (u32::from(src) * a + u32::from(*dst) * (255 - a) + 127) / 255;
            *dst = mixed as u8;
        }
    }

    /// Fills `rect` (inclusive pixel edges) with an opaque colour.
    pub fn fill_rect(&mut self, rect: Rect, color: [u8; 3]) {
        let (x0, y0) = (rect.min.x.round() as i64, rect.min.y.round() as i64);
        let (x1, y1) = (rect.max.x.round() as i64, rect.max.y.round() as i64);
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.blend(x, y, color, 255);
            }
        }
    }

    /// Draws a one-pixel line from `a` to `b` (Bresenham).
    pub fn line(&mut self, a: DVec2, b: DVec2, color: [u8; 3], alpha: u8) {
        if alpha == 0 || !a.is_finite() || !b.is_finite() {
            return;
        }
        let (mut x, mut y) = (a.x.round() as i64, a.y.round() as i64);
        let (x1, y1) = (b.x.round() as i64, b.y.round() as i64);
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.blend(x, y, color, alpha);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

/// Draws the magnet and every traced line of a field-lines frame.
///
/// Each segment takes the alpha of its end point, so unrevealed stretches
/// stay invisible.
pub fn render_field_lines(sim: &FieldLines) -> Raster {
    let bounds = sim.bounds();
    let mut raster = Raster::new(
        bounds.max.x.round() as u32,
        bounds.max.y.round() as u32,
        BACKGROUND,
    );
    for line in sim.lines() {
        for (pair, &alpha) in line.points.windows(2).zip(line.alpha.iter().skip(1)) {
            raster.line(pair[0], pair[1], LINE_COLOR, alpha);
        }
    }
    let magnet = sim.magnet();
    let body = magnet.body();
    let center = magnet.center();
    let (north_half, south_half) = if magnet.north.x <= magnet.south.x {
        (
            Rect::new(body.min, DVec2::new(center.x, body.max.y)),
            Rect::new(DVec2::new(center.x, body.min.y), body.max),
        )
    } else {
        (
            Rect::new(DVec2::new(center.x, body.min.y), body.max),
            Rect::new(body.min, DVec2::new(center.x, body.max.y)),
        )
    };
    raster.fill_rect(north_half, NORTH_COLOR);
    raster.fill_rect(south_half, SOUTH_COLOR);
    raster
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldlab_core::Simulation;
    use serde_json::json;

    #[test]
    fn new_raster_is_opaque_background() {
        let r = Raster::new(8, 4, BACKGROUND);
        assert_eq!(r.data().len(), 8 * 4 * 4);
        assert_eq!(r.pixel(7, 3), Some([241, 245, 249, 255]));
        assert_eq!(r.pixel(8, 0), None);
    }

    #[test]
    fn blend_mixes_by_alpha() {
        let mut r = Raster::new(1, 1, [0, 0, 0]);
        r.blend(0, 0, [255, 255, 255], 255);
        assert_eq!(r.pixel(0, 0), Some([255, 255, 255, 255]));
        let mut r = Raster::new(1, 1, [0, 0, 0]);
        r.blend(0, 0, [200, 100, 0], 128);
        assert_eq!(r.pixel(0, 0), Some([100, 50, 0, 255]));
        r.blend(-1, 5, [255, 0, 0], 255);
    }

    #[test]
    fn line_covers_both_endpoints() {
        let mut r = Raster::new(10, 10, [0, 0, 0]);
        r.line(DVec2::new(1.0, 1.0), DVec2::new(8.0, 5.0), [255, 0, 0], 255);
        assert_eq!(r.pixel(1, 1), Some([255, 0, 0, 255]));
        assert_eq!(r.pixel(8, 5), Some([255, 0, 0, 255]));
        assert_eq!(r.pixel(1, 9), Some([0, 0, 0, 255]));
    }

    #[test]
    fn zero_alpha_line_draws_nothing() {
        let mut r = Raster::new(4, 4, [0, 0, 0]);
        let before = r.clone();
        r.line(DVec2::ZERO, DVec2::new(3.0, 3.0), [255, 255, 255], 0);
        assert_eq!(r, before);
    }

    #[test]
    fn hidden_field_lines_render_only_the_magnet() {
        let sim = crate::field_lines::FieldLines::new(200, 120, 1).unwrap();
        let r = render_field_lines(&sim);
        assert_eq!((r.width(), r.height()), (200, 120));
        let line_px = r
            .data()
            .chunks_exact(4)
            .filter(|px| px[..3] == LINE_COLOR)
            .count();
        assert_eq!(line_px, 0);
        let c = sim.magnet().north;
        assert_eq!(r.pixel(c.x as u32, c.y as u32), Some([239, 68, 68, 255]));
    }

    #[test]
    fn show_all_draws_lines() {
        let mut sim = crate::field_lines::FieldLines::new(300, 200, 3).unwrap();
        sim.scatter(500);
        sim.set_params(&json!({"show_all": true})).unwrap();
        sim.step().unwrap();
        let r = render_field_lines(&sim);
        let line_px = r
            .data()
            .chunks_exact(4)
            .filter(|px| px[..3] == LINE_COLOR)
            .count();
        assert!(line_px > 100, "only {line_px} line pixels");
    }
}
