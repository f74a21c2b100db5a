use life_grid::{CellRect, LineSegment, RenderPrimitives};

pub const BACKGROUND_COLOR: [u8; 4] = [0xff, 0xff, 0xff, 0xff];
pub const LINE_COLOR: [u8; 4] = [0x00, 0x00, 0x00, 0xff];
pub const CELL_COLOR: [u8; 4] = [0xff, 0x00, 0x00, 0xff];

/// Draws `primitives` into an RGBA `frame` of `width` x `height` pixels:
/// background first, then live cells, then grid lines on top. Anything
/// outside the frame is clipped.
pub fn rasterize(frame: &mut [u8], width: u32, height: u32, primitives: &RenderPrimitives) {
    debug_assert_eq!(frame.len(), 4 * width as usize * height as usize);
    let mut canvas = Canvas {
        frame,
        width,
        height,
    };

    canvas.clear(BACKGROUND_COLOR);
    for cell in &primitives.cells {
        canvas.fill_rect(cell, CELL_COLOR);
    }
    for line in &primitives.lines {
        canvas.draw_line(line, LINE_COLOR);
    }
}

struct Canvas<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
}

impl Canvas<'_> {
    fn clear(&mut self, color: [u8; 4]) {
        for pixel in self.frame.chunks_exact_mut(4) {
            pixel.copy_from_slice(&color);
        }
    }

    fn fill_rect(&mut self, rect: &CellRect, color: [u8; 4]) {
        let right = rect.x.saturating_add(rect.width).min(self.width);
        let bottom = rect.y.saturating_add(rect.height).min(self.height);
        for y in rect.y..bottom {
            for x in rect.x..right {
                self.set_pixel(x, y, color);
            }
        }
    }

    // Segments are axis-aligned; both end points are drawn.
    fn draw_line(&mut self, line: &LineSegment, color: [u8; 4]) {
        let (left, right) = (line.x1.min(line.x2), line.x1.max(line.x2));
        let (top, bottom) = (line.y1.min(line.y2), line.y1.max(line.y2));
        for y in top..=bottom.min(self.height.saturating_sub(1)) {
            for x in left..=right.min(self.width.saturating_sub(1)) {
                self.set_pixel(x, y, color);
            }
        }
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        if x < self.width && y < self.height {
            let index = 4 * (y as usize * self.width as usize + x as usize);
            self.frame[index..index + 4].copy_from_slice(&color);
        }
    }
}
