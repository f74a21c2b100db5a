use crate::Grid;
use log::debug;

/// Drawable area and the grid size being drawn into it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewportGeometry {
    pub width: u32,
    pub height: u32,
    pub grid_size: usize,
}

impl ViewportGeometry {
    pub fn new(width: u32, height: u32, grid_size: usize) -> Self {
        Self {
            width,
            height,
            grid_size,
        }
    }

    /// Pixel side of one cell. Zero when the viewport has fewer pixels than
    /// the grid has cells along its shorter side.
    pub fn cell_spacing(&self) -> u32 {
        match u32::try_from(self.grid_size) {
            Ok(0) | Err(_) => 0,
            Ok(grid_size) => self.width.min(self.height) / grid_size,
        }
    }

    /// Pixel side of the whole grid.
    pub fn extent(&self) -> u32 {
        self.cell_spacing() * self.grid_size as u32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineSegment {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl LineSegment {
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Everything a renderer needs to draw one frame: grid lines and one square
/// per live cell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderPrimitives {
    pub lines: Vec<LineSegment>,
    pub cells: Vec<CellRect>,
}

impl RenderPrimitives {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.cells.is_empty()
    }
}

/// Projects `grid` into a `width` x `height` pixel area.
///
/// Cell `(row, col)` is drawn at `x = col * spacing`, `y = row * spacing`.
/// A viewport too small to give each cell at least one pixel yields no
/// primitives at all.
pub fn project(grid: &Grid, width: u32, height: u32) -> RenderPrimitives {
    let viewport = ViewportGeometry::new(width, height, grid.size());
    let spacing = viewport.cell_spacing();
    if spacing == 0 {
        debug!(
            "Viewport {width}x{height} too small for {0}x{0} grid",
            grid.size()
        );
        return RenderPrimitives::default();
    }

    RenderPrimitives {
        lines: grid_lines(&viewport),
        cells: grid
            .live_locs()
            .map(|loc| CellRect {
                x: loc.col as u32 * spacing,
                y: loc.row as u32 * spacing,
                width: spacing,
                height: spacing,
            })
            .collect(),
    }
}

fn grid_lines(viewport: &ViewportGeometry) -> Vec<LineSegment> {
    let spacing = viewport.cell_spacing();
    let extent = viewport.extent();
    let mut result = Vec::with_capacity(2 * (viewport.grid_size + 1));
    for i in 0..=viewport.grid_size as u32 {
        let offset = i * spacing;
        result.push(LineSegment::new(offset, 0, offset, extent));
        result.push(LineSegment::new(0, offset, extent, offset));
    }
    result
}

/// Keeps the most recent projection so it can be handed to a renderer by
/// reference.
#[derive(Clone, Debug, Default)]
pub struct GeometryProjector {
    last: RenderPrimitives,
}

impl GeometryProjector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project(&mut self, grid: &Grid, width: u32, height: u32) -> &RenderPrimitives {
        self.last = project(grid, width, height);
        &self.last
    }

    pub fn last(&self) -> &RenderPrimitives {
        &self.last
    }
}
