use crate::{Grid, LifeError, Random, Result};
use log::debug;
use rayon::prelude::*;

/// Probability that a cell starts alive when seeding randomly.
pub const SEED_ALIVE_PROBABILITY: f64 = 0.5;

type Kernel = [[u8; 3]; 3];

const DIAGONAL_KERNEL: Kernel = [[1, 0, 1], [0, 0, 0], [1, 0, 1]];
const ORTHOGONAL_KERNEL: Kernel = [[0, 1, 0], [1, 0, 1], [0, 1, 0]];

/// Owns the current generation and advances it one step at a time.
#[derive(Debug)]
pub struct AutomatonEngine {
    grid: Option<Grid>,
    generation: u64,
    rand: Random,
}

impl AutomatonEngine {
    pub fn new(rand: Random) -> Self {
        Self {
            grid: None,
            generation: 0,
            rand,
        }
    }

    pub fn seed_random(&mut self, size: usize) -> Result<&Grid> {
        let grid = Grid::random(size, SEED_ALIVE_PROBABILITY, &mut self.rand)?;
        debug!("Seeded random {size}x{size} grid, population {}", grid.population());
        Ok(self.install(grid))
    }

    pub fn seed_zero(&mut self, size: usize) -> Result<&Grid> {
        let grid = Grid::new(size)?;
        Ok(self.install(grid))
    }

    pub fn seed_with(&mut self, grid: Grid) -> &Grid {
        self.install(grid)
    }

    /// Changing the size always reseeds randomly; old content is discarded.
    pub fn resize(&mut self, size: usize) -> Result<&Grid> {
        self.seed_random(size)
    }

    pub fn step(&mut self) -> Result<&Grid> {
        let current = self.grid.as_ref().ok_or(LifeError::Uninitialized)?;
        let next = next_generation(current);
        self.generation += 1;
        debug!(
            "Generation {}: population {}",
            self.generation,
            next.population()
        );
        Ok(&*self.grid.insert(next))
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn size(&self) -> Option<usize> {
        self.grid.as_ref().map(Grid::size)
    }

    /// Steps taken since the last seed.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn install(&mut self, grid: Grid) -> &Grid {
        self.generation = 0;
        self.grid.insert(grid)
    }
}

/// Computes the successor of `grid` under B3/S23 with dead cells beyond the
/// border. The input is left untouched.
pub fn next_generation(grid: &Grid) -> Grid {
    let padded = PaddedCells::new(grid);
    let diagonal = padded.convolve(&DIAGONAL_KERNEL);
    let orthogonal = padded.convolve(&ORTHOGONAL_KERNEL);

    let cells = grid
        .cells_iter()
        .zip(diagonal.iter().zip(&orthogonal))
        .map(|(&alive, (&diag, &orth))| next_state(alive, diag + orth))
        .collect();
    Grid::from_cells(grid.size(), cells)
}

fn next_state(alive: bool, neighbors: u8) -> bool {
    if alive {
        (2..=3).contains(&neighbors)
    } else {
        neighbors == 3
    }
}

/// Copy of a grid surrounded by a one-cell border of dead cells.
struct PaddedCells {
    width: usize,
    cells: Vec<u8>,
}

impl PaddedCells {
    fn new(grid: &Grid) -> Self {
        let size = grid.size();
        let width = size + 2;
        let mut cells = vec![0; width * width];
        for (row, source) in grid.rows().enumerate() {
            let start = (row + 1) * width + 1;
            for (cell, &alive) in cells[start..start + size].iter_mut().zip(source) {
                *cell = u8::from(alive);
            }
        }
        Self { width, cells }
    }

    fn inner_size(&self) -> usize {
        self.width - 2
    }

    /// Kernel sums for every interior cell, in grid row-major order.
    fn convolve(&self, kernel: &Kernel) -> Vec<u8> {
        let size = self.inner_size();
        let mut sums = vec![0; size * size];
        sums.par_chunks_mut(size)
            .enumerate()
            .for_each(|(row, sums_row)| {
                for (col, sum) in sums_row.iter_mut().enumerate() {
                    *sum = self.kernel_sum(kernel, row, col);
                }
            });
        sums
    }

    // Grid cell (row, col) sits at padded (row + 1, col + 1), so its 3x3
    // window starts at padded (row, col).
    fn kernel_sum(&self, kernel: &Kernel, row: usize, col: usize) -> u8 {
        let mut result = 0;
        for (kernel_row, weights) in kernel.iter().enumerate() {
            let start = (row + kernel_row) * self.width + col;
            for (weight, cell) in weights.iter().zip(&self.cells[start..start + 3]) {
                result += weight * cell;
            }
        }
        result
    }
}
