use crate::{LifeError, Random, Result};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Square board of live/dead cells, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// All-dead grid of `size` x `size` cells.
    pub fn new(size: usize) -> Result<Self> {
        Self::check_size(size)?;
        Ok(Self {
            size,
            cells: vec![false; size * size],
        })
    }

    /// Grid where every cell is independently alive with probability `p`.
    pub fn random(size: usize, p: f64, rand: &mut Random) -> Result<Self> {
        Self::check_size(size)?;
        let cells = (0..size * size).map(|_| rand.next_bool(p)).collect();
        Ok(Self { size, cells })
    }

    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self> {
        let size = rows.len();
        Self::check_size(size)?;
        if let Some(row) = rows.iter().find(|row| row.len() != size) {
            return Err(LifeError::NotSquare {
                rows: size,
                cols: row.len(),
            });
        }
        Ok(Self {
            size,
            cells: rows.concat(),
        })
    }

    /// Parses a text picture of a grid, one line per row. `#`, `O` and `*`
    /// are live cells, any other character is dead. Blank lines are skipped
    /// and surrounding whitespace is trimmed.
    pub fn from_pattern(pattern: &str) -> Result<Self> {
        let rows: Vec<Vec<bool>> = pattern
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().map(|c| matches!(c, '#' | 'O' | '*')).collect())
            .collect();
        Self::from_rows(&rows)
    }

    pub(crate) fn from_cells(size: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Self { size, cells }
    }

    fn check_size(size: usize) -> Result<()> {
        if size == 0 {
            Err(LifeError::InvalidSize(size))
        } else {
            Ok(())
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    pub fn get(&self, loc: Loc) -> Option<bool> {
        loc.grid_index(self.size).map(|index| self.cells[index])
    }

    pub fn cells_iter(&self) -> impl DoubleEndedIterator<Item = &bool> + Clone {
        self.cells.iter()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks_exact(self.size)
    }

    pub fn live_locs(&self) -> impl Iterator<Item = Loc> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(move |(index, _)| Loc::new(index / size, index % size))
    }
}

impl Index<Loc> for Grid {
    type Output = bool;

    fn index(&self, loc: Loc) -> &Self::Output {
        loc.grid_index(self.size)
            .map(|index| &self.cells[index])
            .unwrap_or_else(|| panic!("Index indices {}, {} out of bounds", loc.row, loc.col))
    }
}

impl IndexMut<Loc> for Grid {
    fn index_mut(&mut self, loc: Loc) -> &mut Self::Output {
        match loc.grid_index(self.size) {
            Some(index) => &mut self.cells[index],
            None => panic!("Index_mut indices {}, {} out of bounds", loc.row, loc.col),
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &alive in row {
                write!(f, "{}", if alive { '#' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Loc {
    pub row: usize,
    pub col: usize,
}

impl Loc {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn grid_index(&self, size: usize) -> Option<usize> {
        if self.row < size && self.col < size {
            Some(self.row * size + self.col)
        } else {
            None
        }
    }
}
